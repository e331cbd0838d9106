//! Error types for the palette model and configuration loading.

use std::io;
use std::path::PathBuf;

use swatchbook_color::ParseColorError;
use thiserror::Error;

/// A palette mutation was refused because it would cross a size bound.
///
/// The list is left untouched when this is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// Removing would take the palette below its minimum size.
    #[error("the palette needs at least {min_count} colors")]
    AtMinimum { min_count: usize },

    /// Inserting would take the palette above its maximum size.
    #[error("the palette holds at most {max_count} colors")]
    AtMaximum { max_count: usize },
}

/// Errors that can occur while loading or saving a [`PaletteConfig`](crate::PaletteConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read palette config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid TOML or does not match the schema.
    #[error("invalid palette config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize palette config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A palette entry is not a valid hex color.
    #[error("invalid color at palette entry {index}: {source}")]
    InvalidColor {
        index: usize,
        #[source]
        source: ParseColorError,
    },
}

/// A specialized Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_messages() {
        assert_eq!(
            CapacityError::AtMinimum { min_count: 2 }.to_string(),
            "the palette needs at least 2 colors"
        );
        assert_eq!(
            CapacityError::AtMaximum { max_count: 3 }.to_string(),
            "the palette holds at most 3 colors"
        );
    }

    #[test]
    fn test_invalid_color_keeps_source() {
        let err = ConfigError::InvalidColor {
            index: 4,
            source: ParseColorError::InvalidLength { len: 3 },
        };
        assert!(err.to_string().starts_with("invalid color at palette entry 4"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
