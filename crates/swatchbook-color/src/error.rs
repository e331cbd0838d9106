//! Error types for the color crate.

use thiserror::Error;

/// Errors that can occur while parsing a color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string is not 6 or 8 hex digits long (after an optional `#`).
    #[error("invalid color length {len}: expected #RRGGBB or #RRGGBBAA")]
    InvalidLength { len: usize },

    /// The string contains a non-hexadecimal digit.
    #[error("invalid hex digit in color {input:?}")]
    InvalidDigit { input: String },
}
