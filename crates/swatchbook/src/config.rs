//! Palette configuration loaded from TOML.
//!
//! # Format
//!
//! ```toml
//! colors = ["FF0000", "#00FF00", "0000FF7D"]
//! current_index = 1
//! min_count = 2
//! max_count = 16
//! toast_duration_secs = 1.5
//! reselect = "ignore"
//!
//! [swatch]
//! swatch_size = 40.0
//! gap = 2.0
//! padding = 6.0
//! ```
//!
//! Every key is optional; missing keys take the values of
//! [`PaletteConfig::default`], whose colors are the [`default_palette`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use swatchbook_color::Color;
use swatchbook_core::logging::targets;

use crate::controller::ReselectPolicy;
use crate::error::{ConfigError, ConfigResult};
use crate::notice::DEFAULT_TOAST_DURATION;
use crate::selection_list::{ListConfig, SelectionList};
use crate::strip::StripLayout;

/// The starter palette: five primaries, then the same five at alpha 125.
pub fn default_palette() -> Vec<Color> {
    let opaque = [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW, Color::BLACK];
    opaque
        .iter()
        .copied()
        .chain(opaque.iter().map(|color| color.with_alpha(125)))
        .collect()
}

/// Startup settings for a palette picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Initial colors as `RRGGBB` or `RRGGBBAA` hex strings, `#` optional.
    pub colors: Vec<String>,
    /// Initially selected index; clamped to the palette.
    pub current_index: usize,
    /// Requested minimum palette size.
    pub min_count: Option<usize>,
    /// Requested maximum palette size.
    pub max_count: Option<usize>,
    /// How long refusal notices stay up.
    pub toast_duration_secs: f64,
    /// What re-selecting the current swatch does.
    pub reselect: ReselectPolicy,
    /// Swatch strip geometry.
    pub swatch: StripLayout,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: default_palette().into_iter().map(Color::to_hex).collect(),
            current_index: 0,
            min_count: None,
            max_count: None,
            toast_duration_secs: DEFAULT_TOAST_DURATION.as_secs_f64(),
            reselect: ReselectPolicy::default(),
            swatch: StripLayout::default(),
        }
    }
}

impl PaletteConfig {
    /// Parse a configuration from TOML text.
    ///
    /// Colors are validated eagerly so a bad entry is reported at load time.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.palette()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            target: targets::CONFIG,
            path = %path.display(),
            colors = config.colors.len(),
            "palette config loaded"
        );
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// The configured colors, parsed.
    pub fn palette(&self) -> ConfigResult<Vec<Color>> {
        self.colors
            .iter()
            .enumerate()
            .map(|(index, hex)| {
                hex.parse::<Color>()
                    .map_err(|source| ConfigError::InvalidColor { index, source })
            })
            .collect()
    }

    /// Cursor and bound settings for the palette list.
    pub fn list_config(&self) -> ListConfig {
        ListConfig {
            current_index: self.current_index,
            min_count: self.min_count,
            max_count: self.max_count,
        }
    }

    /// Build the palette list this configuration describes.
    pub fn build_list(&self) -> ConfigResult<SelectionList<Color>> {
        Ok(SelectionList::with_config(self.palette()?, self.list_config()))
    }

    /// Notice duration; negative or non-finite values fall back to the default.
    pub fn toast_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.toast_duration_secs).unwrap_or(DEFAULT_TOAST_DURATION)
    }
}
