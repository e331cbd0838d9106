//! Color and geometry primitives for Swatchbook.
//!
//! - [`Color`]: straight-alpha RGBA with 8 bits per channel, hex parsing and
//!   formatting, and exact conversion to and from normalized floats.
//! - [`Channel`]: selects one channel of a color, as driven by an editor slider.
//! - [`Point`], [`Size`], [`Rect`]: layout values for swatches and the editor's
//!   pointer arrow.
//!
//! ```
//! use swatchbook_color::{Channel, Color};
//!
//! let color: Color = "#FF000080".parse().unwrap();
//! assert_eq!(color.channel(Channel::Alpha), 0x80);
//! assert_eq!(color.with_channel(Channel::Green, 255).to_hex_rgb(), "FFFF00");
//! ```

mod color;
mod error;
mod geometry;

pub use color::{Channel, Color, clamp_level, level_to_unit, unit_to_level};
pub use error::ParseColorError;
pub use geometry::{Point, Rect, Size};
