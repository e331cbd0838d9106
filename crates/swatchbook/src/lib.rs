//! Swatchbook - a color palette picker core.
//!
//! A palette is a [`SelectionList<Color>`]: an ordered, bounded list of colors
//! with a current-selection cursor. A [`SyncController`] keeps it in step with
//! a [`SwatchStrip`] (the scrollable row of swatches) and a [`DetailEditor`]
//! such as [`ColorAdjustment`] (the popup with RGB sliders, grid picker, and
//! alpha slider). Refused edits are reported through a [`NoticePresenter`]
//! such as [`Toast`].
//!
//! All views here are headless models: they hold state and emit signals, and
//! the host application renders them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use swatchbook::prelude::*;
//!
//! let config = PaletteConfig::default();
//! let list = Arc::new(config.build_list().unwrap());
//! let editor = Arc::new(ColorAdjustment::new());
//! let strip = Arc::new(SwatchStrip::<ColorSwatch>::new().with_layout(config.swatch));
//! let toast = Arc::new(Toast::new().with_duration(config.toast_duration()));
//! let tasks = Arc::new(SharedTaskQueue::new());
//!
//! let _controller = SyncController::new(
//!     list.clone(),
//!     editor.clone(),
//!     strip.clone(),
//!     toast,
//!     tasks.clone(),
//! );
//!
//! // The user taps the third swatch, then drags the red slider.
//! strip.tap(2);
//! editor.set_channel(Channel::Red, 128);
//! assert_eq!(list.get(2), Some(Color::new(128, 0, 255, 255)));
//!
//! // After layout, the host drains deferred work (the pointer arrow update).
//! tasks.process_all();
//! assert_eq!(editor.pointer_target().map(|target| target.index), Some(2));
//! ```

pub use swatchbook_core::*;

/// Color and geometry primitives.
pub mod color {
    pub use swatchbook_color::*;
}

mod config;
mod controller;
mod editor;
mod error;
mod notice;
mod selection_list;
mod strip;

pub mod prelude;

pub use config::{PaletteConfig, default_palette};
pub use controller::{ReselectPolicy, SyncController};
pub use editor::{ColorAdjustment, DetailEditor, Segment};
pub use error::{CapacityError, ConfigError, ConfigResult};
pub use notice::{DEFAULT_TOAST_DURATION, NoticePresenter, Toast};
pub use selection_list::{
    ContentChange, DEFAULT_MAX_COUNT, DEFAULT_MIN_COUNT, ListConfig, SelectionCause,
    SelectionChange, SelectionList,
};
pub use strip::{
    ColorSwatch, PointerTarget, StripLayout, SwatchElement, SwatchStrip, SwatchStripView,
};
