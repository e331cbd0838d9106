//! Prelude module for Swatchbook.
//!
//! ```ignore
//! use swatchbook::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `ChangeNotifier`, `ConnectionGuard`)
//! - Palette model (`SelectionList`, `ListConfig`)
//! - Views and their interfaces (`SwatchStrip`, `ColorAdjustment`, `Toast`)
//! - The controller and its configuration
//! - Color and geometry types (`Color`, `Channel`, `Point`, `Rect`)

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use swatchbook_core::{
    Change, ChangeNotifier, ConnectionGuard, ConnectionId, Property, SharedTaskQueue, Signal,
};

// ============================================================================
// Palette Model
// ============================================================================

pub use crate::{
    CapacityError, ContentChange, ListConfig, SelectionCause, SelectionChange, SelectionList,
};

// ============================================================================
// Views
// ============================================================================

pub use crate::{
    ColorAdjustment, ColorSwatch, DetailEditor, NoticePresenter, PointerTarget, Segment,
    StripLayout, SwatchElement, SwatchStrip, SwatchStripView, Toast,
};

// ============================================================================
// Synchronization and Configuration
// ============================================================================

pub use crate::{ConfigError, PaletteConfig, ReselectPolicy, SyncController, default_palette};

// ============================================================================
// Color and Geometry
// ============================================================================

pub use swatchbook_color::{Channel, Color, Point, Rect, Size};
