//! The color detail editor.
//!
//! [`DetailEditor`] is the interface a [`SyncController`](crate::SyncController)
//! drives: it pushes the selected color in, listens for user edits and
//! remove/duplicate requests, and aims the editor's pointer arrow.
//!
//! [`ColorAdjustment`] is the headless model behind the adjustment popup:
//! three RGB sliders (each with step buttons), a spectrum grid picker, an
//! alpha slider, and remove/duplicate/close buttons. The RGB part and the
//! alpha part are stored separately so that picking a color from the grid
//! does not disturb the chosen transparency.
//!
//! # Example
//!
//! ```
//! use swatchbook::{ColorAdjustment, DetailEditor};
//! use swatchbook_color::{Channel, Color};
//!
//! let editor = ColorAdjustment::new().with_title("Palette");
//! editor.color_edited().connect(|color| println!("edited to {color}"));
//!
//! editor.set_displayed_color(Color::new(255, 0, 0, 125));
//! editor.set_channel(Channel::Green, 255);
//! assert_eq!(editor.edited_color(), Color::new(255, 255, 0, 125));
//! ```

use std::fmt;

use parking_lot::Mutex;
use swatchbook_color::{Channel, Color, clamp_level};
use swatchbook_core::logging::targets;
use swatchbook_core::{ChangeNotifier, Property, Signal};

use crate::strip::PointerTarget;

/// The editor operations a [`SyncController`](crate::SyncController) relies on.
pub trait DetailEditor: Send + Sync {
    /// Show `color` without reporting it as a user edit.
    ///
    /// Implementations must not emit [`color_edited`](Self::color_edited)
    /// from here.
    fn set_displayed_color(&self, color: Color);

    /// The color the editor currently shows.
    fn edited_color(&self) -> Color;

    /// Signal emitted with the new color after every user edit.
    fn color_edited(&self) -> &Signal<Color>;

    /// Signal emitted when the user asks to remove the current color.
    fn remove_requested(&self) -> &Signal<()>;

    /// Signal emitted when the user asks to duplicate the current color.
    fn duplicate_requested(&self) -> &Signal<()>;

    fn set_visible(&self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Aim the editor's pointer arrow.
    fn set_pointer_target(&self, target: PointerTarget);
}

/// The active picker page of a [`ColorAdjustment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segment {
    /// Red, green and blue sliders.
    #[default]
    Sliders,
    /// Spectrum grid picker.
    Grid,
}

impl Segment {
    /// The label shown on the segment control.
    pub fn title(self) -> &'static str {
        match self {
            Segment::Sliders => "Sliders",
            Segment::Grid => "Grid",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StoredColor {
    /// Always opaque; transparency lives in `alpha`.
    rgb: Color,
    alpha: u8,
}

impl StoredColor {
    fn current(self) -> Color {
        self.rgb.with_alpha(self.alpha)
    }
}

/// Model of the color adjustment popup.
///
/// # Signals
///
/// - `color_edited(Color)`: a slider, step button, or grid pick changed the color
/// - `remove_requested()`: the Remove button was pressed
/// - `duplicate_requested()`: the Duplicate button was pressed
/// - `visibility_changed(bool)`: the popup was shown or hidden
pub struct ColorAdjustment {
    stored: Mutex<StoredColor>,
    title: String,
    visible: Property<bool>,
    segment: Property<Segment>,
    pointer_target: Property<Option<PointerTarget>>,

    /// The color currently shown; notified once per actual change.
    pub displayed: ChangeNotifier<Color>,

    /// Signal emitted after a user edit.
    pub color_edited: Signal<Color>,

    /// Signal emitted when removal of the current color is requested.
    pub remove_requested: Signal<()>,

    /// Signal emitted when duplication of the current color is requested.
    pub duplicate_requested: Signal<()>,

    /// Signal emitted when visibility changes.
    pub visibility_changed: Signal<bool>,
}

impl ColorAdjustment {
    /// Create a visible editor showing opaque black.
    pub fn new() -> Self {
        Self {
            stored: Mutex::new(StoredColor {
                rgb: Color::BLACK,
                alpha: 255,
            }),
            title: String::new(),
            visible: Property::new(true),
            segment: Property::new(Segment::default()),
            pointer_target: Property::new(None),
            displayed: ChangeNotifier::new(Color::BLACK),
            color_edited: Signal::new(),
            remove_requested: Signal::new(),
            duplicate_requested: Signal::new(),
            visibility_changed: Signal::new(),
        }
    }

    /// Set the title using builder pattern.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial segment using builder pattern.
    pub fn with_segment(self, segment: Segment) -> Self {
        self.segment.set_silent(segment);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    // =========================================================================
    // User edits
    // =========================================================================

    /// Drag the slider for `channel` to `level`.
    pub fn set_channel(&self, channel: Channel, level: u8) {
        self.edit(|stored| match channel {
            Channel::Alpha => stored.alpha = level,
            _ => stored.rgb = stored.rgb.with_channel(channel, level),
        });
    }

    /// Press a step button beside the slider for `channel`.
    ///
    /// The result is clamped to `0..=255`.
    pub fn step_channel(&self, channel: Channel, delta: i16) {
        let level = self.edited_color().channel(channel);
        self.set_channel(channel, clamp_level(i32::from(level) + i32::from(delta)));
    }

    /// Drag the alpha slider to `alpha`.
    pub fn set_alpha(&self, alpha: u8) {
        self.set_channel(Channel::Alpha, alpha);
    }

    /// Pick a color from the grid. The stored alpha is kept.
    pub fn pick_color(&self, color: Color) {
        self.edit(|stored| stored.rgb = color.opaque());
    }

    /// Press the Remove button.
    pub fn request_remove(&self) {
        tracing::debug!(target: targets::EDITOR, "remove requested");
        self.remove_requested.emit(());
    }

    /// Press the Duplicate button.
    pub fn request_duplicate(&self) {
        tracing::debug!(target: targets::EDITOR, "duplicate requested");
        self.duplicate_requested.emit(());
    }

    /// Press the close button.
    pub fn close(&self) {
        self.set_visible(false);
    }

    fn edit(&self, f: impl FnOnce(&mut StoredColor)) {
        let color = {
            let mut stored = self.stored.lock();
            f(&mut stored);
            stored.current()
        };
        tracing::trace!(target: targets::EDITOR, %color, "color edited");
        self.displayed.set(color);
        self.color_edited.emit(color);
    }

    // =========================================================================
    // Presentation state
    // =========================================================================

    pub fn segment(&self) -> Segment {
        self.segment.get()
    }

    pub fn set_segment(&self, segment: Segment) {
        self.segment.set(segment);
    }

    /// The current pointer target, if one was set.
    pub fn pointer_target(&self) -> Option<PointerTarget> {
        self.pointer_target.get()
    }

    /// The `RRGGBB` label for the current color.
    pub fn hex_label(&self) -> String {
        self.edited_color().to_hex_rgb()
    }

    /// The `(start, end)` colors of the track behind the slider for `channel`.
    ///
    /// RGB tracks are opaque and sweep their channel from 0 to 255 with the
    /// other two fixed; the alpha track sweeps the current color's alpha.
    pub fn slider_gradient(&self, channel: Channel) -> (Color, Color) {
        let stored = *self.stored.lock();
        match channel {
            Channel::Alpha => {
                let color = stored.current();
                (color.with_alpha(0), color.with_alpha(255))
            }
            _ => (
                stored.rgb.with_channel(channel, 0),
                stored.rgb.with_channel(channel, 255),
            ),
        }
    }
}

impl Default for ColorAdjustment {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailEditor for ColorAdjustment {
    fn set_displayed_color(&self, color: Color) {
        {
            let mut stored = self.stored.lock();
            if stored.current() == color {
                return;
            }
            stored.rgb = color.opaque();
            stored.alpha = color.a;
        }
        self.displayed.set(color);
    }

    fn edited_color(&self) -> Color {
        self.stored.lock().current()
    }

    fn color_edited(&self) -> &Signal<Color> {
        &self.color_edited
    }

    fn remove_requested(&self) -> &Signal<()> {
        &self.remove_requested
    }

    fn duplicate_requested(&self) -> &Signal<()> {
        &self.duplicate_requested
    }

    fn set_visible(&self, visible: bool) {
        if self.visible.set(visible) {
            tracing::debug!(target: targets::EDITOR, visible, "editor visibility changed");
            self.visibility_changed.emit(visible);
        }
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn set_pointer_target(&self, target: PointerTarget) {
        self.pointer_target.set(Some(target));
    }
}

impl fmt::Debug for ColorAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorAdjustment")
            .field("title", &self.title)
            .field("color", &self.edited_color())
            .field("visible", &self.is_visible())
            .field("segment", &self.segment())
            .finish()
    }
}

static_assertions::assert_impl_all!(ColorAdjustment: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use swatchbook_color::Point;

    fn record_edits(editor: &ColorAdjustment) -> Arc<Mutex<Vec<Color>>> {
        let edits = Arc::new(Mutex::new(Vec::new()));
        let edits_clone = edits.clone();
        editor
            .color_edited
            .connect(move |&color| edits_clone.lock().push(color));
        edits
    }

    #[test]
    fn test_displaying_a_color_is_not_an_edit() {
        let editor = ColorAdjustment::new();
        let edits = record_edits(&editor);

        editor.set_displayed_color(Color::new(10, 20, 30, 40));

        assert_eq!(editor.edited_color(), Color::new(10, 20, 30, 40));
        assert_eq!(editor.displayed.get(), Color::new(10, 20, 30, 40));
        assert!(edits.lock().is_empty());
    }

    #[test]
    fn test_redisplaying_the_same_color_is_silent() {
        let editor = ColorAdjustment::new();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        editor
            .displayed
            .connect(move |change| changes_clone.lock().push((change.old, change.new)));

        editor.set_channel(Channel::Blue, 9);
        editor.set_displayed_color(Color::new(0, 0, 9, 255));

        assert_eq!(
            *changes.lock(),
            vec![(Color::BLACK, Color::new(0, 0, 9, 255))]
        );
    }

    #[test]
    fn test_slider_edits_emit() {
        let editor = ColorAdjustment::new();
        let edits = record_edits(&editor);

        editor.set_channel(Channel::Red, 200);
        editor.set_alpha(100);

        assert_eq!(
            *edits.lock(),
            vec![Color::new(200, 0, 0, 255), Color::new(200, 0, 0, 100)]
        );
        assert_eq!(editor.hex_label(), "C80000");
    }

    #[test]
    fn test_step_buttons_clamp() {
        let editor = ColorAdjustment::new();
        editor.set_displayed_color(Color::new(254, 1, 128, 255));

        editor.step_channel(Channel::Red, 5);
        editor.step_channel(Channel::Green, -5);
        editor.step_channel(Channel::Blue, 1);
        editor.step_channel(Channel::Alpha, 1);

        assert_eq!(editor.edited_color(), Color::new(255, 0, 129, 255));
    }

    #[test]
    fn test_grid_pick_keeps_alpha() {
        let editor = ColorAdjustment::new();
        editor.set_displayed_color(Color::new(0, 0, 0, 125));

        editor.pick_color(Color::new(0, 0, 255, 10));

        assert_eq!(editor.edited_color(), Color::new(0, 0, 255, 125));
    }

    #[test]
    fn test_slider_gradients() {
        let editor = ColorAdjustment::new();
        editor.set_displayed_color(Color::new(10, 20, 30, 40));

        assert_eq!(
            editor.slider_gradient(Channel::Green),
            (Color::new(10, 0, 30, 255), Color::new(10, 255, 30, 255))
        );
        assert_eq!(
            editor.slider_gradient(Channel::Alpha),
            (Color::new(10, 20, 30, 0), Color::new(10, 20, 30, 255))
        );
    }

    #[test]
    fn test_visibility_signal_fires_only_on_change() {
        let editor = ColorAdjustment::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        editor
            .visibility_changed
            .connect(move |&visible| seen_clone.lock().push(visible));

        editor.set_visible(true);
        editor.close();
        editor.close();
        editor.set_visible(true);

        assert_eq!(*seen.lock(), vec![false, true]);
    }

    #[test]
    fn test_buttons_and_pointer() {
        let editor = ColorAdjustment::new().with_segment(Segment::Grid);
        let presses = Arc::new(Mutex::new(0));

        let presses_clone = presses.clone();
        editor.remove_requested.connect(move |_| *presses_clone.lock() += 1);
        let presses_clone = presses.clone();
        editor
            .duplicate_requested
            .connect(move |_| *presses_clone.lock() += 10);

        editor.request_remove();
        editor.request_duplicate();
        assert_eq!(*presses.lock(), 11);

        let target = PointerTarget {
            index: 3,
            anchor: Point::new(12.0, 0.0),
        };
        editor.set_pointer_target(target);
        assert_eq!(editor.pointer_target(), Some(target));
        assert_eq!(editor.segment(), Segment::Grid);
        assert_eq!(editor.segment().title(), "Grid");
    }
}
