//! Headless horizontal swatch strip.
//!
//! [`SwatchStrip<E>`] keeps one [`SwatchElement`] per palette entry, tracks
//! which one is highlighted and how far the strip is scrolled, and answers
//! geometry questions (where is swatch `i`, which swatch is under a point,
//! where should the editor's pointer arrow aim). Rendering is left to the
//! host; the strip only reports taps and scrolls through its signals.
//!
//! # Example
//!
//! ```
//! use swatchbook::{ColorSwatch, SwatchStrip, SwatchStripView};
//! use swatchbook_color::{Color, Point};
//!
//! let strip = SwatchStrip::<ColorSwatch>::new();
//! strip.reset_swatches(&[Color::RED, Color::GREEN, Color::BLUE]);
//! strip.set_highlighted_index(Some(1));
//!
//! strip.tapped.connect(|&index| println!("tapped swatch {index}"));
//! let hit = strip.swatch_at_point(Point::new(60.0, 20.0));
//! assert_eq!(hit, Some(1));
//! ```

use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use swatchbook_color::{Color, Point, Rect};
use swatchbook_core::logging::targets;
use swatchbook_core::{ChangeNotifier, PerfSpan, Property, Signal};

// ============================================================================
// Constants
// ============================================================================

/// Default swatch edge length.
const DEFAULT_SWATCH_SIZE: f32 = 44.0;

/// Default gap between swatches.
const DEFAULT_SWATCH_GAP: f32 = 4.0;

/// Default padding around the row of swatches.
const DEFAULT_PADDING: f32 = 8.0;

// ============================================================================
// Swatch elements
// ============================================================================

/// A view able to display one palette value.
pub trait SwatchElement: Send + Sync + 'static {
    /// The palette value this element displays.
    type Value: Clone + Send + Sync + 'static;

    /// Build an element showing `value`.
    fn from_value(value: &Self::Value) -> Self;

    /// The value currently shown.
    fn value(&self) -> Self::Value;

    /// Redraw with a new value.
    fn refresh(&mut self, value: &Self::Value);

    /// Toggle the emphasized state.
    fn set_highlighted(&mut self, highlighted: bool);

    fn is_highlighted(&self) -> bool;
}

/// A swatch showing a single [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSwatch {
    color: Color,
    highlighted: bool,
}

impl ColorSwatch {
    pub fn color(&self) -> Color {
        self.color
    }
}

impl SwatchElement for ColorSwatch {
    type Value = Color;

    fn from_value(value: &Color) -> Self {
        Self {
            color: *value,
            highlighted: false,
        }
    }

    fn value(&self) -> Color {
        self.color
    }

    fn refresh(&mut self, value: &Color) {
        self.color = *value;
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

// ============================================================================
// Pointer target
// ============================================================================

/// Where the detail editor's pointer arrow should aim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTarget {
    /// The swatch being pointed at.
    pub index: usize,
    /// Top-center of that swatch in strip coordinates, after scrolling.
    pub anchor: Point,
}

// ============================================================================
// Strip view interface
// ============================================================================

/// The strip operations a [`SyncController`](crate::SyncController) relies on.
pub trait SwatchStripView<V>: Send + Sync {
    /// Signal emitted with the index of a tapped swatch.
    fn tapped(&self) -> &Signal<usize>;

    /// Signal emitted with the new scroll offset.
    fn scrolled(&self) -> &Signal<f32>;

    /// Rebuild every swatch from `values`.
    fn reset_swatches(&self, values: &[V]);

    /// Insert a swatch for `value` at `index`.
    fn insert_swatch(&self, index: usize, value: &V);

    /// Remove the swatch at `index`.
    fn remove_swatch(&self, index: usize);

    /// Redraw the swatch at `index` with `value`.
    fn refresh_swatch(&self, index: usize, value: &V);

    fn highlighted_index(&self) -> Option<usize>;

    /// Emphasize exactly the swatch at `index`, or none.
    fn set_highlighted_index(&self, index: Option<usize>);

    /// The pointer target for the swatch at `index`, if it exists.
    fn pointer_target(&self, index: usize) -> Option<PointerTarget>;
}

// ============================================================================
// Layout
// ============================================================================

/// Swatch geometry for a [`SwatchStrip`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripLayout {
    /// Edge length of each square swatch.
    pub swatch_size: f32,
    /// Horizontal gap between neighboring swatches.
    pub gap: f32,
    /// Padding on every side of the row.
    pub padding: f32,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            swatch_size: DEFAULT_SWATCH_SIZE,
            gap: DEFAULT_SWATCH_GAP,
            padding: DEFAULT_PADDING,
        }
    }
}

impl StripLayout {
    /// Total width needed to show `count` swatches without scrolling.
    pub fn content_width(&self, count: usize) -> f32 {
        if count == 0 {
            return self.padding * 2.0;
        }
        self.padding * 2.0 + count as f32 * self.swatch_size + (count - 1) as f32 * self.gap
    }

    /// Height of the strip.
    pub fn height(&self) -> f32 {
        self.padding * 2.0 + self.swatch_size
    }

    /// Unscrolled rectangle of the swatch at `index`.
    fn swatch_rect(&self, index: usize) -> Rect {
        let x = self.padding + index as f32 * (self.swatch_size + self.gap);
        Rect::new(x, self.padding, self.swatch_size, self.swatch_size)
    }
}

// ============================================================================
// SwatchStrip
// ============================================================================

struct StripState<E> {
    swatches: Vec<E>,
    highlighted: Option<usize>,
}

impl<E: SwatchElement> StripState<E> {
    /// Re-apply the highlight flag to every swatch, dropping an index that no
    /// longer exists.
    fn apply_highlight(&mut self) {
        if self.highlighted.is_some_and(|index| index >= self.swatches.len()) {
            self.highlighted = None;
        }
        for (index, swatch) in self.swatches.iter_mut().enumerate() {
            swatch.set_highlighted(Some(index) == self.highlighted);
        }
    }
}

/// A horizontally scrolling row of swatches mirroring a palette.
///
/// # Signals
///
/// - `tapped(usize)`: a swatch was tapped
/// - `scrolled(f32)`: the scroll offset changed
pub struct SwatchStrip<E: SwatchElement> {
    state: RwLock<StripState<E>>,
    layout: StripLayout,
    viewport_width: Property<f32>,
    scroll_offset: ChangeNotifier<f32>,

    /// Signal emitted when a swatch is tapped.
    pub tapped: Signal<usize>,

    /// Signal emitted after the strip scrolls.
    pub scrolled: Signal<f32>,
}

impl<E: SwatchElement> SwatchStrip<E> {
    /// Create an empty strip with the default layout.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StripState {
                swatches: Vec::new(),
                highlighted: None,
            }),
            layout: StripLayout::default(),
            viewport_width: Property::new(f32::INFINITY),
            scroll_offset: ChangeNotifier::new(0.0),
            tapped: Signal::new(),
            scrolled: Signal::new(),
        }
    }

    /// Set the swatch geometry using builder pattern.
    pub fn with_layout(mut self, layout: StripLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the visible width using builder pattern.
    pub fn with_viewport_width(self, width: f32) -> Self {
        self.viewport_width.set_silent(width.max(0.0));
        self
    }

    pub fn layout(&self) -> StripLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.state.read().swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().swatches.is_empty()
    }

    /// The values currently shown, in order.
    pub fn values(&self) -> Vec<E::Value> {
        self.state.read().swatches.iter().map(E::value).collect()
    }

    /// Access the swatches without cloning them.
    pub fn with_swatches<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[E]) -> R,
    {
        f(&self.state.read().swatches)
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// The scroll offset notifier.
    pub fn scroll_offset(&self) -> &ChangeNotifier<f32> {
        &self.scroll_offset
    }

    /// Update the visible width and re-clamp the scroll offset.
    pub fn set_viewport_width(&self, width: f32) {
        self.viewport_width.set_silent(width.max(0.0));
        let offset = self.scroll_offset.get();
        let clamped = offset.min(self.max_scroll_offset());
        if clamped != offset {
            self.scroll_to(clamped);
        }
    }

    /// The largest reachable scroll offset.
    pub fn max_scroll_offset(&self) -> f32 {
        let content = self.layout.content_width(self.len());
        (content - self.viewport_width.get()).max(0.0)
    }

    /// Scroll to `offset`, clamped to the scrollable range.
    pub fn scroll_to(&self, offset: f32) {
        let offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, self.max_scroll_offset())
        };
        self.scroll_offset.set(offset);
        tracing::trace!(target: targets::STRIP, offset, "strip scrolled");
        self.scrolled.emit(offset);
    }

    /// Scroll by `delta` points.
    pub fn scroll_by(&self, delta: f32) {
        self.scroll_to(self.scroll_offset.get() + delta);
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Rectangle of the swatch at `index` in strip coordinates, after scrolling.
    pub fn swatch_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.len() {
            return None;
        }
        Some(
            self.layout
                .swatch_rect(index)
                .translate(-self.scroll_offset.get(), 0.0),
        )
    }

    /// Center of the swatch at `index`, after scrolling.
    pub fn swatch_center(&self, index: usize) -> Option<Point> {
        self.swatch_rect(index).map(|rect| rect.center())
    }

    /// Find which swatch (if any) contains the given point.
    pub fn swatch_at_point(&self, point: Point) -> Option<usize> {
        (0..self.len()).find(|&index| {
            self.swatch_rect(index)
                .is_some_and(|rect| rect.contains(point))
        })
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Report a tap on the swatch at `index`.
    pub fn tap(&self, index: usize) {
        if index < self.len() {
            tracing::trace!(target: targets::STRIP, index, "swatch tapped");
            self.tapped.emit(index);
        }
    }

    /// Report a tap at `point`; returns the tapped index, if any.
    pub fn tap_at(&self, point: Point) -> Option<usize> {
        let index = self.swatch_at_point(point)?;
        self.tap(index);
        Some(index)
    }
}

impl<E: SwatchElement> Default for SwatchStrip<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SwatchElement> SwatchStripView<E::Value> for SwatchStrip<E> {
    fn tapped(&self) -> &Signal<usize> {
        &self.tapped
    }

    fn scrolled(&self) -> &Signal<f32> {
        &self.scrolled
    }

    fn reset_swatches(&self, values: &[E::Value]) {
        let _span = PerfSpan::new("reset_swatches");
        {
            let mut state = self.state.write();
            state.swatches = values.iter().map(E::from_value).collect();
            state.apply_highlight();
        }
        tracing::debug!(target: targets::STRIP, count = values.len(), "swatches rebuilt");
        self.set_viewport_width(self.viewport_width.get());
    }

    fn insert_swatch(&self, index: usize, value: &E::Value) {
        let mut state = self.state.write();
        let index = index.min(state.swatches.len());
        state.swatches.insert(index, E::from_value(value));
        state.apply_highlight();
    }

    fn remove_swatch(&self, index: usize) {
        {
            let mut state = self.state.write();
            if index >= state.swatches.len() {
                tracing::warn!(target: targets::STRIP, index, "remove of missing swatch ignored");
                return;
            }
            state.swatches.remove(index);
            state.apply_highlight();
        }
        self.set_viewport_width(self.viewport_width.get());
    }

    fn refresh_swatch(&self, index: usize, value: &E::Value) {
        if let Some(swatch) = self.state.write().swatches.get_mut(index) {
            swatch.refresh(value);
        }
    }

    fn highlighted_index(&self) -> Option<usize> {
        self.state.read().highlighted
    }

    fn set_highlighted_index(&self, index: Option<usize>) {
        let mut state = self.state.write();
        state.highlighted = index;
        state.apply_highlight();
    }

    fn pointer_target(&self, index: usize) -> Option<PointerTarget> {
        let rect = self.swatch_rect(index)?;
        Some(PointerTarget {
            index,
            anchor: Point::new(rect.center().x, rect.top()),
        })
    }
}

impl<E: SwatchElement> fmt::Debug for SwatchStrip<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwatchStrip")
            .field("len", &self.len())
            .field("highlighted", &self.highlighted_index())
            .field("scroll_offset", &self.scroll_offset.get())
            .field("layout", &self.layout)
            .finish()
    }
}

static_assertions::assert_impl_all!(SwatchStrip<ColorSwatch>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn strip_with(colors: &[Color]) -> SwatchStrip<ColorSwatch> {
        let strip = SwatchStrip::new();
        strip.reset_swatches(colors);
        strip
    }

    fn highlighted_flags(strip: &SwatchStrip<ColorSwatch>) -> Vec<bool> {
        strip.with_swatches(|swatches| swatches.iter().map(|s| s.is_highlighted()).collect())
    }

    #[test]
    fn test_mirroring_operations() {
        let strip = strip_with(&[Color::RED, Color::GREEN]);
        strip.insert_swatch(1, &Color::BLUE);
        strip.refresh_swatch(0, &Color::BLACK);
        assert_eq!(strip.values(), vec![Color::BLACK, Color::BLUE, Color::GREEN]);

        strip.remove_swatch(1);
        assert_eq!(strip.values(), vec![Color::BLACK, Color::GREEN]);
    }

    #[test]
    fn test_exactly_one_swatch_highlighted() {
        let strip = strip_with(&[Color::RED, Color::GREEN, Color::BLUE]);
        strip.set_highlighted_index(Some(2));
        assert_eq!(highlighted_flags(&strip), vec![false, false, true]);

        strip.set_highlighted_index(Some(0));
        assert_eq!(highlighted_flags(&strip), vec![true, false, false]);

        strip.set_highlighted_index(None);
        assert_eq!(highlighted_flags(&strip), vec![false, false, false]);
    }

    #[test]
    fn test_highlight_follows_numeric_index() {
        let strip = strip_with(&[Color::RED, Color::GREEN, Color::BLUE]);
        strip.set_highlighted_index(Some(2));

        strip.remove_swatch(2);
        assert_eq!(strip.highlighted_index(), None);

        strip.set_highlighted_index(Some(1));
        strip.insert_swatch(0, &Color::YELLOW);
        assert_eq!(strip.highlighted_index(), Some(1));
        assert_eq!(highlighted_flags(&strip), vec![false, true, false]);
    }

    #[test]
    fn test_geometry() {
        let strip = strip_with(&[Color::RED, Color::GREEN, Color::BLUE]);
        let layout = strip.layout();

        let rect = strip.swatch_rect(1).unwrap();
        assert_eq!(rect.left(), layout.padding + layout.swatch_size + layout.gap);
        assert_eq!(rect.top(), layout.padding);
        assert!(strip.swatch_rect(3).is_none());

        // Gaps between swatches do not hit anything.
        let gap_x = layout.padding + layout.swatch_size + layout.gap / 2.0;
        assert_eq!(strip.swatch_at_point(Point::new(gap_x, 20.0)), None);
        assert_eq!(strip.swatch_at_point(strip.swatch_center(2).unwrap()), Some(2));
    }

    #[test]
    fn test_scrolling_is_clamped_and_moves_geometry() {
        let layout = StripLayout {
            swatch_size: 40.0,
            gap: 0.0,
            padding: 0.0,
        };
        let strip = SwatchStrip::<ColorSwatch>::new()
            .with_layout(layout)
            .with_viewport_width(100.0);
        strip.reset_swatches(&[Color::BLACK; 5]);
        assert_eq!(strip.max_scroll_offset(), 100.0);

        let offsets = Arc::new(Mutex::new(Vec::new()));
        let offsets_clone = offsets.clone();
        strip.scrolled.connect(move |&offset| offsets_clone.lock().push(offset));

        strip.scroll_to(60.0);
        strip.scroll_by(500.0);
        strip.scroll_to(-3.0);
        assert_eq!(*offsets.lock(), vec![60.0, 100.0, 0.0]);

        strip.scroll_to(60.0);
        assert_eq!(strip.swatch_rect(2).unwrap().left(), 20.0);
        let target = strip.pointer_target(2).unwrap();
        assert_eq!(target.anchor, Point::new(40.0, 0.0));
    }

    #[test]
    fn test_removing_swatches_reclamps_scroll() {
        let layout = StripLayout {
            swatch_size: 40.0,
            gap: 0.0,
            padding: 0.0,
        };
        let strip = SwatchStrip::<ColorSwatch>::new()
            .with_layout(layout)
            .with_viewport_width(100.0);
        strip.reset_swatches(&[Color::BLACK; 5]);
        strip.scroll_to(100.0);

        strip.remove_swatch(4);
        assert_eq!(strip.scroll_offset().get(), 60.0);
    }

    #[test]
    fn test_tap_reports_index() {
        let strip = strip_with(&[Color::RED, Color::GREEN]);
        let taps = Arc::new(Mutex::new(Vec::new()));
        let taps_clone = taps.clone();
        strip.tapped.connect(move |&index| taps_clone.lock().push(index));

        strip.tap(1);
        strip.tap(7);
        let center = strip.swatch_center(0).unwrap();
        assert_eq!(strip.tap_at(center), Some(0));
        assert_eq!(strip.tap_at(Point::new(-5.0, -5.0)), None);

        assert_eq!(*taps.lock(), vec![1, 0]);
    }
}
