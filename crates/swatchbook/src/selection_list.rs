//! Ordered palette model with a current-selection cursor and size bounds.
//!
//! [`SelectionList<V>`] owns every mutation of the palette: insertion,
//! removal, duplication, replacement, and moving the cursor. Each mutation
//! leaves the list in a valid state and then reports what happened through
//! one of two signals:
//!
//! - `selection_changed` carries a [`SelectionChange`] whenever the cursor is
//!   assigned, including re-selection of the current index.
//! - `content_changed` carries a [`ContentChange`] describing an item-level
//!   edit.
//!
//! Signals are emitted after the internal lock is released, so connected
//! slots may read or mutate the list again.
//!
//! # Bounds
//!
//! Size bounds are derived when the list is constructed or [`reset`]:
//! the defaults are 1 and 64, caller-supplied values are raised to at least 1,
//! the minimum is lowered to the initial length if needed and the maximum is
//! raised to the initial length if needed. The bounds then stay fixed until
//! the next reset.
//!
//! # Example
//!
//! ```
//! use swatchbook::{ListConfig, SelectionList};
//!
//! let list = SelectionList::with_config(
//!     vec!["red", "green", "blue"],
//!     ListConfig::default().with_min_count(2),
//! );
//!
//! list.selection_changed.connect(|change| {
//!     println!("cursor {:?} -> {}", change.old, change.new);
//! });
//!
//! list.select(2);
//! assert_eq!(list.current_value(), Some("blue"));
//! assert!(list.remove(0).is_ok());
//! assert!(list.remove(0).is_err());
//! ```
//!
//! [`reset`]: SelectionList::reset

use std::fmt;

use parking_lot::RwLock;
use swatchbook_core::Signal;
use swatchbook_core::logging::targets;

use crate::error::CapacityError;

/// Minimum size used when the caller does not supply one.
pub const DEFAULT_MIN_COUNT: usize = 1;

/// Maximum size used when the caller does not supply one.
pub const DEFAULT_MAX_COUNT: usize = 64;

// ============================================================================
// Configuration
// ============================================================================

/// Initial cursor and requested bounds for a [`SelectionList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListConfig {
    /// Requested cursor position; clamped to the list.
    pub current_index: usize,
    /// Requested minimum size, or `None` for [`DEFAULT_MIN_COUNT`].
    pub min_count: Option<usize>,
    /// Requested maximum size, or `None` for [`DEFAULT_MAX_COUNT`].
    pub max_count: Option<usize>,
}

impl ListConfig {
    /// Set the requested cursor position using builder pattern.
    pub fn with_current_index(mut self, index: usize) -> Self {
        self.current_index = index;
        self
    }

    /// Set the requested minimum size using builder pattern.
    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = Some(min_count);
        self
    }

    /// Set the requested maximum size using builder pattern.
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }
}

/// Derive the effective `(min, max)` bounds for a list of `len` items.
fn effective_bounds(
    len: usize,
    min_count: Option<usize>,
    max_count: Option<usize>,
) -> (usize, usize) {
    let min = min_count.map_or(DEFAULT_MIN_COUNT, |min| min.max(1)).min(len);
    let max = max_count.map_or(DEFAULT_MAX_COUNT, |max| max.max(1)).max(len);
    (min.min(max), max)
}

// ============================================================================
// Notifications
// ============================================================================

/// What moved the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCause {
    /// An explicit [`SelectionList::select`] call.
    Selected,
    /// The first item was inserted into an empty list.
    Inserted,
    /// A removal left the cursor past the end, so it was clamped.
    Removed,
    /// The list was [`reset`](SelectionList::reset).
    Reset,
}

/// A cursor assignment published on `selection_changed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    /// Cursor before the assignment; `None` if the list was empty.
    pub old: Option<usize>,
    /// Cursor after the assignment.
    pub new: usize,
    /// What caused the assignment.
    pub cause: SelectionCause,
}

impl SelectionChange {
    /// Whether the cursor moved to a different index.
    pub fn moved(&self) -> bool {
        self.old != Some(self.new)
    }

    /// Whether this is an explicit selection of the already-current index.
    pub fn is_reselect(&self) -> bool {
        self.cause == SelectionCause::Selected && !self.moved()
    }
}

/// An item-level edit published on `content_changed`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentChange<V> {
    /// `value` was inserted at `index`.
    Inserted { index: usize, value: V },
    /// `value` was removed from `index`.
    Removed { index: usize, value: V },
    /// The item at `index` was overwritten.
    Replaced { index: usize, old: V, new: V },
    /// Every item was replaced by `items`.
    Reset { items: Vec<V> },
}

// ============================================================================
// SelectionList
// ============================================================================

struct ListState<V> {
    items: Vec<V>,
    /// Meaningful only while `items` is non-empty.
    current: usize,
    min_count: usize,
    max_count: usize,
}

impl<V> ListState<V> {
    fn new(items: Vec<V>, config: ListConfig) -> Self {
        let (min_count, max_count) =
            effective_bounds(items.len(), config.min_count, config.max_count);
        let current = config.current_index.min(items.len().saturating_sub(1));
        Self {
            items,
            current,
            min_count,
            max_count,
        }
    }

    fn cursor(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.current)
    }

    fn can_insert(&self) -> bool {
        self.items.len() < self.max_count
    }

    fn can_remove(&self) -> bool {
        self.items.len() > self.min_count
    }
}

/// An ordered, bounded collection with a current-selection cursor.
///
/// While the list is non-empty the cursor always addresses an item, and
/// `min_count <= len <= max_count` holds after construction and every
/// successful mutation. Failed mutations leave the list unchanged.
///
/// # Signals
///
/// - `selection_changed(SelectionChange)`: the cursor was assigned
/// - `content_changed(ContentChange<V>)`: items were inserted, removed,
///   replaced, or reset
pub struct SelectionList<V> {
    state: RwLock<ListState<V>>,

    /// Signal emitted whenever the cursor is assigned, even to its current value.
    pub selection_changed: Signal<SelectionChange>,

    /// Signal emitted after every change to the items.
    pub content_changed: Signal<ContentChange<V>>,
}

impl<V> SelectionList<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a list with the cursor at 0 and default bounds.
    pub fn new(items: Vec<V>) -> Self {
        Self::with_config(items, ListConfig::default())
    }

    /// Create a list with an explicit cursor and requested bounds.
    pub fn with_config(items: Vec<V>, config: ListConfig) -> Self {
        let state = ListState::new(items, config);
        tracing::debug!(
            target: targets::SELECTION,
            len = state.items.len(),
            current = state.current,
            min_count = state.min_count,
            max_count = state.max_count,
            "selection list created"
        );
        Self {
            state: RwLock::new(state),
            selection_changed: Signal::new(),
            content_changed: Signal::new(),
        }
    }

    /// Replace every item and recompute the bounds as on construction.
    ///
    /// Emits [`ContentChange::Reset`], then a [`SelectionChange`] with
    /// [`SelectionCause::Reset`] if the new list is non-empty.
    pub fn reset(&self, items: Vec<V>, config: ListConfig) {
        let (old, new, snapshot) = {
            let mut state = self.state.write();
            let old = state.cursor();
            *state = ListState::new(items, config);
            tracing::debug!(
                target: targets::SELECTION,
                len = state.items.len(),
                current = state.current,
                min_count = state.min_count,
                max_count = state.max_count,
                "selection list reset"
            );
            (old, state.cursor(), state.items.clone())
        };

        self.content_changed.emit(ContentChange::Reset { items: snapshot });
        if let Some(new) = new {
            self.selection_changed.emit(SelectionChange {
                old,
                new,
                cause: SelectionCause::Reset,
            });
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    /// Snapshot of the items.
    pub fn items(&self) -> Vec<V> {
        self.state.read().items.clone()
    }

    /// Get a copy of the item at `index`.
    pub fn get(&self, index: usize) -> Option<V> {
        self.state.read().items.get(index).cloned()
    }

    /// The cursor, or `None` if the list is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.state.read().cursor()
    }

    /// A copy of the selected item, or `None` if the list is empty.
    pub fn current_value(&self) -> Option<V> {
        let state = self.state.read();
        state.items.get(state.current).cloned()
    }

    /// The effective minimum size.
    pub fn min_count(&self) -> usize {
        self.state.read().min_count
    }

    /// The effective maximum size.
    pub fn max_count(&self) -> usize {
        self.state.read().max_count
    }

    /// Whether one more item fits under the maximum.
    pub fn can_insert(&self) -> bool {
        self.state.read().can_insert()
    }

    /// Whether one item can be removed without going under the minimum.
    pub fn can_remove(&self) -> bool {
        self.state.read().can_remove()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert `value` at `at`, clamped to the end of the list.
    ///
    /// The cursor keeps its numeric position. Inserting into an empty list
    /// moves the cursor to 0 and also emits a [`SelectionChange`].
    pub fn insert(&self, value: V, at: usize) -> Result<(), CapacityError> {
        let (index, was_empty) = {
            let mut state = self.state.write();
            if !state.can_insert() {
                tracing::debug!(
                    target: targets::SELECTION,
                    max_count = state.max_count,
                    "insert refused at maximum"
                );
                return Err(CapacityError::AtMaximum {
                    max_count: state.max_count,
                });
            }
            let index = at.min(state.items.len());
            let was_empty = state.items.is_empty();
            state.items.insert(index, value.clone());
            if was_empty {
                state.current = 0;
            }
            tracing::debug!(
                target: targets::SELECTION,
                index,
                len = state.items.len(),
                "item inserted"
            );
            (index, was_empty)
        };

        self.content_changed
            .emit(ContentChange::Inserted { index, value });
        if was_empty {
            self.selection_changed.emit(SelectionChange {
                old: None,
                new: 0,
                cause: SelectionCause::Inserted,
            });
        }
        Ok(())
    }

    /// Remove and return the item at `at`.
    ///
    /// Emits [`ContentChange::Removed`]; if the cursor was left past the end
    /// it is clamped to the last item and a [`SelectionChange`] follows.
    ///
    /// # Panics
    ///
    /// Panics if `at` is out of bounds.
    pub fn remove(&self, at: usize) -> Result<V, CapacityError> {
        let (value, clamped) = {
            let mut state = self.state.write();
            if !state.can_remove() {
                tracing::debug!(
                    target: targets::SELECTION,
                    min_count = state.min_count,
                    "remove refused at minimum"
                );
                return Err(CapacityError::AtMinimum {
                    min_count: state.min_count,
                });
            }
            let len = state.items.len();
            assert!(at < len, "remove index (is {at}) should be < len (is {len})");

            let value = state.items.remove(at);
            let old = state.current;
            let last = state.items.len().saturating_sub(1);
            let clamped = if old > last && !state.items.is_empty() {
                state.current = last;
                Some((old, last))
            } else {
                None
            };
            tracing::debug!(
                target: targets::SELECTION,
                index = at,
                len = state.items.len(),
                "item removed"
            );
            (value, clamped)
        };

        self.content_changed.emit(ContentChange::Removed {
            index: at,
            value: value.clone(),
        });
        if let Some((old, new)) = clamped {
            self.selection_changed.emit(SelectionChange {
                old: Some(old),
                new,
                cause: SelectionCause::Removed,
            });
        }
        Ok(value)
    }

    /// Insert `value` right after the cursor and return its index.
    pub fn duplicate(&self, value: V) -> Result<usize, CapacityError> {
        let at = self.current_index().map_or(0, |current| current + 1);
        self.insert(value, at)?;
        Ok(at)
    }

    /// Move the cursor to `index`, clamped to the list.
    ///
    /// Always notifies, even when the cursor does not move. Does nothing on an
    /// empty list.
    pub fn select(&self, index: usize) {
        let change = {
            let mut state = self.state.write();
            if state.items.is_empty() {
                return;
            }
            let old = state.current;
            state.current = index.min(state.items.len() - 1);
            SelectionChange {
                old: Some(old),
                new: state.current,
                cause: SelectionCause::Selected,
            }
        };

        tracing::trace!(
            target: targets::SELECTION,
            old = ?change.old,
            new = change.new,
            "selection assigned"
        );
        self.selection_changed.emit(change);
    }

    /// Overwrite the item at `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is out of bounds.
    pub fn replace(&self, at: usize, value: V) {
        let old = {
            let mut state = self.state.write();
            let len = state.items.len();
            let Some(slot) = state.items.get_mut(at) else {
                panic!("replace index (is {at}) should be < len (is {len})");
            };
            std::mem::replace(slot, value.clone())
        };

        tracing::trace!(target: targets::SELECTION, index = at, "item replaced");
        self.content_changed.emit(ContentChange::Replaced {
            index: at,
            old,
            new: value,
        });
    }
}

impl<V: fmt::Debug> fmt::Debug for SelectionList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("SelectionList")
            .field("items", &state.items)
            .field("current", &state.cursor())
            .field("min_count", &state.min_count)
            .field("max_count", &state.max_count)
            .finish()
    }
}

static_assertions::assert_impl_all!(SelectionList<u32>: Send, Sync);
