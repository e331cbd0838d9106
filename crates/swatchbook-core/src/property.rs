//! Property cells for Swatchbook.
//!
//! A [`Property<T>`] is the data half of a reactive value: it stores the value
//! behind a lock and reports whether an assignment changed it. Pair it with a
//! [`Signal`](crate::Signal) (or use [`ChangeNotifier`](crate::ChangeNotifier))
//! to publish the change.
//!
//! # Example
//!
//! ```
//! use swatchbook_core::{Property, Signal};
//!
//! struct Visibility {
//!     visible: Property<bool>,
//!     visible_changed: Signal<bool>,
//! }
//!
//! impl Visibility {
//!     fn set_visible(&self, visible: bool) {
//!         if self.visible.set(visible) {
//!             self.visible_changed.emit(visible);
//!         }
//!     }
//! }
//!
//! let v = Visibility { visible: Property::new(false), visible_changed: Signal::new() };
//! v.set_visible(true);
//! assert!(v.visible.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A property that tracks changes.
///
/// `Property<T>` wraps a value and provides change detection. When `set()` is
/// called, it compares the new value with the current one and returns whether
/// the value actually changed.
///
/// # Thread Safety
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// when `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    ///
    /// This is useful during initialization or batch updates where you
    /// want to defer notifications.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }

    /// Store a new value unconditionally, returning the previous one.
    pub fn swap(&self, value: T) -> T {
        std::mem::replace(&mut *self.value.write(), value)
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// If the new value equals the current one, nothing is written and
    /// `false` is returned. The caller should emit the associated
    /// notification signal when this returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
