//! Observable values publishing `old -> new` transitions.
//!
//! [`ChangeNotifier<T>`] combines a [`Property<T>`] with a [`Signal`] carrying
//! a [`Change<T>`]. Every assignment through [`ChangeNotifier::set`] notifies
//! subscribers, even when the new value equals the old one; callers that need
//! "only on change" semantics compare `old` and `new` themselves (see
//! [`Change::is_unchanged`]).
//!
//! # Example
//!
//! ```
//! use swatchbook_core::ChangeNotifier;
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//!
//! let index = ChangeNotifier::new(0usize);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let seen_clone = seen.clone();
//! let subscription = index.subscribe(move |change| {
//!     seen_clone.lock().push((change.old, change.new));
//! });
//!
//! index.set(2);
//! index.set(2);
//! assert_eq!(*seen.lock(), vec![(0, 2), (2, 2)]);
//!
//! drop(subscription);
//! index.set(5);
//! assert_eq!(seen.lock().len(), 2);
//! ```

use std::fmt;

use crate::logging::targets;
use crate::property::Property;
use crate::signal::{ConnectionGuard, ConnectionId, Signal};

/// A transition published by a [`ChangeNotifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change<T> {
    /// The value before the assignment.
    pub old: T,
    /// The value after the assignment.
    pub new: T,
}

impl<T: PartialEq> Change<T> {
    /// Whether the assignment stored a value equal to the previous one.
    pub fn is_unchanged(&self) -> bool {
        self.old == self.new
    }
}

/// An owned value plus an ordered set of subscribers.
///
/// Subscribers are invoked synchronously on every [`set`](Self::set), in
/// subscription order, after the new value has been stored. A subscriber may
/// read the notifier (or assign it again) from inside its callback.
pub struct ChangeNotifier<T> {
    value: Property<T>,
    changed: Signal<Change<T>>,
}

impl<T> ChangeNotifier<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a notifier holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: Property::new(value),
            changed: Signal::new(),
        }
    }

    /// Get a copy of the current value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Access the current value without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.value.with(f)
    }

    /// Assign a value and notify every subscriber. Returns the previous value.
    pub fn set(&self, value: T) -> T {
        let old = self.value.swap(value.clone());
        tracing::trace!(
            target: targets::PROPERTY,
            subscribers = self.changed.connection_count(),
            "change notifier assigned"
        );
        self.changed.emit(Change {
            old: old.clone(),
            new: value,
        });
        old
    }

    /// Assign a value without notifying anyone.
    ///
    /// Intended for initialization, before subscribers care about the value.
    pub fn set_silent(&self, value: T) {
        self.value.set_silent(value);
    }

    /// Subscribe to changes; the returned guard unsubscribes when dropped.
    pub fn subscribe<F>(&self, callback: F) -> ConnectionGuard
    where
        F: Fn(&Change<T>) + Send + Sync + 'static,
    {
        self.changed.connect_scoped(callback)
    }

    /// Subscribe for the notifier's whole lifetime.
    pub fn connect<F>(&self, callback: F) -> ConnectionId
    where
        F: Fn(&Change<T>) + Send + Sync + 'static,
    {
        self.changed.connect(callback)
    }

    /// Remove a subscription made with [`connect`](Self::connect).
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.changed.connection_count()
    }

    /// The underlying change signal.
    pub fn changed(&self) -> &Signal<Change<T>> {
        &self.changed
    }
}

impl<T> Default for ChangeNotifier<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for ChangeNotifier<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_notifies_on_every_assignment() {
        let notifier = ChangeNotifier::new(1);
        let changes = Arc::new(Mutex::new(Vec::new()));

        let changes_clone = changes.clone();
        notifier.connect(move |change| changes_clone.lock().push(*change));

        assert_eq!(notifier.set(1), 1);
        assert_eq!(notifier.set(3), 1);

        let changes = changes.lock();
        assert_eq!(changes.len(), 2);
        assert!(changes[0].is_unchanged());
        assert_eq!(changes[1], Change { old: 1, new: 3 });
    }

    #[test]
    fn test_subscribers_called_in_order() {
        let notifier = ChangeNotifier::new(0);
        let order = Arc::new(Mutex::new(Vec::new()));

        let guards: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|name| {
                let order = order.clone();
                notifier.subscribe(move |_| order.lock().push(name))
            })
            .collect();

        notifier.set(1);
        assert_eq!(*order.lock(), vec!["a", "b", "c"]);
        drop(guards);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_value_visible_inside_callback() {
        let notifier = Arc::new(ChangeNotifier::new(String::from("old")));
        let observed = Arc::new(Mutex::new(String::new()));

        let weak = Arc::downgrade(&notifier);
        let observed_clone = observed.clone();
        notifier.connect(move |_| {
            if let Some(notifier) = weak.upgrade() {
                *observed_clone.lock() = notifier.get();
            }
        });

        notifier.set("new".to_string());
        assert_eq!(*observed.lock(), "new");
    }

    #[test]
    fn test_set_silent_does_not_notify() {
        let notifier = ChangeNotifier::new(0u8);
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        let _guard = notifier.subscribe(move |_| *count_clone.lock() += 1);

        notifier.set_silent(9);
        assert_eq!(notifier.get(), 9);
        assert_eq!(*count.lock(), 0);
    }
}
