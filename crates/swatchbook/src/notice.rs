//! Transient user-facing notices.
//!
//! The controller reports refused palette edits through a [`NoticePresenter`].
//! [`Toast`] is the headless model of the default presenter: a single message
//! that expires on its own after a fixed duration or when tapped.

use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use swatchbook_core::Signal;
use swatchbook_core::logging::targets;

/// How long a toast stays up unless dismissed.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(2);

/// Something that can briefly show a message to the user.
pub trait NoticePresenter: Send + Sync {
    /// Show `message`. Fire-and-forget.
    fn show(&self, message: &str);

    /// Whether a notice is currently on screen.
    fn is_active(&self) -> bool;
}

#[derive(Debug, Clone)]
struct ActiveToast {
    message: String,
    shown_at: Instant,
}

/// A toast that shows one message at a time.
///
/// While a message is up, further [`show`](NoticePresenter::show) calls are
/// dropped. The message goes away once its duration has elapsed (checked by
/// [`tick`](Self::tick) or any query) or on [`dismiss`](Self::dismiss).
///
/// # Signals
///
/// - `shown(String)`: a message was put up
/// - `dismissed()`: the message went away
pub struct Toast {
    duration: Duration,
    active: Mutex<Option<ActiveToast>>,

    /// Signal emitted when a message is shown.
    pub shown: Signal<String>,

    /// Signal emitted when the message expires or is dismissed.
    pub dismissed: Signal<()>,
}

impl Toast {
    /// Create a toast with the default two-second duration.
    pub fn new() -> Self {
        Self {
            duration: DEFAULT_TOAST_DURATION,
            active: Mutex::new(None),
            shown: Signal::new(),
            dismissed: Signal::new(),
        }
    }

    /// Set how long messages stay up using builder pattern.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The message on screen, if any.
    pub fn message(&self) -> Option<String> {
        self.message_at(Instant::now())
    }

    /// The message that would be on screen at `now`.
    pub fn message_at(&self, now: Instant) -> Option<String> {
        self.tick(now);
        self.active.lock().as_ref().map(|toast| toast.message.clone())
    }

    /// Whether a message is still up at `now`.
    pub fn is_active_at(&self, now: Instant) -> bool {
        self.tick(now);
        self.active.lock().is_some()
    }

    /// Put up `message` at `now` unless another message is still up.
    ///
    /// Returns whether the message was shown.
    pub fn show_at(&self, message: &str, now: Instant) -> bool {
        self.tick(now);
        {
            let mut active = self.active.lock();
            if let Some(current) = active.as_ref() {
                tracing::debug!(
                    target: targets::NOTICE,
                    current = %current.message,
                    dropped = message,
                    "toast already showing"
                );
                return false;
            }
            *active = Some(ActiveToast {
                message: message.to_string(),
                shown_at: now,
            });
        }
        tracing::info!(target: targets::NOTICE, message, "toast shown");
        self.shown.emit(message.to_string());
        true
    }

    /// Expire the message if its duration has elapsed by `now`.
    pub fn tick(&self, now: Instant) {
        let expired = {
            let mut active = self.active.lock();
            let expired = active.as_ref().is_some_and(|toast| {
                now.saturating_duration_since(toast.shown_at) >= self.duration
            });
            if expired {
                *active = None;
            }
            expired
        };
        if expired {
            tracing::trace!(target: targets::NOTICE, "toast expired");
            self.dismissed.emit(());
        }
    }

    /// Take the message down immediately (the user tapped it).
    pub fn dismiss(&self) {
        if self.active.lock().take().is_some() {
            tracing::trace!(target: targets::NOTICE, "toast dismissed");
            self.dismissed.emit(());
        }
    }
}

impl Default for Toast {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticePresenter for Toast {
    fn show(&self, message: &str) {
        self.show_at(message, Instant::now());
    }

    fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("duration", &self.duration)
            .field("active", &*self.active.lock())
            .finish()
    }
}

static_assertions::assert_impl_all!(Toast: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_one_message_at_a_time() {
        let toast = Toast::new();
        let now = Instant::now();

        assert!(toast.show_at("first", now));
        assert!(!toast.show_at("second", now + Duration::from_millis(500)));
        assert_eq!(
            toast.message_at(now + Duration::from_millis(600)),
            Some("first".to_string())
        );
    }

    #[test]
    fn test_expiry() {
        let toast = Toast::new().with_duration(Duration::from_secs(2));
        let now = Instant::now();
        let dismissals = Arc::new(Mutex::new(0));
        let dismissals_clone = dismissals.clone();
        toast.dismissed.connect(move |_| *dismissals_clone.lock() += 1);

        toast.show_at("hello", now);
        assert!(toast.is_active_at(now + Duration::from_millis(1999)));
        assert!(!toast.is_active_at(now + Duration::from_secs(2)));
        assert_eq!(*dismissals.lock(), 1);

        assert!(toast.show_at("again", now + Duration::from_secs(3)));
    }

    #[test]
    fn test_dismiss() {
        let toast = Toast::new();
        let shown = Arc::new(Mutex::new(Vec::new()));
        let shown_clone = shown.clone();
        toast
            .shown
            .connect(move |message| shown_clone.lock().push(message.clone()));

        toast.show("cannot remove");
        assert!(toast.is_active());
        toast.dismiss();
        assert!(!toast.is_active());
        toast.show("cannot add");

        assert_eq!(*shown.lock(), vec!["cannot remove", "cannot add"]);
    }
}
