//! Core systems for Swatchbook.
//!
//! This crate provides the foundational reactive pieces shared by the palette
//! model and its views:
//!
//! - **Signal/Slot System**: Type-safe, ordered, synchronous notifications
//! - **Property System**: Value cells with change detection
//! - **Change Notifier**: Observable values publishing `old -> new` pairs
//! - **Task Queue**: Deferred "next tick" work drained by the host loop
//! - **Logging**: `tracing` targets for every subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use swatchbook_core::Signal;
//!
//! let remove_requested = Signal::<()>::new();
//! let conn_id = remove_requested.connect(|_| println!("remove!"));
//! remove_requested.emit(());
//! remove_requested.disconnect(conn_id);
//! ```
//!
//! # Change Notifier Example
//!
//! ```
//! use swatchbook_core::ChangeNotifier;
//!
//! let current = ChangeNotifier::new(0usize);
//! let _guard = current.subscribe(|change| {
//!     if change.is_unchanged() {
//!         println!("re-selected {}", change.new);
//!     } else {
//!         println!("moved {} -> {}", change.old, change.new);
//!     }
//! });
//! current.set(1);
//! current.set(1);
//! ```
//!
//! # Deferred Task Example
//!
//! ```
//! use swatchbook_core::SharedTaskQueue;
//!
//! let queue = SharedTaskQueue::new();
//! queue.post(|| println!("runs after layout"));
//! // ... the host finishes its layout pass ...
//! assert_eq!(queue.process_all(), 1);
//! ```

pub mod logging;
pub mod notifier;
pub mod property;
pub mod signal;
mod task;

pub use logging::PerfSpan;
pub use notifier::{Change, ChangeNotifier};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use task::SharedTaskQueue;
