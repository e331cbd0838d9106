//! Deferred task queue ("next tick" work).
//!
//! Views post tasks that must run after the current layout pass settles,
//! such as repositioning the detail editor's pointer arrow. The host drains
//! the queue once per frame with [`SharedTaskQueue::process_all`].
//!
//! Tasks carry no ordering guarantee relative to other deferred work and
//! should guard on liveness (hold `Weak` references) since their owner may
//! be gone by the time they run.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::logging::targets;

type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

/// A deferred task queue shared between the host loop and the components
/// that post work to it.
///
/// Tasks run with the internal lock released, so a task may post further
/// tasks; those run on the following drain.
#[derive(Default)]
pub struct SharedTaskQueue {
    tasks: Mutex<VecDeque<BoxedTask>>,
}

impl SharedTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the next drain.
    pub fn post<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let pending = {
            let mut tasks = self.tasks.lock();
            tasks.push_back(Box::new(task));
            tasks.len()
        };
        tracing::trace!(target: targets::TASK, pending, "task posted");
    }

    /// Whether a drain would run anything. Hosts use this to decide whether
    /// another frame is needed.
    pub fn has_pending(&self) -> bool {
        !self.tasks.lock().is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run every task that was pending when the call started.
    ///
    /// Returns the number of tasks run.
    pub fn process_all(&self) -> usize {
        let batch = std::mem::take(&mut *self.tasks.lock());
        let count = batch.len();
        if count > 0 {
            tracing::trace!(target: targets::TASK, count, "draining tasks");
        }
        for task in batch {
            task();
        }
        count
    }
}

impl std::fmt::Debug for SharedTaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTaskQueue")
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_post_and_process_all() {
        let queue = SharedTaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let log = log.clone();
            queue.post(move || log.lock().push(n));
        }

        assert_eq!(queue.pending_count(), 3);
        assert_eq!(queue.process_all(), 3);
        assert!(!queue.has_pending());
        assert_eq!(*log.lock(), vec![0, 1, 2]);
        assert_eq!(queue.process_all(), 0);
    }

    #[test]
    fn test_task_can_post() {
        let queue = Arc::new(SharedTaskQueue::new());
        let ran = Arc::new(Mutex::new(Vec::new()));

        let queue_clone = queue.clone();
        let ran_clone = ran.clone();
        queue.post(move || {
            ran_clone.lock().push("first");
            let ran_inner = ran_clone.clone();
            queue_clone.post(move || ran_inner.lock().push("second"));
        });

        // Work posted during a drain waits for the next one.
        assert_eq!(queue.process_all(), 1);
        assert_eq!(*ran.lock(), vec!["first"]);
        assert_eq!(queue.process_all(), 1);
        assert_eq!(*ran.lock(), vec!["first", "second"]);
    }
}
