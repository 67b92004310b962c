//! Task queue abstraction backing the worker pool.
//!
//! The pool only needs push-back, pop-front, and size inspection from its
//! queue, so those four operations are the whole interface. This lets an
//! alternate backing container (a ring buffer, an instrumented queue) be
//! substituted without touching any pool logic. `VecDeque` is the stock
//! implementation.

use std::collections::VecDeque;

use super::worker_pool::Task;

/// Minimal queue capability required by [`crate::core::WorkerPool`].
///
/// Dequeue order defines the pool's dispatch order, so implementations must
/// be FIFO: `pop_front` returns tasks in the order `push_back` inserted them.
pub trait TaskQueue: Send + 'static {
    /// Appends a task at the back of the queue.
    fn push_back(&mut self, task: Task);

    /// Removes and returns the task at the front of the queue, if any.
    fn pop_front(&mut self) -> Option<Task>;

    /// Number of queued tasks.
    fn len(&self) -> usize;

    /// Whether the queue holds no tasks.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TaskQueue for VecDeque<Task> {
    fn push_back(&mut self, task: Task) {
        VecDeque::push_back(self, task);
    }

    fn pop_front(&mut self) -> Option<Task> {
        VecDeque::pop_front(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }
}
