//! Single-result future over a pool-scheduled task.
//!
//! A [`Future`] schedules exactly one task on a [`WorkerPool`] at
//! construction and lets the caller block, or block with a timeout, until
//! the worker that executed the task has published its result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::condvar::Condvar;
use crate::mutex::Mutex;

use super::queue::TaskQueue;
use super::worker_pool::WorkerPool;
use super::PoolError;

/// A boxed task producing a value, as accepted by [`crate::core::MultiFuture`].
pub type FutureTask<T> = Box<dyn FnOnce() -> T + Send + 'static>;

/// Result slot shared between the consumer and the executing worker.
///
/// The slot is written at most once, by the worker thread that executes the
/// task, under the lock; `Some` doubles as the done flag, so a reader can
/// never observe completion with a partially written result.
struct Shared<T> {
    result: Mutex<Option<T>>,
    cond: Condvar,
}

/// A handle to the eventual result of one asynchronously scheduled task.
///
/// The task is submitted exactly once, at construction; construction does
/// not block. A `Future` drives a single execution episode and is discarded
/// after retrieval; it is not reusable for another task.
///
/// # Examples
///
/// ```
/// use taskwell::builders::PoolBuilder;
/// use taskwell::core::Future;
///
/// let pool = PoolBuilder::new().with_worker_count(2).build().unwrap();
/// let future = Future::new(&pool, || 6 * 7).unwrap();
/// assert_eq!(future.get(), 42);
/// // Retrieval is idempotent once complete.
/// assert_eq!(future.get(), 42);
/// ```
pub struct Future<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Send + 'static> Future<T> {
    /// Wraps `task` in a completion closure and submits it to `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Stopped`] if the pool rejects the submission;
    /// in that case the task never runs.
    pub fn new<Q, F>(pool: &WorkerPool<Q>, task: F) -> Result<Self, PoolError>
    where
        Q: TaskQueue,
        F: FnOnce() -> T + Send + 'static,
    {
        let shared = Arc::new(Shared {
            result: Mutex::new(None),
            cond: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        pool.submit(move || {
            // Execute outside the lock; publish under it.
            let value = task();
            *worker_shared.result.lock() = Some(value);
            worker_shared.cond.notify_all();
        })?;

        Ok(Self { shared })
    }
}

impl<T: Clone> Future<T> {
    /// Blocks until the task has completed, then returns its result.
    ///
    /// Calling `get` again after completion returns the same cached value
    /// without blocking.
    pub fn get(&self) -> T {
        let mut result = self.shared.result.lock();
        loop {
            if let Some(value) = result.as_ref() {
                return value.clone();
            }
            self.shared.cond.wait(&mut result);
        }
    }

    /// Bounded variant of [`Future::get`].
    ///
    /// Returns `(true, value)` if the task completed within `timeout`, and
    /// `(false, T::default())` otherwise. A timeout does not affect the
    /// in-flight task: it keeps running to completion and a later `get` can
    /// still observe its result.
    pub fn get_timeout(&self, timeout: Duration) -> (bool, T)
    where
        T: Default,
    {
        let deadline = Instant::now() + timeout;
        let mut result = self.shared.result.lock();
        loop {
            if let Some(value) = result.as_ref() {
                return (true, value.clone());
            }
            if self
                .shared
                .cond
                .wait_until(&mut result, deadline)
                .timed_out()
            {
                return match result.as_ref() {
                    Some(value) => (true, value.clone()),
                    None => (false, T::default()),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_future_returns_task_value() {
        let pool = WorkerPool::new(2, 0);
        pool.start().unwrap();

        let future = Future::new(&pool, || (1..=100).sum::<i32>()).unwrap();
        assert_eq!(future.get(), 5050);
        pool.stop();
    }

    #[test]
    fn test_future_against_stopped_pool_is_rejected() {
        let pool = WorkerPool::new(1, 0);
        pool.start().unwrap();
        pool.stop();

        assert!(matches!(
            Future::new(&pool, || 1),
            Err(PoolError::Stopped)
        ));
    }

    #[test]
    fn test_future_inline_pool_completes_immediately() {
        let pool = WorkerPool::new(0, 0);
        pool.start().unwrap();

        let future = Future::new(&pool, || "inline".to_owned()).unwrap();
        // The task already ran on this thread; get must not block.
        assert_eq!(future.get(), "inline");
        pool.stop();
    }

    #[test]
    fn test_get_timeout_leaves_task_running() {
        let pool = WorkerPool::new(1, 0);
        pool.start().unwrap();

        let future = Future::new(&pool, || {
            thread::sleep(Duration::from_millis(100));
            7
        })
        .unwrap();

        let (completed, value) = future.get_timeout(Duration::from_millis(10));
        assert!(!completed);
        assert_eq!(value, 0);

        // The task kept running; a longer wait observes the real result.
        let (completed, value) = future.get_timeout(Duration::from_secs(5));
        assert!(completed);
        assert_eq!(value, 7);
        pool.stop();
    }
}
