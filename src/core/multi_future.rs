//! Fan-out/fan-in future over N pool-scheduled tasks.
//!
//! A [`MultiFuture`] submits N independent tasks at construction, collects
//! their N results into an index-stable sequence, and lets the caller block
//! until all N have completed. Result order always matches input task
//! order, never completion order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::condvar::Condvar;
use crate::mutex::Mutex;

use super::future::FutureTask;
use super::queue::TaskQueue;
use super::worker_pool::WorkerPool;
use super::PoolError;

/// State shared between the consumer and the N executing workers.
///
/// Result slots are partitioned by index: slot `i` is written by exactly one
/// worker (the one executing task `i`), so writers never contend on the same
/// slot. The completion counter is an atomic, and the final done transition
/// is serialized through `done`'s lock so exactly one finisher broadcasts.
struct Shared<T> {
    slots: Vec<Mutex<Option<T>>>,
    finished: AtomicUsize,
    done: Mutex<bool>,
    cond: Condvar,
}

/// A handle to the eventual, index-ordered results of N asynchronously
/// scheduled, independently completing tasks.
///
/// Like [`crate::core::Future`], a `MultiFuture` drives a single execution
/// episode and is discarded after retrieval.
///
/// # Examples
///
/// ```
/// use taskwell::builders::PoolBuilder;
/// use taskwell::core::{FutureTask, MultiFuture};
///
/// let pool = PoolBuilder::new().with_worker_count(4).build().unwrap();
/// let tasks: Vec<FutureTask<usize>> = (0..8usize)
///     .map(|i| Box::new(move || i * 2) as FutureTask<usize>)
///     .collect();
/// let multi = MultiFuture::new(&pool, tasks).unwrap();
/// assert_eq!(multi.get(), vec![0, 2, 4, 6, 8, 10, 12, 14]);
/// ```
pub struct MultiFuture<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Send + 'static> MultiFuture<T> {
    /// Submits one completion closure per task, each pinned to its index.
    ///
    /// An empty task set is treated as immediately completed: `get` returns
    /// an empty sequence without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Stopped`] if the pool rejects a submission.
    /// Tasks submitted before the rejection may still run; their results
    /// are discarded with this handle.
    pub fn new<Q>(pool: &WorkerPool<Q>, tasks: Vec<FutureTask<T>>) -> Result<Self, PoolError>
    where
        Q: TaskQueue,
    {
        let total = tasks.len();
        let shared = Arc::new(Shared {
            slots: (0..total).map(|_| Mutex::new(None)).collect(),
            finished: AtomicUsize::new(0),
            done: Mutex::new(total == 0),
            cond: Condvar::new(),
        });

        for (index, task) in tasks.into_iter().enumerate() {
            let worker_shared = Arc::clone(&shared);
            pool.submit(move || {
                let value = task();
                *worker_shared.slots[index].lock() = Some(value);

                // Exactly one finisher observes the counter crossing the
                // threshold; that finisher owns the done transition.
                let finished = worker_shared.finished.fetch_add(1, Ordering::AcqRel) + 1;
                if finished == total {
                    let mut done = worker_shared.done.lock();
                    *done = true;
                    drop(done);
                    worker_shared.cond.notify_all();
                }
            })?;
        }

        Ok(Self { shared })
    }
}

impl<T: Clone> MultiFuture<T> {
    /// Blocks until every task has completed, then returns the results in
    /// input order.
    pub fn get(&self) -> Vec<T> {
        let mut done = self.shared.done.lock();
        while !*done {
            self.shared.cond.wait(&mut done);
        }
        drop(done);
        self.collect_results()
    }

    /// Bounded variant of [`MultiFuture::get`].
    ///
    /// Returns `(true, results)` once all tasks have completed within
    /// `timeout`, and `(false, vec![])` otherwise. A timeout does not
    /// affect the in-flight tasks.
    pub fn get_timeout(&self, timeout: Duration) -> (bool, Vec<T>) {
        let deadline = Instant::now() + timeout;
        let mut done = self.shared.done.lock();
        while !*done {
            if self.shared.cond.wait_until(&mut done, deadline).timed_out() && !*done {
                return (false, Vec::new());
            }
        }
        drop(done);
        (true, self.collect_results())
    }

    /// Copies every slot out in index order. Callable only after the done
    /// flag was observed under its lock, which orders all slot writes
    /// before the reads here.
    fn collect_results(&self) -> Vec<T> {
        self.shared
            .slots
            .iter()
            .map(|slot| {
                slot.lock()
                    .clone()
                    .expect("result slot filled before done broadcast")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn boxed_tasks<T, F>(count: usize, make: F) -> Vec<FutureTask<T>>
    where
        T: Send + 'static,
        F: Fn(usize) -> T + Clone + Send + 'static,
    {
        (0..count)
            .map(|i| {
                let make = make.clone();
                Box::new(move || make(i)) as FutureTask<T>
            })
            .collect()
    }

    #[test]
    fn test_results_are_index_ordered() {
        let pool = WorkerPool::new(4, 0);
        pool.start().unwrap();

        let multi = MultiFuture::new(&pool, boxed_tasks(10, |i| i * 100)).unwrap();
        assert_eq!(multi.get(), (0..10).map(|i| i * 100).collect::<Vec<_>>());
        pool.stop();
    }

    #[test]
    fn test_empty_task_set_is_immediately_done() {
        let pool = WorkerPool::new(2, 0);
        pool.start().unwrap();

        let multi: MultiFuture<i32> = MultiFuture::new(&pool, Vec::new()).unwrap();
        assert_eq!(multi.get(), Vec::<i32>::new());

        let (completed, results) = multi.get_timeout(Duration::from_millis(1));
        assert!(completed);
        assert!(results.is_empty());
        pool.stop();
    }

    #[test]
    fn test_timeout_returns_empty_then_full_set() {
        let pool = WorkerPool::new(4, 0);
        pool.start().unwrap();

        let multi = MultiFuture::new(
            &pool,
            boxed_tasks(4, |i| {
                thread::sleep(Duration::from_millis(100));
                i
            }),
        )
        .unwrap();

        let (completed, results) = multi.get_timeout(Duration::from_millis(10));
        assert!(!completed);
        assert!(results.is_empty());

        let (completed, results) = multi.get_timeout(Duration::from_secs(5));
        assert!(completed);
        assert_eq!(results, vec![0, 1, 2, 3]);
        pool.stop();
    }

    #[test]
    fn test_single_worker_still_completes_fan_out() {
        // All N closures funnel through one worker; completion must still
        // be signaled exactly once.
        let pool = WorkerPool::new(1, 0);
        pool.start().unwrap();

        let multi = MultiFuture::new(&pool, boxed_tasks(16, |i| i + 1)).unwrap();
        assert_eq!(multi.get(), (1..=16).collect::<Vec<_>>());
        pool.stop();
    }
}
