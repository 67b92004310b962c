//! Worker pool implementation with dedicated OS threads and a bounded queue.
//!
//! This module provides a `WorkerPool` that feeds a fixed set of worker
//! threads from a FIFO task queue. The queue may be bounded, in which case
//! submitters block while it is full (backpressure), or unbounded.
//!
//! # Design Principles
//!
//! - **No polling**: workers block on a condition variable while the queue is
//!   empty; submitters block on a second condition variable while it is full
//! - **Tasks run outside the lock**: a worker pops under the queue lock and
//!   executes with the lock released, so execution never stalls enqueue or
//!   dequeue on other threads
//! - **Drain-then-stop shutdown**: `stop` wakes every blocked worker and
//!   submitter, discards still-queued tasks unexecuted, and joins every
//!   worker thread before returning
//!
//! # Example
//!
//! ```
//! use taskwell::core::WorkerPool;
//!
//! let pool = WorkerPool::new(2, 16);
//! pool.start().unwrap();
//!
//! let (tx, rx) = std::sync::mpsc::channel();
//! pool.submit(move || {
//!     tx.send(2 + 2).unwrap();
//! })
//! .unwrap();
//!
//! assert_eq!(rx.recv().unwrap(), 4);
//! pool.stop();
//! ```

use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::process;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use crate::condvar::Condvar;
use crate::mutex::Mutex;

use super::queue::TaskQueue;
use super::PoolError;

/// A zero-argument, side-effecting unit of work submitted to the pool.
///
/// The pool is agnostic to return values; result capture is layered on top by
/// [`crate::core::Future`] and [`crate::core::MultiFuture`] via wrapper
/// closures.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Hook invoked once per worker thread before it enters its take-loop, or
/// once synchronously at `start` when the pool runs with zero workers.
pub type ThreadInitHook = Arc<dyn Fn() + Send + Sync + 'static>;

/// Lifecycle of a pool. The progression is strictly
/// `Created -> Running -> Stopped`; there is no restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    Stopped,
}

/// Queue state guarded by the pool lock.
struct PoolState<Q> {
    queue: Q,
    lifecycle: Lifecycle,
}

/// State shared between the pool handle and its worker threads.
struct PoolShared<Q> {
    state: Mutex<PoolState<Q>>,
    /// Signaled when a task is enqueued; workers wait on this while empty.
    not_empty: Condvar,
    /// Signaled when a task is dequeued from a bounded queue; submitters
    /// wait on this while full.
    not_full: Condvar,
    /// Queue bound; `0` means unbounded and the queue is never full.
    max_queue_size: usize,
}

impl<Q: TaskQueue> PoolShared<Q> {
    fn is_full(&self, state: &PoolState<Q>) -> bool {
        self.max_queue_size > 0 && state.queue.len() >= self.max_queue_size
    }

    /// Dequeues the next task, blocking while the queue is empty and the
    /// pool is running. Returns `None` once the pool has stopped; tasks
    /// still queued at that point are discarded unexecuted.
    fn take(&self) -> Option<Task> {
        let mut state = self.state.lock();
        while state.queue.is_empty() && state.lifecycle == Lifecycle::Running {
            self.not_empty.wait(&mut state);
        }
        if state.lifecycle != Lifecycle::Running {
            return None;
        }
        let task = state.queue.pop_front();
        if task.is_some() && self.max_queue_size > 0 {
            self.not_full.notify_one();
        }
        task
    }
}

/// Worker pool with dedicated OS threads fed from a FIFO queue.
///
/// # Lifecycle
///
/// A pool is created once, started once, and stopped once. Dropping a
/// running pool stops it, so workers are always joined. After `stop`, every
/// submission is rejected with [`PoolError::Stopped`].
///
/// # Zero-worker inline mode
///
/// A pool started with zero workers executes every submitted task
/// synchronously on the caller's thread before `submit` returns. This is a
/// documented degenerate mode for tests and zero-concurrency configurations;
/// the thread-init hook, if present, runs once synchronously at `start`.
///
/// # Failure policy
///
/// A panic escaping a task is logged and the process is aborted. The pool
/// provides no fault containment between tasks.
pub struct WorkerPool<Q: TaskQueue = VecDeque<Task>> {
    shared: Arc<PoolShared<Q>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    worker_count: usize,
    thread_init: Option<ThreadInitHook>,
}

impl WorkerPool {
    /// Creates a pool backed by a `VecDeque` queue.
    ///
    /// `max_queue_size == 0` means the queue is unbounded and submitters
    /// never block. The pool must be started before it accepts tasks.
    #[must_use]
    pub fn new(worker_count: usize, max_queue_size: usize) -> Self {
        Self::with_queue(VecDeque::new(), worker_count, max_queue_size)
    }
}

impl<Q: TaskQueue> WorkerPool<Q> {
    /// Creates a pool backed by the given queue implementation.
    pub fn with_queue(queue: Q, worker_count: usize, max_queue_size: usize) -> Self {
        Self {
            shared: Arc::new(PoolShared {
                state: Mutex::new(PoolState {
                    queue,
                    lifecycle: Lifecycle::Created,
                }),
                not_empty: Condvar::new(),
                not_full: Condvar::new(),
                max_queue_size,
            }),
            workers: Mutex::new(Vec::new()),
            worker_count,
            thread_init: None,
        }
    }

    /// Installs a hook run once on each worker thread before it starts
    /// taking tasks. Must be set before [`WorkerPool::start`].
    pub fn set_thread_init<F>(&mut self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.thread_init = Some(Arc::new(hook));
    }

    /// Starts the pool, spawning its worker threads.
    ///
    /// With zero workers the pool enters inline mode: no threads are
    /// spawned and the thread-init hook, if any, runs once on the caller.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::AlreadyStarted`] if the pool has left the
    /// created state, or [`PoolError::Spawn`] if a worker thread could not
    /// be spawned (any workers spawned so far are stopped and joined).
    pub fn start(&self) -> Result<(), PoolError> {
        {
            let mut state = self.shared.state.lock();
            if state.lifecycle != Lifecycle::Created {
                return Err(PoolError::AlreadyStarted);
            }
            state.lifecycle = Lifecycle::Running;
        }

        if self.worker_count == 0 {
            if let Some(hook) = &self.thread_init {
                hook();
            }
            info!("worker pool started in inline mode (zero workers)");
            return Ok(());
        }

        {
            let mut workers = self.workers.lock();
            workers.reserve(self.worker_count);
            for worker_id in 0..self.worker_count {
                match spawn_worker(worker_id, Arc::clone(&self.shared), self.thread_init.clone())
                {
                    Ok(handle) => workers.push(handle),
                    Err(e) => {
                        drop(workers);
                        self.stop();
                        return Err(e.into());
                    }
                }
            }
        }

        info!(
            worker_count = self.worker_count,
            max_queue_size = self.shared.max_queue_size,
            "worker pool started"
        );
        Ok(())
    }

    /// Submits a task for execution.
    ///
    /// In inline mode the task runs synchronously on the caller's thread.
    /// Otherwise the task is appended to the queue; if the queue is bounded
    /// and full, the call blocks until a worker frees a slot.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Stopped`] if the pool is not running, including
    /// when the pool stops while this call is blocked on a full queue.
    pub fn submit<F>(&self, task: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock();
        if state.lifecycle != Lifecycle::Running {
            return Err(PoolError::Stopped);
        }

        if self.worker_count == 0 {
            drop(state);
            task();
            return Ok(());
        }

        while self.shared.is_full(&state) && state.lifecycle == Lifecycle::Running {
            self.shared.not_full.wait(&mut state);
        }
        if state.lifecycle != Lifecycle::Running {
            warn!("pool stopped while a submission was blocked; task rejected");
            return Err(PoolError::Stopped);
        }

        state.queue.push_back(Box::new(task));
        self.shared.not_empty.notify_one();
        Ok(())
    }

    /// Stops the pool: wakes all blocked workers and submitters, discards
    /// tasks still queued, and joins every worker thread before returning.
    pub fn stop(&self) {
        let was_running = {
            let mut state = self.shared.state.lock();
            let was_running = state.lifecycle == Lifecycle::Running;
            if was_running {
                let discarded = state.queue.len();
                if discarded > 0 {
                    debug!(discarded, "discarding queued tasks at stop");
                }
                // Drop the queued closures now so anything they capture is
                // released when stop returns, not when the pool is dropped.
                while state.queue.pop_front().is_some() {}
            }
            state.lifecycle = Lifecycle::Stopped;
            self.shared.not_empty.notify_all();
            self.shared.not_full.notify_all();
            was_running
        };

        let handles: Vec<JoinHandle<()>> = {
            let mut workers = self.workers.lock();
            workers.drain(..).collect()
        };
        for handle in handles {
            if handle.join().is_err() {
                warn!("worker thread terminated abnormally");
            }
        }

        if was_running {
            info!("worker pool stopped");
        }
    }

    /// Number of tasks currently queued (not including tasks being
    /// executed).
    pub fn queue_size(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    /// Number of worker threads this pool was configured with.
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }
}

impl<Q: TaskQueue> Drop for WorkerPool<Q> {
    fn drop(&mut self) {
        // Destruction without an explicit stop still joins workers.
        self.stop();
    }
}

/// Spawns one worker thread running the take-loop.
fn spawn_worker<Q: TaskQueue>(
    worker_id: usize,
    shared: Arc<PoolShared<Q>>,
    init: Option<ThreadInitHook>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("taskwell-worker-{worker_id}"))
        .spawn(move || {
            debug!(worker_id, "worker thread started");
            if let Some(hook) = init {
                hook();
            }
            while let Some(task) = shared.take() {
                run_task(worker_id, task);
            }
            debug!(worker_id, "worker thread exiting");
        })
}

/// Runs one task under the pool's fatal failure policy: a panic escaping
/// the task is logged and the process is aborted.
fn run_task(worker_id: usize, task: Task) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
        let reason = panic_reason(payload.as_ref());
        error!(worker_id, reason = %reason, "task panicked in worker pool; aborting process");
        process::abort();
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    payload.downcast_ref::<&str>().map_or_else(
        || {
            payload
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "non-string panic payload".to_owned())
        },
        |s| (*s).to_owned(),
    )
}
