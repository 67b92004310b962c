//! # Taskwell
//!
//! A bounded worker-thread pool with blocking result synchronization.
//!
//! This library provides a fixed-size pool of dedicated OS threads fed from a
//! FIFO task queue, together with two retrieval facades: [`core::Future`] for
//! a single asynchronously scheduled task, and [`core::MultiFuture`] for a
//! fan-out of N independent tasks collected back into an index-stable result
//! set. Submitters experience backpressure when the queue is bounded and
//! full, and shutdown drains in-flight work before joining every worker.
//!
//! ## Core Problem Solved
//!
//! Dispatching CPU-bound work onto dedicated threads sounds trivial until the
//! coordination details arrive:
//!
//! - **Backpressure**: a bounded queue must block submitters, not drop work
//! - **Timed retrieval**: callers need bounded waits that leave the task running
//! - **Exactly-once completion**: N workers finishing "simultaneously" must
//!   produce exactly one done transition and one broadcast
//! - **Graceful shutdown**: in-flight tasks finish, queued tasks are discarded,
//!   and every worker thread is joined before `stop` returns
//!
//! ## Example
//!
//! ```
//! use taskwell::builders::PoolBuilder;
//! use taskwell::core::{Future, MultiFuture, FutureTask};
//!
//! let pool = PoolBuilder::new().with_worker_count(4).build().unwrap();
//!
//! // Single result.
//! let future = Future::new(&pool, || (1..=100).sum::<i32>()).unwrap();
//! assert_eq!(future.get(), 5050);
//!
//! // Fan-out / fan-in; results come back in submission order.
//! let tasks: Vec<FutureTask<i32>> = (0..10)
//!     .map(|i| Box::new(move || i * i) as FutureTask<i32>)
//!     .collect();
//! let multi = MultiFuture::new(&pool, tasks).unwrap();
//! assert_eq!(multi.get(), (0..10).map(|i| i * i).collect::<Vec<_>>());
//!
//! pool.stop();
//! ```
//!
//! ## Failure Policy
//!
//! The pool provides no fault containment between tasks. A task that panics
//! is logged through `tracing` and the process is aborted; there is no
//! per-task isolation and no retry. A timed-out retrieval is not an error:
//! the underlying task keeps running and its result is simply discarded by
//! the caller.
//!
//! For complete examples, see `tests/worker_pool_test.rs` and
//! `tests/future_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Worker pool, futures, and the task queue abstraction.
pub mod core;
/// Configuration models for pool sizing and queue bounds.
pub mod config;
/// Builders to construct a started pool from configuration.
pub mod builders;
/// Mutual exclusion primitive used throughout the crate.
pub mod mutex;
/// Condition variable bound to the crate's mutex.
pub mod condvar;
/// Shared utilities.
pub mod util;

pub use condvar::Condvar;
pub use mutex::{MappedMutexGuard, Mutex, MutexGuard};
