//! Worker pool, futures, and the task queue abstraction.

pub mod error;
pub mod future;
pub mod multi_future;
pub mod queue;
pub mod worker_pool;

pub use error::{AppResult, PoolError};
pub use future::{Future, FutureTask};
pub use multi_future::MultiFuture;
pub use queue::TaskQueue;
pub use worker_pool::{Task, ThreadInitHook, WorkerPool};
