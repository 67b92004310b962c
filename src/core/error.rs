//! Error types for pool operations.

use thiserror::Error;

/// Errors produced by the worker pool and its futures.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool is not running; the task was rejected rather than silently
    /// dropped. Returned both for submissions after `stop` and for
    /// submissions that were blocked on a full queue when the pool stopped.
    #[error("pool is not running; task rejected")]
    Stopped,
    /// `start` was called on a pool that already left the created state.
    #[error("pool has already been started")]
    AlreadyStarted,
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Spawning a worker thread failed.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
