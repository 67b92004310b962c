//! Builder producing a started worker pool from configuration.

use crate::config::PoolConfig;
use crate::core::{PoolError, WorkerPool};

/// Builds and starts a [`WorkerPool`] from a [`PoolConfig`] plus the
/// non-serializable pieces (the thread-init hook).
///
/// # Examples
///
/// ```
/// use taskwell::builders::PoolBuilder;
///
/// let pool = PoolBuilder::new()
///     .with_worker_count(2)
///     .with_max_queue_size(64)
///     .with_thread_init(|| {
///         // runs once on each worker before it takes tasks
///     })
///     .build()
///     .unwrap();
/// assert_eq!(pool.worker_count(), 2);
/// pool.stop();
/// ```
#[derive(Default)]
pub struct PoolBuilder {
    config: PoolConfig,
    thread_init: Option<Box<dyn Fn() + Send + Sync + 'static>>,
}

impl PoolBuilder {
    /// Starts from the default configuration: one worker per logical CPU,
    /// unbounded queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    #[must_use]
    pub fn from_config(config: PoolConfig) -> Self {
        Self {
            config,
            thread_init: None,
        }
    }

    /// Sets the number of worker threads. `0` selects inline mode.
    #[must_use]
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.config.worker_count = worker_count;
        self
    }

    /// Sets the queue bound. `0` means unbounded.
    #[must_use]
    pub fn with_max_queue_size(mut self, max_queue_size: usize) -> Self {
        self.config.max_queue_size = max_queue_size;
        self
    }

    /// Attaches a hook run once per worker thread before its take-loop
    /// (once synchronously at start in inline mode).
    #[must_use]
    pub fn with_thread_init<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.thread_init = Some(Box::new(hook));
        self
    }

    /// Validates the configuration, constructs the pool, and starts it.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if validation fails, or any
    /// error from [`WorkerPool::start`].
    pub fn build(self) -> Result<WorkerPool, PoolError> {
        self.config.validate().map_err(PoolError::InvalidConfig)?;

        let mut pool = WorkerPool::new(self.config.worker_count, self.config.max_queue_size);
        if let Some(hook) = self.thread_init {
            pool.set_thread_init(hook);
        }
        pool.start()?;
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_build_starts_the_pool() {
        let pool = PoolBuilder::new().with_worker_count(1).build().unwrap();
        // A started pool accepts submissions.
        pool.submit(|| {}).unwrap();
        pool.stop();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = PoolBuilder::new().with_worker_count(100_000).build();
        assert!(matches!(result, Err(PoolError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_config_carries_values() {
        let cfg = PoolConfig {
            worker_count: 0,
            max_queue_size: 0,
        };
        let hook_runs = Arc::new(AtomicUsize::new(0));
        let hook_runs2 = Arc::clone(&hook_runs);
        let pool = PoolBuilder::from_config(cfg)
            .with_thread_init(move || {
                hook_runs2.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        assert_eq!(pool.worker_count(), 0);
        // Inline mode ran the hook once during build.
        assert_eq!(hook_runs.load(Ordering::SeqCst), 1);
        pool.stop();
    }
}
