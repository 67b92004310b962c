//! Configuration models for pool sizing and queue bounds.

pub mod pool;

pub use pool::PoolConfig;
