//! Builders to construct a started pool from configuration.

pub mod pool_builder;

pub use pool_builder::PoolBuilder;
