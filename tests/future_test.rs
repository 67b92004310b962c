//! Integration tests for Future and MultiFuture
//!
//! These tests validate the result-synchronization facades:
//! - Exactly-once, never-crossed results across independent futures
//! - Idempotent retrieval of a completed result
//! - Timed retrieval that never disturbs the in-flight task
//! - MultiFuture completeness and index stability under randomized delays
//! - The zero-task MultiFuture edge case

use rand::Rng;
use std::thread;
use std::time::Duration;

use taskwell::builders::PoolBuilder;
use taskwell::core::{AppResult, Future, FutureTask, MultiFuture, PoolError};
use taskwell::util::init_tracing;

fn accumulate(low: i64, high: i64) -> i64 {
    (low..=high).sum()
}

#[test]
fn test_future_returns_accumulated_value() {
    init_tracing();
    let pool = PoolBuilder::new().with_worker_count(4).build().unwrap();

    let future = Future::new(&pool, || accumulate(1, 100)).unwrap();
    assert_eq!(future.get(), 5050);
    pool.stop();
}

#[test]
fn test_exactly_once_results_never_cross() {
    let pool = PoolBuilder::new().with_worker_count(4).build().unwrap();

    // N independent futures, each with a distinct deterministic value.
    let futures: Vec<(i64, Future<i64>)> = (0..16)
        .map(|i| {
            let expected = i * 31 + 7;
            let future = Future::new(&pool, move || {
                thread::sleep(Duration::from_millis(1));
                expected
            })
            .unwrap();
            (expected, future)
        })
        .collect();

    for (expected, future) in futures {
        assert_eq!(future.get(), expected);
    }
    pool.stop();
}

#[test]
fn test_idempotent_retrieval() {
    let pool = PoolBuilder::new().with_worker_count(2).build().unwrap();

    let future = Future::new(&pool, || vec![1, 2, 3]).unwrap();
    let first = future.get();
    let second = future.get();
    assert_eq!(first, second);
    assert_eq!(first, vec![1, 2, 3]);
    pool.stop();
}

#[test]
fn test_timeout_correctness() {
    let pool = PoolBuilder::new().with_worker_count(1).build().unwrap();

    let future = Future::new(&pool, || {
        thread::sleep(Duration::from_millis(500));
        expected_value()
    })
    .unwrap();

    // 100_000 microseconds: far too short for a 500ms task.
    let (completed, value) = future.get_timeout(Duration::from_micros(100_000));
    assert!(!completed);
    assert_eq!(value, i64::default());

    // 1_000_000 microseconds: plenty for the remaining work.
    let (completed, value) = future.get_timeout(Duration::from_micros(1_000_000));
    assert!(completed);
    assert_eq!(value, expected_value());
    pool.stop();
}

fn expected_value() -> i64 {
    accumulate(1, 1000)
}

#[test]
fn test_multi_future_completeness_randomized() {
    let pool = PoolBuilder::new().with_worker_count(4).build().unwrap();

    for _ in 0..100 {
        let tasks: Vec<FutureTask<i64>> = (0..10)
            .map(|i| {
                Box::new(move || {
                    let delay = rand::rng().random_range(0..3u64);
                    thread::sleep(Duration::from_millis(delay));
                    accumulate(1, 100 * i)
                }) as FutureTask<i64>
            })
            .collect();

        let multi = MultiFuture::new(&pool, tasks).unwrap();
        let values = multi.get();
        let expected: Vec<i64> = (0..10).map(|i| accumulate(1, 100 * i)).collect();
        // Element i equals task i's value regardless of completion order.
        assert_eq!(values, expected);
    }
    pool.stop();
}

#[test]
fn test_multi_future_timeout_returns_empty_set() {
    let pool = PoolBuilder::new().with_worker_count(2).build().unwrap();

    let tasks: Vec<FutureTask<u32>> = (0..4u32)
        .map(|i| {
            Box::new(move || {
                thread::sleep(Duration::from_millis(200));
                i
            }) as FutureTask<u32>
        })
        .collect();
    let multi = MultiFuture::new(&pool, tasks).unwrap();

    let (completed, values) = multi.get_timeout(Duration::from_millis(20));
    assert!(!completed);
    assert!(values.is_empty());

    let (completed, values) = multi.get_timeout(Duration::from_secs(5));
    assert!(completed);
    assert_eq!(values, vec![0, 1, 2, 3]);
    pool.stop();
}

#[test]
fn test_zero_task_multi_future_is_immediately_done() {
    let pool = PoolBuilder::new().with_worker_count(2).build().unwrap();

    let multi: MultiFuture<String> = MultiFuture::new(&pool, Vec::new()).unwrap();
    assert!(multi.get().is_empty());
    pool.stop();
}

#[test]
fn test_futures_on_inline_pool() -> AppResult<()> {
    let pool = PoolBuilder::new().with_worker_count(0).build()?;

    let future = Future::new(&pool, || accumulate(1, 10))?;
    assert_eq!(future.get(), 55);

    let tasks: Vec<FutureTask<i64>> = (0..3i64)
        .map(|i| Box::new(move || i) as FutureTask<i64>)
        .collect();
    let multi = MultiFuture::new(&pool, tasks)?;
    assert_eq!(multi.get(), vec![0, 1, 2]);
    pool.stop();
    Ok(())
}

#[test]
fn test_future_after_stop_is_rejected() {
    let pool = PoolBuilder::new().with_worker_count(1).build().unwrap();
    pool.stop();

    assert!(matches!(
        Future::new(&pool, || 1),
        Err(PoolError::Stopped)
    ));
    let tasks: Vec<FutureTask<i32>> = vec![Box::new(|| 1)];
    assert!(matches!(
        MultiFuture::new(&pool, tasks),
        Err(PoolError::Stopped)
    ));
}
