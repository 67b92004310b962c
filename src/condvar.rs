//! Condition variable implementation.
//!
//! This module provides the condition variable the pool and both futures use
//! for blocking and timed waits. It wraps `parking_lot::Condvar` and, unlike
//! `std::sync::Condvar`, does not implement poisoning.
//!
//! Waits are subject to spurious and broadcast wakeups: callers must re-check
//! the guarded predicate in a loop after every wakeup, never assume a single
//! wakeup implies the awaited condition holds.

use std::time::{Duration, Instant};

use crate::MutexGuard;

pub use parking_lot::WaitTimeoutResult;

/// A condition variable.
///
/// Condition variables represent the ability to block a thread such that it
/// consumes no CPU time while waiting for an event to occur.
///
/// # Examples
///
/// ```
/// use taskwell::{Mutex, Condvar};
/// use std::sync::Arc;
/// use std::thread;
///
/// let pair = Arc::new((Mutex::new(false), Condvar::new()));
/// let pair2 = Arc::clone(&pair);
///
/// thread::spawn(move || {
///     let (lock, cvar) = &*pair2;
///     let mut done = lock.lock();
///     *done = true;
///     cvar.notify_one();
/// });
///
/// let (lock, cvar) = &*pair;
/// let mut done = lock.lock();
/// while !*done {
///     cvar.wait(&mut done);
/// }
/// ```
#[derive(Debug, Default)]
pub struct Condvar {
    inner: parking_lot::Condvar,
}

impl Condvar {
    /// Creates a new condition variable.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: parking_lot::Condvar::new(),
        }
    }

    /// Blocks the current thread until this condition variable receives a
    /// notification.
    ///
    /// This function atomically unlocks the mutex behind `guard` and blocks
    /// the current thread; any `notify_one` or `notify_all` that happens
    /// logically after the unlock is a candidate to wake it. The lock is
    /// re-acquired before this call returns.
    #[inline]
    pub fn wait<T>(&self, guard: &mut MutexGuard<'_, T>) {
        self.inner.wait(guard);
    }

    /// Blocks the current thread until `condition` returns `false` for the
    /// guarded value, re-waiting across spurious wakeups.
    #[inline]
    pub fn wait_while<T, F>(&self, guard: &mut MutexGuard<'_, T>, condition: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        self.inner.wait_while(guard, condition);
    }

    /// Waits on this condition variable with a timeout.
    ///
    /// The deadline is computed as "now plus `timeout`" at call time. The
    /// returned [`WaitTimeoutResult`] reports whether the wait ended because
    /// the timeout elapsed rather than a notification; either way the lock is
    /// re-acquired before returning, and the caller must still re-check its
    /// predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskwell::{Mutex, Condvar};
    /// use std::time::Duration;
    ///
    /// let lock = Mutex::new(false);
    /// let cvar = Condvar::new();
    ///
    /// let mut ready = lock.lock();
    /// let result = cvar.wait_for(&mut ready, Duration::from_micros(500));
    /// assert!(result.timed_out());
    /// ```
    #[inline]
    pub fn wait_for<T>(
        &self,
        guard: &mut MutexGuard<'_, T>,
        timeout: Duration,
    ) -> WaitTimeoutResult {
        self.inner.wait_for(guard, timeout)
    }

    /// Waits on this condition variable until the given instant.
    ///
    /// Behaves like [`Condvar::wait_for`] but against an absolute deadline,
    /// which keeps repeated waits in a predicate loop from extending the
    /// overall timeout.
    #[inline]
    pub fn wait_until<T>(
        &self,
        guard: &mut MutexGuard<'_, T>,
        deadline: Instant,
    ) -> WaitTimeoutResult {
        self.inner.wait_until(guard, deadline)
    }

    /// Wakes up one blocked thread on this condvar.
    ///
    /// Calls to `notify_one` are not buffered in any way.
    #[inline]
    pub fn notify_one(&self) {
        self.inner.notify_one();
    }

    /// Wakes up all blocked threads on this condvar.
    ///
    /// Calls to `notify_all` are not buffered in any way.
    #[inline]
    pub fn notify_all(&self) {
        self.inner.notify_all();
    }
}
