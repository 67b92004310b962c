//! Mutex implementation
//!
//! The pool's task queue, each future's result slot, and every done-flag in
//! this crate are guarded by this mutex. It is a re-export of the
//! battle-tested `parking_lot` mutex rather than `std::sync::Mutex`:
//!
//! - No poisoning on panic (the pool's failure policy aborts anyway)
//! - Compact memory footprint (one byte when unlocked)
//! - Fast uncontended lock/unlock
//!
//! # Examples
//!
//! ```
//! use taskwell::Mutex;
//!
//! let queue = Mutex::new(Vec::new());
//! queue.lock().push("task");
//! assert_eq!(queue.lock().len(), 1);
//! ```

// Re-export parking_lot's Mutex types
pub use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
