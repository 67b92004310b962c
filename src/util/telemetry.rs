//! Telemetry helpers for structured logging and tracing.
//!
//! Logging configuration is explicit: nothing here is initialized behind the
//! caller's back. The pool reports fatal and error conditions through
//! whatever `tracing` subscriber the application installed; these helpers are
//! the stock way to install one.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/telemetry. Users can install their own subscriber;
/// this helper installs an env-filtered subscriber if none is set, falling
/// back to `info` for the pool's own events when `RUST_LOG` is unset.
pub fn init_tracing() {
    init_tracing_with("taskwell=info");
}

/// Like [`init_tracing`], but with a caller-chosen filter directive used
/// when `RUST_LOG` is unset. A directive like `"taskwell=debug"` surfaces
/// the per-task dispatch and discard events.
pub fn init_tracing_with(default_directive: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
