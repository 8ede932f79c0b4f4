//! Error types for coalescer operations

use thiserror::Error;

/// Errors raised by coalescers and delay parsing
#[derive(Debug, Error)]
pub enum CoalesceError {
    /// Delay was negative
    #[error("invalid delay: {0}ms (delay must be non-negative)")]
    InvalidDelay(i64),

    /// No timer runtime is available on the calling thread
    #[error("cannot schedule debounced call: no tokio runtime is running on this thread")]
    NoRuntime,
}
