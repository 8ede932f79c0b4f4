//! Memolab Core - debounce and render-count primitives
//!
//! This crate provides:
//! - Debounce coalescers (naive capture and Latest-Reference variants)
//! - Tick-aware debounce bindings selected by [`Variant`]
//! - A keyed invocation counter with gated diagnostic tracing

pub mod action;
pub mod binding;
pub mod coalesce;
pub mod counter;
pub mod error;
pub mod latest;

use std::time::Duration;

// Re-exports
pub use action::Action;
pub use binding::{DebounceBinding, LatestBinding, NaiveBinding, Variant};
pub use coalesce::{Coalescer, CoalescerStats, LatestCoalescer, NaiveCoalescer};
pub use counter::{Counter, TraceMode};
pub use error::CoalesceError;
pub use latest::LatestActionRef;

/// Result type for coalescer operations
pub type Result<T> = std::result::Result<T, CoalesceError>;

/// Delay used when none is configured
pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

/// Convert a signed millisecond count into a delay
///
/// Negative values are rejected rather than clamped.
pub fn delay_from_millis(ms: i64) -> Result<Duration> {
    u64::try_from(ms)
        .map(Duration::from_millis)
        .map_err(|_| CoalesceError::InvalidDelay(ms))
}
