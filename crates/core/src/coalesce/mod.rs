//! Debounce coalescers
//!
//! A coalescer collapses rapid `trigger` calls into one delayed execution
//! carrying the arguments of the most recent call. Two implementations
//! share the [`Coalescer`] trait:
//! - [`NaiveCoalescer`] runs the action captured at construction
//! - [`LatestCoalescer`] runs whatever action its [`LatestActionRef`](crate::LatestActionRef)
//!   holds when the timer fires

mod latest;
mod naive;

pub use latest::LatestCoalescer;
pub use naive::NaiveCoalescer;

use crate::error::CoalesceError;
use crate::Result;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Common contract of both coalescer variants
pub trait Coalescer<A>: Send + Sync {
    /// Schedule the action with `args`, replacing any pending execution
    ///
    /// Never blocks. Fails only when no runtime is available to host the timer.
    fn trigger(&self, args: A) -> Result<()>;

    /// Abort the pending execution, if any
    fn cancel(&self);

    /// Whether an execution is scheduled and has not fired yet
    fn is_pending(&self) -> bool;

    /// Configured delay
    fn delay(&self) -> Duration;

    /// Counters for this coalescer
    fn stats(&self) -> CoalescerStats;
}

/// Snapshot of coalescer activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoalescerStats {
    /// Calls to `trigger` that scheduled a timer
    pub triggers: u64,
    /// Timers that elapsed and ran the action
    pub fires: u64,
    /// Pending timers replaced by a newer trigger
    pub superseded: u64,
    /// Pending timers aborted by `cancel` or drop
    pub cancelled: u64,
}

impl CoalescerStats {
    /// Sum two snapshots
    pub fn merge(self, other: CoalescerStats) -> CoalescerStats {
        CoalescerStats {
            triggers: self.triggers + other.triggers,
            fires: self.fires + other.fires,
            superseded: self.superseded + other.superseded,
            cancelled: self.cancelled + other.cancelled,
        }
    }
}

#[derive(Default)]
struct StatsCell {
    triggers: AtomicU64,
    fires: AtomicU64,
    superseded: AtomicU64,
    cancelled: AtomicU64,
}

impl StatsCell {
    fn snapshot(&self) -> CoalescerStats {
        CoalescerStats {
            triggers: self.triggers.load(Ordering::Relaxed),
            fires: self.fires.load(Ordering::Relaxed),
            superseded: self.superseded.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }
}

/// One-shot timer owned by a coalescer
///
/// Holds at most one pending task. Scheduling aborts the previous one.
/// Dropping the slot aborts whatever is still pending.
struct TimerSlot {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    stats: Arc<StatsCell>,
}

impl TimerSlot {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
            stats: Arc::new(StatsCell::default()),
        }
    }

    fn schedule<F>(&self, fire: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| CoalesceError::NoRuntime)?;

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                previous.abort();
                self.stats.superseded.fetch_add(1, Ordering::Relaxed);
                trace!("Superseded pending debounced call");
            }
        }

        // Deadline counts from the trigger, not from the task's first poll
        let deadline = Instant::now() + self.delay;
        let stats = Arc::clone(&self.stats);
        *pending = Some(runtime.spawn(async move {
            sleep_until(deadline).await;
            stats.fires.fetch_add(1, Ordering::Relaxed);
            fire();
        }));

        self.stats.triggers.fetch_add(1, Ordering::Relaxed);
        trace!("Scheduled debounced call in {:?}", self.delay);
        Ok(())
    }

    fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            if !previous.is_finished() {
                previous.abort();
                self.stats.cancelled.fetch_add(1, Ordering::Relaxed);
                trace!("Cancelled pending debounced call");
            }
        }
    }

    fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn stats(&self) -> CoalescerStats {
        self.stats.snapshot()
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
