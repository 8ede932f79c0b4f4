//! Coalescer that dispatches to the latest stored action

use super::{Coalescer, CoalescerStats, TimerSlot};
use crate::latest::LatestActionRef;
use crate::Result;
use std::time::Duration;

/// Debounce coalescer reading its action at fire time
///
/// Built once per delay. The action is looked up in the shared
/// [`LatestActionRef`] when the timer elapses, so replacing the action never
/// requires a new coalescer and never disturbs the pending timer.
pub struct LatestCoalescer<A> {
    latest: LatestActionRef<A>,
    timer: TimerSlot,
}

impl<A> LatestCoalescer<A> {
    /// Build a coalescer dispatching through `latest` after `delay`
    pub fn new(latest: LatestActionRef<A>, delay: Duration) -> Self {
        Self {
            latest,
            timer: TimerSlot::new(delay),
        }
    }

    /// The slot this coalescer reads from
    pub fn latest(&self) -> &LatestActionRef<A> {
        &self.latest
    }
}

impl<A: Send + 'static> Coalescer<A> for LatestCoalescer<A> {
    fn trigger(&self, args: A) -> Result<()> {
        let latest = self.latest.clone();
        self.timer.schedule(move || latest.load().call(args))
    }

    fn cancel(&self) {
        self.timer.cancel();
    }

    fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    fn delay(&self) -> Duration {
        self.timer.delay
    }

    fn stats(&self) -> CoalescerStats {
        self.timer.stats()
    }
}
