//! Coalescer that captures its action at construction

use super::{Coalescer, CoalescerStats, TimerSlot};
use crate::action::Action;
use crate::Result;
use std::time::Duration;

/// Debounce coalescer bound to a fixed action
///
/// The action is captured when the coalescer is built. Owners whose action
/// changes identity have to build a new coalescer, and dropping the old one
/// aborts its pending call.
pub struct NaiveCoalescer<A> {
    action: Action<A>,
    timer: TimerSlot,
}

impl<A> NaiveCoalescer<A> {
    /// Build a coalescer running `action` after `delay`
    pub fn new(action: Action<A>, delay: Duration) -> Self {
        Self {
            action,
            timer: TimerSlot::new(delay),
        }
    }

    /// The captured action
    pub fn action(&self) -> &Action<A> {
        &self.action
    }
}

impl<A: Send + 'static> Coalescer<A> for NaiveCoalescer<A> {
    fn trigger(&self, args: A) -> Result<()> {
        let action = self.action.clone();
        self.timer.schedule(move || action.call(args))
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
