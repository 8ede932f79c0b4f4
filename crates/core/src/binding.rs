//! Tick-aware owners of a coalescer
//!
//! A binding is what a call site holds across lifecycle ticks. Every tick
//! hands it the action as it exists for that tick. The two bindings differ
//! in how they react:
//! - [`NaiveBinding`] rebuilds its coalescer whenever the action identity
//!   changes, discarding any pending call
//! - [`LatestBinding`] keeps one coalescer per delay and only refreshes the
//!   [`LatestActionRef`] it reads from

use crate::action::Action;
use crate::coalesce::{Coalescer, CoalescerStats, LatestCoalescer, NaiveCoalescer};
use crate::latest::LatestActionRef;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Which binding implementation to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Coalescer captures the action and is rebuilt when it changes
    #[serde(alias = "broken")]
    Naive,
    /// Coalescer built once, action read from the latest slot
    #[default]
    #[serde(alias = "fixed", alias = "corrected")]
    Latest,
}

impl Variant {
    /// Both variants, naive first
    pub const ALL: [Variant; 2] = [Variant::Naive, Variant::Latest];

    /// Build a binding of this variant
    pub fn bind<A: Send + 'static>(
        self,
        action: Action<A>,
        delay: Duration,
    ) -> Box<dyn DebounceBinding<A>> {
        match self {
            Variant::Naive => Box::new(NaiveBinding::new(action, delay)),
            Variant::Latest => Box::new(LatestBinding::new(action, delay)),
        }
    }

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Naive => "naive",
            Variant::Latest => "latest",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" | "broken" => Ok(Variant::Naive),
            "latest" | "fixed" | "corrected" => Ok(Variant::Latest),
            other => Err(format!(
                "unknown variant '{}' (expected naive/broken or latest/fixed)",
                other
            )),
        }
    }
}

/// Owner of a coalescer across lifecycle ticks
pub trait DebounceBinding<A>: Send + Sync {
    /// Implementation in use
    fn variant(&self) -> Variant;

    /// One lifecycle tick with the action as of this tick
    fn tick(&mut self, action: Action<A>);

    /// Change the delay; both variants rebuild their coalescer
    fn set_delay(&mut self, delay: Duration);

    /// Forward to the current coalescer
    fn trigger(&self, args: A) -> Result<()>;

    /// Abort the pending call, if any
    fn cancel(&self);

    /// Whether a call is scheduled
    fn is_pending(&self) -> bool;

    /// Current delay
    fn delay(&self) -> Duration;

    /// Number of times the coalescer was rebuilt
    fn rebuilds(&self) -> u64;

    /// Activity of every coalescer this binding has owned
    fn stats(&self) -> CoalescerStats;
}

/// Binding that rebuilds its coalescer on every action identity change
pub struct NaiveBinding<A> {
    coalescer: NaiveCoalescer<A>,
    rebuilds: u64,
    retired: CoalescerStats,
}

impl<A: Send + 'static> NaiveBinding<A> {
    /// Bind `action` behind a fresh naive coalescer
    pub fn new(action: Action<A>, delay: Duration) -> Self {
        Self {
            coalescer: NaiveCoalescer::new(action, delay),
            rebuilds: 0,
            retired: CoalescerStats::default(),
        }
    }

    fn rebuild(&mut self, action: Action<A>, delay: Duration) {
        let previous = std::mem::replace(&mut self.coalescer, NaiveCoalescer::new(action, delay));
        if previous.is_pending() {
            debug!("Naive coalescer rebuilt with a pending call; the call is discarded");
        }
        previous.cancel();
        self.retired = self.retired.merge(previous.stats());
        self.rebuilds += 1;
    }
}

impl<A: Send + 'static> DebounceBinding<A> for NaiveBinding<A> {
    fn variant(&self) -> Variant {
        Variant::Naive
    }

    fn tick(&mut self, action: Action<A>) {
        if !action.same_as(self.coalescer.action()) {
            let delay = self.coalescer.delay();
            self.rebuild(action, delay);
        }
    }

    fn set_delay(&mut self, delay: Duration) {
        if delay != self.coalescer.delay() {
            let action = self.coalescer.action().clone();
            self.rebuild(action, delay);
        }
    }

    fn trigger(&self, args: A) -> Result<()> {
        self.coalescer.trigger(args)
    }

    fn cancel(&self) {
        self.coalescer.cancel();
    }

    fn is_pending(&self) -> bool {
        self.coalescer.is_pending()
    }

    fn delay(&self) -> Duration {
        self.coalescer.delay()
    }

    fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    fn stats(&self) -> CoalescerStats {
        self.retired.merge(self.coalescer.stats())
    }
}

/// Binding that keeps one coalescer and refreshes its action slot
pub struct LatestBinding<A> {
    latest: LatestActionRef<A>,
    coalescer: LatestCoalescer<A>,
    rebuilds: u64,
    retired: CoalescerStats,
}

impl<A: Send + 'static> LatestBinding<A> {
    /// Store `action` in a new slot and build the one coalescer reading it
    pub fn new(action: Action<A>, delay: Duration) -> Self {
        let latest = LatestActionRef::new(action);
        Self {
            coalescer: LatestCoalescer::new(latest.clone(), delay),
            latest,
            rebuilds: 0,
            retired: CoalescerStats::default(),
        }
    }
}

impl<A: Send + 'static> DebounceBinding<A> for LatestBinding<A> {
    fn variant(&self) -> Variant {
        Variant::Latest
    }

    fn tick(&mut self, action: Action<A>) {
        // Stored before the tick returns, so the next trigger observes it
        self.latest.store(action);
    }

    fn set_delay(&mut self, delay: Duration) {
        if delay != self.coalescer.delay() {
            let previous = std::mem::replace(
                &mut self.coalescer,
                LatestCoalescer::new(self.latest.clone(), delay),
            );
            previous.cancel();
            self.retired = self.retired.merge(previous.stats());
            self.rebuilds += 1;
        }
    }

    fn trigger(&self, args: A) -> Result<()> {
        self.coalescer.trigger(args)
    }

    fn cancel(&self) {
        self.coalescer.cancel();
    }

    fn is_pending(&self) -> bool {
        self.coalescer.is_pending()
    }

    fn delay(&self) -> Duration {
        self.coalescer.delay()
    }

    fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    fn stats(&self) -> CoalescerStats {
        self.retired.merge(self.coalescer.stats())
    }
}
