//! Side-by-side replay of a scenario
//!
//! Every selected variant gets its own binding. Events are applied to all
//! bindings at the same offsets, so the reports differ only in how each
//! variant reacts to re-renders.

use crate::scenario::{EventKind, Scenario};
use anyhow::{Context, Result};
use memolab_core::{
    Action, CoalescerStats, Counter, DebounceBinding, TraceMode, Variant, DEFAULT_DELAY,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info};

/// Which variants to replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantSelection {
    One(Variant),
    Both,
}

impl VariantSelection {
    pub fn variants(&self) -> Vec<Variant> {
        match self {
            VariantSelection::One(variant) => vec![*variant],
            VariantSelection::Both => Variant::ALL.to_vec(),
        }
    }
}

impl FromStr for VariantSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("both") {
            Ok(VariantSelection::Both)
        } else {
            s.parse().map(VariantSelection::One)
        }
    }
}

impl fmt::Display for VariantSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantSelection::One(variant) => write!(f, "{}", variant),
            VariantSelection::Both => f.write_str("both"),
        }
    }
}

/// Replay settings
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub selection: VariantSelection,
    /// Delay for scenarios that do not set one
    pub default_delay: Duration,
    /// Extra wait after the last timer could have fired
    pub settle: Duration,
    pub trace: TraceMode,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            selection: VariantSelection::Both,
            default_delay: DEFAULT_DELAY,
            settle: Duration::from_millis(50),
            trace: TraceMode::default(),
        }
    }
}

/// One action execution observed during replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub args: String,
    /// Offset from replay start
    pub at_ms: u64,
}

/// Outcome for one variant
#[derive(Debug, Clone, Serialize)]
pub struct VariantReport {
    pub variant: Variant,
    pub invocations: Vec<Invocation>,
    pub rebuilds: u64,
    pub renders: u64,
    pub stats: CoalescerStats,
}

/// Outcome of a replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub scenario: String,
    pub delay_ms: u64,
    pub triggers: usize,
    pub variants: Vec<VariantReport>,
}

impl ReplayReport {
    pub fn variant(&self, variant: Variant) -> Option<&VariantReport> {
        self.variants.iter().find(|r| r.variant == variant)
    }
}

/// Per-variant replay state
struct Lane {
    variant: Variant,
    key: String,
    binding: Box<dyn DebounceBinding<String>>,
    current: Action<String>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl Lane {
    fn new(variant: Variant, subject: &str, delay: Duration, start: Instant) -> Self {
        let invocations = Arc::new(Mutex::new(Vec::new()));
        let current = recording_action(&invocations, start);
        Self {
            variant,
            key: format!("{}-{}", subject, variant),
            binding: variant.bind(current.clone(), delay),
            current,
            invocations,
        }
    }
}

/// A new action identity appending to `sink`
fn recording_action(sink: &Arc<Mutex<Vec<Invocation>>>, start: Instant) -> Action<String> {
    let sink = Arc::clone(sink);
    Action::new(move |args: String| {
        let at_ms = start.elapsed().as_millis() as u64;
        debug!("Action invoked with {:?} at {}ms", args, at_ms);
        sink.lock().push(Invocation { args, at_ms });
    })
}

/// Replay `scenario` in real time (or paused time under test)
pub async fn replay(scenario: &Scenario, options: &ReplayOptions) -> Result<ReplayReport> {
    scenario.validate()?;
    let delay = scenario.delay_or(options.default_delay)?;
    let counter = Counter::new(options.trace);

    info!(
        "Replaying '{}' ({} events, delay {:?}, variants: {})",
        scenario.name,
        scenario.events.len(),
        delay,
        options.selection
    );

    let start = Instant::now();
    let mut lanes: Vec<Lane> = options
        .selection
        .variants()
        .into_iter()
        .map(|variant| Lane::new(variant, &scenario.subject, delay, start))
        .collect();

    // Initial mount counts as the first render
    for lane in &lanes {
        counter.tick(&lane.key);
    }

    for event in &scenario.events {
        sleep_until(start + Duration::from_millis(event.at_ms)).await;

        for lane in lanes.iter_mut() {
            match event.kind {
                EventKind::Trigger => {
                    let args = event.args.clone().context("Trigger event without args")?;
                    lane.binding
                        .trigger(args)
                        .with_context(|| format!("Failed to trigger {} binding", lane.variant))?;
                }
                EventKind::Render => {
                    lane.current = recording_action(&lane.invocations, start);
                    counter.tick(&lane.key);
                    lane.binding.tick(lane.current.clone());
                }
                EventKind::StableRender => {
                    counter.tick(&lane.key);
                    lane.binding.tick(lane.current.clone());
                }
            }
        }
    }

    sleep(delay + options.settle).await;

    let variants = lanes
        .iter()
        .map(|lane| VariantReport {
            variant: lane.variant,
            invocations: lane.invocations.lock().clone(),
            rebuilds: lane.binding.rebuilds(),
            renders: counter.get(&lane.key),
            stats: lane.binding.stats(),
        })
        .collect();

    Ok(ReplayReport {
        scenario: scenario.name.clone(),
        delay_ms: delay.as_millis() as u64,
        triggers: scenario.trigger_count(),
        variants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Event;

    fn silent(selection: VariantSelection) -> ReplayOptions {
        ReplayOptions {
            selection,
            trace: TraceMode::Silent,
            ..ReplayOptions::default()
        }
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("both".parse::<VariantSelection>().unwrap(), VariantSelection::Both);
        assert_eq!(
            "broken".parse::<VariantSelection>().unwrap(),
            VariantSelection::One(Variant::Naive)
        );
        assert!("neither".parse::<VariantSelection>().is_err());
        assert_eq!(VariantSelection::Both.variants(), vec![Variant::Naive, Variant::Latest]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_fires_once_for_both() {
        let scenario = Scenario::builtin("typing").unwrap();
        let report = replay(&scenario, &silent(VariantSelection::Both)).await.unwrap();

        assert_eq!(report.delay_ms, 300);
        assert_eq!(report.triggers, 3);
        for variant in Variant::ALL {
            let lane = report.variant(variant).unwrap();
            assert_eq!(lane.invocations.len(), 1);
            assert_eq!(lane.invocations[0].args, "abc");
            assert!((450..455).contains(&lane.invocations[0].at_ms));
            assert_eq!(lane.renders, 1);
            assert_eq!(lane.stats.superseded, 2);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_rerenders_starve_naive() {
        let scenario = Scenario::builtin("spaced").unwrap();
        let report = replay(&scenario, &silent(VariantSelection::Both)).await.unwrap();

        let naive = report.variant(Variant::Naive).unwrap();
        let latest = report.variant(Variant::Latest).unwrap();

        assert_eq!(naive.rebuilds, 2);
        assert_eq!(latest.rebuilds, 0);
        let naive_args: Vec<&str> = naive.invocations.iter().map(|i| i.args.as_str()).collect();
        let latest_args: Vec<&str> = latest.invocations.iter().map(|i| i.args.as_str()).collect();
        assert_eq!(naive_args, vec!["rea"]);
        assert_eq!(latest_args, vec!["r", "re", "rea"]);
        assert_eq!(naive.renders, 4);
        assert_eq!(latest.renders, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_variant_selection() {
        let scenario = Scenario {
            name: "one".to_string(),
            delay_ms: None,
            subject: "Form".to_string(),
            events: vec![Event::trigger(0, "x")],
        };

        let report = replay(&scenario, &silent(VariantSelection::One(Variant::Naive)))
            .await
            .unwrap();

        assert_eq!(report.variants.len(), 1);
        assert_eq!(report.delay_ms, DEFAULT_DELAY.as_millis() as u64);
        assert_eq!(report.variants[0].invocations.len(), 1);
    }
}
