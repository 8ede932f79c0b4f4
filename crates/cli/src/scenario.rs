//! Scripted trigger/tick timelines
//!
//! A scenario is a list of timed events replayed against debounce bindings.
//! Format (TOML):
//! ```toml
//! name = "typing"
//! delay_ms = 300
//!
//! [[events]]
//! at_ms = 0
//! kind = "trigger"
//! args = "a"
//!
//! [[events]]
//! at_ms = 120
//! kind = "render"
//! ```

use anyhow::{Context, Result};
use memolab_core::delay_from_millis;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Names accepted by [`Scenario::builtin`]
pub const BUILTIN_SCENARIOS: [&str; 3] = ["typing", "rebind", "spaced"];

/// A replayable timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name
    pub name: String,

    /// Debounce delay; falls back to the configured delay when absent
    #[serde(default)]
    pub delay_ms: Option<i64>,

    /// Counter key prefix
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Events, sorted by offset
    #[serde(default)]
    pub events: Vec<Event>,
}

fn default_subject() -> String {
    "SideBySideDemo".to_string()
}

/// One timed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Offset from replay start
    pub at_ms: u64,

    /// What happens
    pub kind: EventKind,

    /// Arguments for `trigger`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

/// Kinds of scenario events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Call `trigger(args)` on every binding
    Trigger,
    /// Lifecycle tick with a freshly created action
    Render,
    /// Lifecycle tick reusing the previous action
    StableRender,
}

impl Event {
    /// Trigger carrying `args` at `at_ms`
    pub fn trigger(at_ms: u64, args: &str) -> Self {
        Self {
            at_ms,
            kind: EventKind::Trigger,
            args: Some(args.to_string()),
        }
    }

    /// Render with a new action identity at `at_ms`
    pub fn render(at_ms: u64) -> Self {
        Self {
            at_ms,
            kind: EventKind::Render,
            args: None,
        }
    }

    /// Render keeping the current action at `at_ms`
    pub fn stable_render(at_ms: u64) -> Self {
        Self {
            at_ms,
            kind: EventKind::StableRender,
            args: None,
        }
    }
}

impl Scenario {
    /// Parse and validate a scenario from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(text).context("Failed to parse scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Check delay sign, event order and trigger arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(ms) = self.delay_ms {
            delay_from_millis(ms)?;
        }

        for pair in self.events.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                anyhow::bail!(
                    "Events must be sorted by at_ms: {}ms comes after {}ms",
                    pair[1].at_ms,
                    pair[0].at_ms
                );
            }
        }

        for event in &self.events {
            if event.kind == EventKind::Trigger && event.args.is_none() {
                anyhow::bail!("Trigger event at {}ms has no args", event.at_ms);
            }
        }

        Ok(())
    }

    /// Delay to use, given the configured fallback
    pub fn delay_or(&self, fallback: Duration) -> Result<Duration> {
        match self.delay_ms {
            Some(ms) => Ok(delay_from_millis(ms)?),
            None => Ok(fallback),
        }
    }

    /// Offset of the last event
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.events.last().map_or(0, |e| e.at_ms))
    }

    /// Number of trigger events
    pub fn trigger_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Trigger)
            .count()
    }

    /// Built-in timelines
    ///
    /// - `typing`: three keystrokes inside one window, no re-render
    /// - `rebind`: the same keystrokes with a re-render at 120ms
    /// - `spaced`: keystrokes each followed by a re-render, spaced wider than the delay
    pub fn builtin(name: &str) -> Option<Self> {
        let events = match name {
            "typing" => vec![
                Event::trigger(0, "a"),
                Event::trigger(100, "ab"),
                Event::trigger(150, "abc"),
            ],
            "rebind" => vec![
                Event::trigger(0, "a"),
                Event::trigger(100, "ab"),
                Event::render(120),
                Event::trigger(150, "abc"),
            ],
            "spaced" => vec![
                Event::trigger(0, "r"),
                Event::render(50),
                Event::trigger(400, "re"),
                Event::render(450),
                Event::trigger(800, "rea"),
                Event::stable_render(850),
            ],
            _ => return None,
        };

        Some(Self {
            name: name.to_string(),
            delay_ms: Some(300),
            subject: default_subject(),
            events,
        })
    }
}
