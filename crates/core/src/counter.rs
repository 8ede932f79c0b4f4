//! Keyed invocation counters
//!
//! One monotonic counter per named subject, bumped on every lifecycle tick
//! of that subject. Ticks are optionally reported through `tracing` when
//! running in development mode.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Whether ticks emit diagnostic events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    /// Emit a debug event for every tick
    #[serde(alias = "dev")]
    Development,
    /// Count without emitting anything
    Silent,
}

impl TraceMode {
    /// Development in debug builds, silent in release builds
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            TraceMode::Development
        } else {
            TraceMode::Silent
        }
    }
}

impl Default for TraceMode {
    fn default() -> Self {
        Self::from_build()
    }
}

/// Registry of per-subject tick counters
#[derive(Debug, Default)]
pub struct Counter {
    counts: DashMap<String, AtomicU64>,
    mode: TraceMode,
}

impl Counter {
    /// Create an empty registry
    pub fn new(mode: TraceMode) -> Self {
        Self {
            counts: DashMap::new(),
            mode,
        }
    }

    /// Record one tick of `key` and return its running count
    ///
    /// The first tick of a key returns 1.
    pub fn tick(&self, key: &str) -> u64 {
        let count = match self.counts.get(key) {
            Some(counter) => counter.fetch_add(1, Ordering::Relaxed) + 1,
            None => self
                .counts
                .entry(key.to_string())
                .or_insert_with(|| AtomicU64::new(0))
                .fetch_add(1, Ordering::Relaxed)
                + 1,
        };

        if self.mode == TraceMode::Development {
            debug!(key, count, "{} rendered {} times", key, count);
        }

        count
    }

    /// Current count for `key` (0 if never ticked)
    pub fn get(&self, key: &str) -> u64 {
        self.counts
            .get(key)
            .map(|counter| counter.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Forget one key; its next tick starts again at 1
    pub fn reset(&self, key: &str) -> bool {
        self.counts.remove(key).is_some()
    }

    /// Forget every key
    pub fn reset_all(&self) {
        self.counts.clear();
    }

    /// All counts, sorted by key
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut all: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().load(Ordering::Relaxed)))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn mode(&self) -> TraceMode {
        self.mode
    }
}
