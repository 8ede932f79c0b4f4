//! Rendering replay reports for the terminal

use crate::replay::{ReplayReport, VariantReport};
use anyhow::{Context, Result};
use memolab_core::Variant;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Pretty-printed JSON
pub fn to_json(report: &ReplayReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize replay report")
}

/// Human-readable comparison
pub fn to_text(report: &ReplayReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", "Scenario".bold(), report.scenario.cyan());
    let _ = writeln!(
        out,
        "{}",
        format!("delay {}ms, {} triggers", report.delay_ms, report.triggers).dimmed()
    );
    let _ = writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for lane in &report.variants {
        out.push('\n');
        write_lane(&mut out, lane);
    }

    if let (Some(naive), Some(latest)) = (
        report.variant(Variant::Naive),
        report.variant(Variant::Latest),
    ) {
        let lost = latest.invocations.len().saturating_sub(naive.invocations.len());
        out.push('\n');
        if lost > 0 {
            let _ = writeln!(
                out,
                "{} naive variant dropped {} call(s) the latest variant delivered",
                "✗".red(),
                lost
            );
        } else {
            let _ = writeln!(out, "{} both variants delivered the same calls", "✓".green());
        }
    }

    out
}

fn write_lane(out: &mut String, lane: &VariantReport) {
    let label = match lane.variant {
        Variant::Naive => format!("{}", "❌ naive (broken)".red()),
        Variant::Latest => format!("{}", "✅ latest (fixed)".green()),
    };
    let _ = writeln!(out, "{}", label.bold());
    let _ = writeln!(out, "  {:<12} {}", "renders:".cyan(), lane.renders);
    let _ = writeln!(out, "  {:<12} {}", "rebuilds:".cyan(), lane.rebuilds);
    let _ = writeln!(
        out,
        "  {:<12} {} triggered, {} fired, {} superseded, {} cancelled",
        "timers:".cyan(),
        lane.stats.triggers,
        lane.stats.fires,
        lane.stats.superseded,
        lane.stats.cancelled
    );

    if lane.invocations.is_empty() {
        let _ = writeln!(out, "  {}", "no invocations".yellow());
    }
    for call in &lane.invocations {
        let _ = writeln!(out, "  {:>6}ms  action({:?})", call.at_ms, call.args);
    }
}
