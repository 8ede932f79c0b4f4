//! Replay a built-in scenario against both variants

use anyhow::Result;
use cli_lib::config;
use cli_lib::replay::{self, ReplayOptions, VariantSelection};
use cli_lib::scenario::{Scenario, BUILTIN_SCENARIOS};
use std::path::Path;

pub async fn run(name: &str, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    let scenario = match Scenario::builtin(name) {
        Some(scenario) => scenario,
        None => anyhow::bail!(
            "Unknown demo '{}'. Available: {}",
            name,
            BUILTIN_SCENARIOS.join(", ")
        ),
    };

    let options = ReplayOptions {
        selection: VariantSelection::Both,
        default_delay: config.delay()?,
        settle: config.settle(),
        trace: config.counter.trace,
    };

    let result = replay::replay(&scenario, &options).await?;
    super::replay::print_report(&result, json)
}
