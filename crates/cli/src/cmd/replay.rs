//! Replay a scenario file

use anyhow::{Context, Result};
use cli_lib::config;
use cli_lib::replay::{self, ReplayOptions, VariantSelection};
use cli_lib::{report, Scenario};
use std::path::Path;

pub async fn run(
    file: &Path,
    selection: Option<VariantSelection>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load(config_path)?;
    let scenario = Scenario::load(file)?;

    let options = ReplayOptions {
        selection: selection.unwrap_or(VariantSelection::One(config.debounce.variant)),
        default_delay: config.delay()?,
        settle: config.settle(),
        trace: config.counter.trace,
    };

    let result = replay::replay(&scenario, &options)
        .await
        .with_context(|| format!("Replay of '{}' failed", scenario.name))?;

    print_report(&result, json)
}

pub(crate) fn print_report(result: &replay::ReplayReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report::to_json(result)?);
    } else {
        print!("{}", report::to_text(result));
    }
    Ok(())
}
