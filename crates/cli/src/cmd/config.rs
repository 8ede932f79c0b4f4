//! Configuration management command
//!
//! Provides CLI interface to view and edit the memolab configuration.

use anyhow::Result;
use cli_lib::config::{self, trace_name};
use owo_colors::OwoColorize;
use std::path::Path;

/// List all configuration values
pub async fn run_list(config_path: Option<&Path>) -> Result<()> {
    let path = config::resolve_path(config_path)?;
    let config = config::load(config_path)?;

    println!("{}", "Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), path.display().dimmed());

    println!("{}", "[debounce]".yellow());
    println!("  {} = {}", "variant".cyan(), config.debounce.variant);
    println!(
        "  {} = {} {}",
        "delay_ms".cyan(),
        config.debounce.delay_ms,
        format!("({}ms)", config.debounce.delay_ms).dimmed()
    );

    println!("\n{}", "[counter]".yellow());
    println!("  {} = {}", "trace".cyan(), trace_name(config.counter.trace));

    println!("\n{}", "[replay]".yellow());
    println!("  {} = {}", "settle_ms".cyan(), config.replay.settle_ms);

    println!("\n{}", "Valid Ranges:".bold());
    println!("  variant: naive | latest (aliases: broken | fixed)");
    println!("  delay_ms: 0-60000");
    println!("  trace: development | silent");
    println!("  settle_ms: 0-60000");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str, config_path: Option<&Path>) -> Result<()> {
    let path = config::resolve_path(config_path)?;
    let mut config = if path.exists() {
        config::load_from(&path)?
    } else {
        Default::default()
    };

    config.set(key, value)?;
    config::save(&config, &path)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool, config_path: Option<&Path>) -> Result<()> {
    let path = config::resolve_path(config_path)?;

    if create && config::init_if_missing(&path)? {
        println!("{} Created config file at: {}", "✓".green(), path.display());
    } else if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{}", path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    println!("{}", config::example_config());
    Ok(())
}

/// List the keys accepted by get/set
pub async fn run_keys() -> Result<()> {
    for key in config::KEYS {
        println!("{}", key);
    }
    Ok(())
}
