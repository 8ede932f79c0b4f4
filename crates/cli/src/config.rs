//! User configuration
//!
//! Stored as TOML at `<config_dir>/memolab/config.toml` unless a path is
//! given explicitly. A missing default file means defaults.

use anyhow::{Context, Result};
use memolab_core::{delay_from_millis, TraceMode, Variant, DEFAULT_DELAY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound accepted for delays and settle times
const MAX_MILLIS: i64 = 60_000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemolabConfig {
    pub debounce: DebounceConfig,
    pub counter: CounterConfig,
    pub replay: ReplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Variant replayed when `--variant` is not given
    pub variant: Variant,
    /// Delay for scenarios without `delay_ms`
    pub delay_ms: i64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            delay_ms: DEFAULT_DELAY.as_millis() as i64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub trace: TraceMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Extra wait after the last possible timer
    pub settle_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { settle_ms: 50 }
    }
}

impl MemolabConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        delay_from_millis(self.debounce.delay_ms).context("debounce.delay_ms")?;
        if self.debounce.delay_ms > MAX_MILLIS {
            anyhow::bail!(
                "debounce.delay_ms must be at most {} (got {})",
                MAX_MILLIS,
                self.debounce.delay_ms
            );
        }
        if self.replay.settle_ms > MAX_MILLIS as u64 {
            anyhow::bail!(
                "replay.settle_ms must be at most {} (got {})",
                MAX_MILLIS,
                self.replay.settle_ms
            );
        }
        Ok(())
    }

    /// Configured default delay
    pub fn delay(&self) -> Result<Duration> {
        Ok(delay_from_millis(self.debounce.delay_ms)?)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.replay.settle_ms)
    }

    /// Read a value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "debounce.variant" => self.debounce.variant.to_string(),
            "debounce.delay_ms" => self.debounce.delay_ms.to_string(),
            "counter.trace" => trace_name(self.counter.trace).to_string(),
            "replay.settle_ms" => self.replay.settle_ms.to_string(),
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'memolab config list' to see available keys.",
                key
            ),
        };
        Ok(value)
    }

    /// Set a value by dotted key, then validate
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "debounce.variant" => {
                self.debounce.variant = value
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
            }
            "debounce.delay_ms" => {
                self.debounce.delay_ms = value
                    .parse()
                    .context("Invalid value: must be an integer")?;
            }
            "counter.trace" => {
                self.counter.trace = match value {
                    "development" | "dev" => TraceMode::Development,
                    "silent" => TraceMode::Silent,
                    _ => anyhow::bail!("Invalid value: must be 'development' or 'silent'"),
                };
            }
            "replay.settle_ms" => {
                self.replay.settle_ms = value
                    .parse()
                    .context("Invalid value: must be a non-negative integer")?;
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'memolab config list' to see available keys.",
                key
            ),
        }

        self.validate().context("Invalid configuration value")
    }
}

/// Keys accepted by [`MemolabConfig::get`] and [`MemolabConfig::set`]
pub const KEYS: [&str; 4] = [
    "debounce.variant",
    "debounce.delay_ms",
    "counter.trace",
    "replay.settle_ms",
];

pub fn trace_name(mode: TraceMode) -> &'static str {
    match mode {
        TraceMode::Development => "development",
        TraceMode::Silent => "silent",
    }
}

/// Default config file location
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("memolab").join("config.toml"))
}

/// Resolve an explicit path or the default location
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_file_path().context("Could not determine config file path"),
    }
}

/// Load configuration
///
/// An explicit path must exist. The default path may be missing.
pub fn load(explicit: Option<&Path>) -> Result<MemolabConfig> {
    let path = resolve_path(explicit)?;
    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(MemolabConfig::default());
    }
    load_from(&path)
}

/// Parse and validate a config file
pub fn load_from(path: &Path) -> Result<MemolabConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: MemolabConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Write configuration, creating parent directories
pub fn save(config: &MemolabConfig, path: &Path) -> Result<()> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))
}

/// Create the file with defaults if it does not exist
///
/// Returns true if a file was written.
pub fn init_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save(&MemolabConfig::default(), path)?;
    Ok(true)
}

/// Annotated example file
pub fn example_config() -> &'static str {
    r#"# memolab configuration

[debounce]
# Variant replayed when --variant is not given: "naive" (alias "broken")
# or "latest" (alias "fixed")
variant = "latest"
# Delay for scenarios that do not set delay_ms (0-60000)
delay_ms = 250

[counter]
# "development" logs every render tick at debug level, "silent" only counts
trace = "development"

[replay]
# Extra wait after the last timer could have fired (0-60000)
settle_ms = 50
"#
}
