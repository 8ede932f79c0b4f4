//! Memolab CLI - memolab command

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli_lib::replay::VariantSelection;
use std::path::PathBuf;
use tracing::Level;

mod cmd;

/// Memolab - replay debounce timelines against naive and latest-ref coalescers
#[derive(Parser)]
#[command(name = "memolab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logs (render ticks, rebuilds, invocations)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: <config dir>/memolab/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file
    Replay {
        /// Scenario TOML file
        file: PathBuf,
        /// naive, latest or both (default: debounce.variant from config)
        #[arg(long)]
        variant: Option<VariantSelection>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a built-in scenario against both variants
    Demo {
        /// typing, rebind or spaced
        #[arg(default_value = "rebind")]
        name: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// View and edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Get a value by key (e.g. debounce.delay_ms)
    Get {
        key: String,
    },
    /// Set a value by key
    Set {
        key: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Show the config file path
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },
    /// Print an annotated example config
    Example,
    /// List accepted keys
    Keys,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Replay { file, variant, json } => {
            cmd::replay::run(&file, variant, json, config_path).await
        }
        Commands::Demo { name, json } => cmd::demo::run(&name, json, config_path).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list(config_path).await,
            ConfigCommands::Get { key } => cmd::config::run_get(&key, config_path).await,
            ConfigCommands::Set { key, value } => {
                cmd::config::run_set(&key, &value, config_path).await
            }
            ConfigCommands::Path { create } => cmd::config::run_path(create, config_path).await,
            ConfigCommands::Example => cmd::config::run_example().await,
            ConfigCommands::Keys => cmd::config::run_keys().await,
        },
    }
}
