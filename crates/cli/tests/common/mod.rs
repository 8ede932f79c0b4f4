//! Common utilities for integration tests

pub mod cli;

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding a config file and scenario files
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Create a workspace with a silent-trace config
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        std::fs::write(
            dir.path().join("config.toml"),
            "[counter]\ntrace = \"silent\"\n[replay]\nsettle_ms = 20\n",
        )?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write a scenario file and return its path
    pub fn write_scenario(&self, name: &str, text: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, text)?;
        Ok(path)
    }
}
