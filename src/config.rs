//! Configuration for a query session
//!
//! Paths are passed explicitly to every tool invocation; the process
//! working directory is never changed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::inventory::{InventoryError, scan_bounds};
use crate::query::YearBounds;

/// Errors loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("Failed to parse config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Where the event files, lookup tables and tool binaries live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetroConfig {
    /// Directory of `.EVA`/`.EVN` event files; tools run with this as their cwd
    pub events_dir: PathBuf,

    /// Directory of the JSON lookup tables
    pub tables_dir: PathBuf,

    /// Directory holding bevent/bgame/box; `None` searches `PATH`
    pub bin_dir: Option<PathBuf>,

    /// Explicit season bounds; `None` derives them from the events directory
    pub year_bounds: Option<YearBounds>,
}

impl Default for RetroConfig {
    fn default() -> Self {
        Self {
            events_dir: PathBuf::from("event_files"),
            tables_dir: PathBuf::from("json_files"),
            bin_dir: None,
            year_bounds: None,
        }
    }
}

impl RetroConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> RetroConfigBuilder {
        RetroConfigBuilder::default()
    }

    /// Configured bounds, or the span of the event file inventory
    pub fn resolve_year_bounds(&self) -> Result<YearBounds, InventoryError> {
        match self.year_bounds {
            Some(bounds) => Ok(bounds),
            None => scan_bounds(&self.events_dir),
        }
    }

    /// Parse a TOML configuration
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a TOML configuration file
    ///
    /// Relative directories in the file are resolved against the file's own
    /// directory.
    #[cfg(feature = "config-file")]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Resolve relative directories against `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        let join = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.events_dir = join(&self.events_dir);
        self.tables_dir = join(&self.tables_dir);
        self.bin_dir = self.bin_dir.as_deref().map(join);
        self
    }
}

/// Builder for RetroConfig
#[derive(Debug, Default)]
pub struct RetroConfigBuilder {
    config: RetroConfig,
}

impl RetroConfigBuilder {
    pub fn events_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.events_dir = dir.into();
        self
    }

    pub fn tables_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.tables_dir = dir.into();
        self
    }

    pub fn bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.bin_dir = Some(dir.into());
        self
    }

    /// Fix the season bounds instead of scanning the events directory
    pub fn year_bounds(mut self, first: i32, last: i32) -> Self {
        self.config.year_bounds = Some(YearBounds::new(first, last));
        self
    }

    /// Build the configuration
    pub fn build(self) -> RetroConfig {
        self.config
    }
}
