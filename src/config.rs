//! Configuration: data file location and user preferences.
//!
//! The storage path is resolved here and handed to the storage engine
//! explicitly; nothing else in the crate consults the environment.

use crate::types::Priority;
use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data file location.
pub const DATA_FILE_ENV: &str = "TICK_FILE";

/// Directory under the home directory holding data and config.
const TICK_DIR: &str = ".tick";

/// Resolve the task data file path: `$TICK_FILE` if set, otherwise
/// `~/.tick/tasks.json`.
pub fn data_path() -> PathBuf {
    match std::env::var_os(DATA_FILE_ENV) {
        Some(path) => PathBuf::from(path),
        None => tick_dir().join("tasks.json"),
    }
}

/// Path of the YAML preferences file.
pub fn config_path() -> PathBuf {
    tick_dir().join("config.yml")
}

fn tick_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(TICK_DIR)
}

/// User preferences merged into commands, loaded from `~/.tick/config.yml`.
///
/// Unknown keys are ignored so the file can carry settings for other
/// front-ends.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Priority applied when `add` does not specify one
    pub priority: Priority,
    /// Tags attached to every new task
    pub tags: Vec<String>,
}

impl UserConfig {
    /// Load preferences from the given file; a missing file yields the
    /// defaults.
    pub fn load(path: &Path) -> Result<UserConfig> {
        if !path.exists() {
            return Ok(UserConfig::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }
}
