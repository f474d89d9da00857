/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::path::{Path, PathBuf};
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Ambient configuration for Symposium.
///
/// Run parameters (philosopher count, durations, meals target) are not part of
/// this struct; they come from [`TableSettings`](crate::common::TableSettings).
/// This struct only tunes how the engine runs, and is loaded from TOML files in
/// XDG-compliant directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymposiumConfig {
    /// Monitor tuning
    pub monitor: MonitorConfig,
    /// Philosopher launch tuning
    pub launch: LaunchConfig,
    /// Tracing and logging configuration
    pub tracing: TracingConfig,
    /// Path configuration for diagnostic output
    pub paths: PathsConfig,
    /// Behavioral configuration switches
    pub behavior: BehaviorConfig,
}

/// Monitor polling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Pause between two scans of the table, in microseconds. Zero only yields.
    pub poll_interval_us: u64,
}

/// Philosopher launch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Delay between spawning two consecutive philosophers, in microseconds.
    pub stagger_us: u64,
}

/// Tracing and logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub level: String,
}

/// Path configuration for diagnostic output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory for diagnostic log files
    pub log_directory: String,
    /// File name of the diagnostic log inside `log_directory`
    pub log_filename: String,
}

/// Behavioral configuration switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Enable diagnostic tracing to the log file
    pub enable_tracing: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_us: 1_000,
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self { stagger_us: 0 }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_directory: "logs".to_string(),
            log_filename: "symposium.log".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            enable_tracing: true,
        }
    }
}

impl SymposiumConfig {
    /// Pause between two monitor scans.
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.monitor.poll_interval_us)
    }

    /// Delay between two philosopher spawns.
    pub const fn launch_stagger(&self) -> Duration {
        Duration::from_micros(self.launch.stagger_us)
    }

    /// Full path of the diagnostic log file.
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.log_directory).join(&self.paths.log_filename)
    }

    /// Parses a configuration from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML error when the text is not a valid configuration.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] naming the file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads configuration from XDG-compliant locations, reporting failures.
    ///
    /// Looks for `symposium/config.toml` under `$XDG_CONFIG_HOME` (falling back
    /// to `~/.config`) and the XDG system config directories. A missing file is
    /// not an error and yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a configuration file exists but cannot be
    /// read or parsed, or when the XDG directories cannot be determined.
    pub fn try_load() -> Result<Self, ConfigError> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("symposium")?;
        match xdg_dirs.find_config_file("config.toml") {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// Same search as [`try_load()`](Self::try_load). If a configuration file
    /// exists but is malformed, logs the error and uses defaults.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::error!("{}, using defaults", e);
            Self::default()
        })
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: SymposiumConfig = SymposiumConfig::load();
}
