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

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

/// Rejected run parameters, detected before any philosopher is seated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The table must seat at least one philosopher.
    #[error("a table needs at least one philosopher")]
    NoPhilosophers,
}

/// A configuration file that exists but could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The XDG base directories could not be determined.
    #[error("failed to initialize XDG directories: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    /// The file could not be read.
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid configuration.
    #[error("failed to parse configuration file {}: {source}", .path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// The TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Failures surfaced while joining a running table.
#[derive(Debug, Error)]
pub enum SymposiumError {
    /// The Tokio runtime for a blocking run could not be built.
    #[error("failed to build the runtime: {0}")]
    Runtime(#[from] io::Error),
    /// The monitor task panicked or was aborted before reaching a verdict.
    #[error("monitor task failed: {0}")]
    MonitorFailed(#[source] JoinError),
    /// A philosopher task panicked or was aborted.
    #[error("philosopher {philosopher} task failed: {source}")]
    PhilosopherFailed {
        /// 1-based id of the failed philosopher.
        philosopher: usize,
        /// The underlying join failure.
        #[source]
        source: JoinError,
    },
}
