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

use std::io::{self, Write};

use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::common::config::CONFIG;
use crate::common::{SymposiumConfig, SymposiumError, SymposiumRuntime, Table, TableSettings};
use crate::monitor::{Monitor, Summary};
use crate::philosopher::dine;

/// Entry point for seating philosophers and starting a run.
///
/// The primary ways to use it are via:
/// - [`SymposiumApp::launch_async()`] - inside an existing Tokio runtime
/// - [`SymposiumApp::launch_with()`] - same, with explicit configuration and output
/// - [`SymposiumApp::run()`] - from synchronous code, blocking until the run ends
#[derive(Default, Debug, Clone)]
pub struct SymposiumApp;

impl SymposiumApp {
    /// Starts a run that journals to standard output using the global configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use symposium::prelude::*;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let settings = TableSettings::from_millis(4, 410, 200, 200, None)?;
    ///     let summary = SymposiumApp::launch_async(settings).await.join().await?;
    ///     println!("{:?}", summary.outcome);
    ///     Ok(())
    /// }
    /// ```
    pub async fn launch_async(settings: TableSettings) -> SymposiumRuntime {
        Self::launch_with(settings, CONFIG.clone(), io::stdout()).await
    }

    /// Starts a run with an explicit configuration, journaling to `out`.
    ///
    /// Lays the table, spawns one task per philosopher in seat order (pausing
    /// for the configured launch stagger between spawns), then spawns the
    /// monitor. Must be called from within a Tokio runtime.
    pub async fn launch_with(
        settings: TableSettings,
        config: SymposiumConfig,
        out: impl Write + Send + 'static,
    ) -> SymposiumRuntime {
        trace!("Laying table: {:?}", settings);
        let stagger = config.launch_stagger();
        let table = Table::new(settings, config, out);

        let mut philosophers: Vec<JoinHandle<()>> = Vec::with_capacity(settings.philosophers());
        for seat in 0..settings.philosophers() {
            philosophers.push(tokio::spawn(dine(table.clone(), seat)));
            if !stagger.is_zero() {
                tokio::time::sleep(stagger).await;
            }
        }
        debug!(count = philosophers.len(), "philosophers seated");

        let monitor = tokio::spawn(Monitor::new(table.clone()).watch());

        SymposiumRuntime {
            table,
            philosophers,
            monitor,
        }
    }

    /// Runs a whole simulation from synchronous code and returns its summary.
    ///
    /// Builds a dedicated multi-threaded runtime, journals to standard output
    /// and blocks until every task has finished.
    ///
    /// # Panics
    ///
    /// Panics if called from within an existing Tokio runtime. Use
    /// [`launch_async()`](Self::launch_async) instead when in an async context.
    ///
    /// # Errors
    ///
    /// Returns [`SymposiumError::Runtime`] if the runtime cannot be built, or the
    /// join error of a failed task.
    pub fn run(settings: TableSettings) -> Result<Summary, SymposiumError> {
        Self::run_with(settings, CONFIG.clone(), io::stdout())
    }

    /// Like [`run()`](Self::run) with explicit configuration and output.
    ///
    /// # Panics
    ///
    /// Panics if called from within an existing Tokio runtime.
    ///
    /// # Errors
    ///
    /// Same as [`run()`](Self::run).
    pub fn run_with(
        settings: TableSettings,
        config: SymposiumConfig,
        out: impl Write + Send + 'static,
    ) -> Result<Summary, SymposiumError> {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "SymposiumApp::run() was called from within a Tokio runtime. \
             Use SymposiumApp::launch_async().await instead when in an async context."
        );

        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        rt.block_on(async move { Self::launch_with(settings, config, out).await.join().await })
    }
}
