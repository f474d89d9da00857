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

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{error, trace};

use crate::common::{SymposiumError, Table};
use crate::monitor::{Outcome, Summary};

/// A running table, obtained from [`SymposiumApp`](crate::common::SymposiumApp).
///
/// The run ends on its own when the monitor reaches a verdict; [`join`](Self::join)
/// waits for that and for every philosopher to leave.
#[derive(Debug)]
pub struct SymposiumRuntime {
    pub(crate) table: Table,
    pub(crate) philosophers: Vec<JoinHandle<()>>,
    pub(crate) monitor: JoinHandle<Outcome>,
}

impl SymposiumRuntime {
    /// The shared table of this run.
    #[inline]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Waits for the monitor's verdict and for every philosopher task to finish.
    ///
    /// # Errors
    ///
    /// Returns [`SymposiumError::MonitorFailed`] if the monitor task failed; the
    /// table is adjourned first so the philosophers still leave. Returns
    /// [`SymposiumError::PhilosopherFailed`] for the first philosopher task that
    /// panicked.
    pub async fn join(self) -> Result<Summary, SymposiumError> {
        let Self {
            table,
            philosophers,
            monitor,
        } = self;

        let outcome = match monitor.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Monitor task failed: {:?}", e);
                table.adjourn();
                table.journal().seal();
                join_all(philosophers).await;
                return Err(SymposiumError::MonitorFailed(e));
            }
        };
        trace!("Monitor verdict: {:?}, waiting for philosophers", outcome);

        for (seat, result) in join_all(philosophers).await.into_iter().enumerate() {
            result.map_err(|source| SymposiumError::PhilosopherFailed {
                philosopher: seat + 1,
                source,
            })?;
        }

        let meals = table
            .philosophers()
            .iter()
            .map(|philosopher| philosopher.snapshot().meals_eaten())
            .collect();
        trace!("All philosophers left the table");
        Ok(Summary { outcome, meals })
    }
}
