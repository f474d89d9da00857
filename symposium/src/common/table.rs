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

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use static_assertions::assert_impl_all;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::common::{Journal, SymposiumConfig, TableSettings};
use crate::philosopher::{Fork, Philosopher};

/// Shared context handed to every philosopher and to the monitor.
///
/// Cloning is cheap: all clones point at the same forks, philosophers, journal
/// and adjournment latch. Settings, the start instant and the configuration are
/// fixed at construction and never change.
#[derive(Debug, Clone)]
pub struct Table(Arc<TableInner>);

#[derive(Debug)]
struct TableInner {
    settings: TableSettings,
    config: SymposiumConfig,
    forks: Vec<Fork>,
    philosophers: Vec<Philosopher>,
    journal: Journal,
    /// One-way latch: once cancelled, the run is over for everyone.
    adjournment: CancellationToken,
}

assert_impl_all!(Table: Send, Sync);

impl Table {
    /// Lays out the forks and seats the philosophers.
    ///
    /// The start instant is captured here. It stamps every journal line and is
    /// the initial last-meal time of every philosopher.
    pub fn new(
        settings: TableSettings,
        config: SymposiumConfig,
        out: impl Write + Send + 'static,
    ) -> Self {
        let seats = settings.philosophers();
        let start = Instant::now();

        let forks = (1..=seats).map(Fork::new).collect();
        let philosophers = (0..seats)
            .map(|seat| Philosopher::seat(seat, seats, start))
            .collect();
        trace!(seats, "table laid");

        Self(Arc::new(TableInner {
            settings,
            config,
            forks,
            philosophers,
            journal: Journal::new(start, out),
            adjournment: CancellationToken::new(),
        }))
    }

    /// The run parameters.
    #[inline]
    pub fn settings(&self) -> &TableSettings {
        &self.0.settings
    }

    /// The ambient configuration this table runs with.
    #[inline]
    pub fn config(&self) -> &SymposiumConfig {
        &self.0.config
    }

    /// When the run started.
    #[inline]
    pub fn start(&self) -> Instant {
        self.0.journal.start()
    }

    /// All forks, indexed by position on the ring.
    #[inline]
    pub fn forks(&self) -> &[Fork] {
        &self.0.forks
    }

    /// The fork at ring position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not smaller than the number of philosophers.
    #[inline]
    pub fn fork(&self, index: usize) -> &Fork {
        &self.0.forks[index]
    }

    /// All philosophers, in seat order.
    #[inline]
    pub fn philosophers(&self) -> &[Philosopher] {
        &self.0.philosophers
    }

    /// The philosopher at 0-based `seat`.
    ///
    /// # Panics
    ///
    /// Panics if `seat` is not smaller than the number of philosophers.
    #[inline]
    pub fn philosopher(&self, seat: usize) -> &Philosopher {
        &self.0.philosophers[seat]
    }

    /// The event journal.
    #[inline]
    pub fn journal(&self) -> &Journal {
        &self.0.journal
    }

    /// Whether the run is over.
    #[inline]
    pub fn is_adjourned(&self) -> bool {
        self.0.adjournment.is_cancelled()
    }

    /// Resolves once the run is over.
    pub async fn adjourned(&self) {
        self.0.adjournment.cancelled().await;
    }

    /// Ends the run. Idempotent; the latch never resets.
    pub(crate) fn adjourn(&self) {
        if !self.0.adjournment.is_cancelled() {
            trace!("table adjourned");
        }
        self.0.adjournment.cancel();
    }
}
