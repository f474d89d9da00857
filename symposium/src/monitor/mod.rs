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

//! The monitor watches every philosopher and decides when the run ends.
//!
//! A scan walks the philosophers in id order, each under its own vitals lock.
//! The first philosopher whose last meal started more than `time_to_die` ago is
//! declared dead on the spot: the "died" line is journaled, the journal sealed
//! and the table adjourned before the lock is released, and the rest of the
//! table is not looked at. Without a death, a run with a meals target ends
//! once every philosopher has finished at least that many meals.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, trace};

use crate::common::{Activity, Table};

/// Result of one scan of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nobody starved and the meals target, if any, is not reached yet.
    Continue,
    /// A philosopher starved. The table has been adjourned.
    Starved {
        /// 1-based id of the dead philosopher.
        philosopher: usize,
        /// Time since that philosopher's last meal started.
        hungry_for: Duration,
    },
    /// Everyone reached the meals target. The table has been adjourned.
    Satiated,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A philosopher starved.
    Starved {
        /// 1-based id of the dead philosopher.
        philosopher: usize,
        /// Time since that philosopher's last meal started, when detected.
        hungry_for: Duration,
    },
    /// Every philosopher reached the meals target.
    Satiated,
}

/// Final report of a joined run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// How the run ended.
    pub outcome: Outcome,
    /// Finished meals per philosopher, in id order.
    pub meals: Vec<u32>,
}

/// Supervises one table. The only component that adjourns it.
#[derive(Debug, Clone)]
pub struct Monitor {
    table: Table,
}

impl Monitor {
    /// Creates a monitor for `table`.
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Checks every philosopher once, as of `now`.
    ///
    /// A returned [`Verdict::Starved`] or [`Verdict::Satiated`] has already
    /// sealed the journal and adjourned the table.
    pub fn scan(&self, now: Instant) -> Verdict {
        let settings = self.table.settings();
        let target = settings.meals_target();
        let mut satiated = 0usize;

        for philosopher in self.table.philosophers() {
            let vitals = philosopher.vitals();
            let hungry_for = vitals.hungry_for(now);
            if hungry_for > settings.time_to_die() {
                self.table
                    .journal()
                    .seal_with(philosopher.id(), Activity::Died);
                self.table.adjourn();
                drop(vitals);
                info!(
                    philosopher = philosopher.id(),
                    hungry_ms = hungry_for.as_millis(),
                    "philosopher starved"
                );
                return Verdict::Starved {
                    philosopher: philosopher.id(),
                    hungry_for,
                };
            }
            if target.is_some_and(|target| vitals.meals_eaten() >= target.get()) {
                satiated += 1;
            }
        }

        if target.is_some() && satiated == self.table.philosophers().len() {
            self.table.journal().seal();
            self.table.adjourn();
            info!("every philosopher reached the meals target");
            return Verdict::Satiated;
        }

        Verdict::Continue
    }

    /// Scans until a verdict ends the run.
    ///
    /// Between scans the monitor pauses for the configured poll interval, or
    /// only yields to the scheduler when that interval is zero.
    #[instrument(skip(self))]
    pub async fn watch(self) -> Outcome {
        let interval = self.table.config().poll_interval();
        debug!(poll_interval_us = interval.as_micros(), "monitor watching");
        let mut scans: u64 = 0;

        loop {
            scans += 1;
            match self.scan(Instant::now()) {
                Verdict::Continue => {}
                Verdict::Starved {
                    philosopher,
                    hungry_for,
                } => {
                    trace!(scans, "monitor done");
                    return Outcome::Starved {
                        philosopher,
                        hungry_for,
                    };
                }
                Verdict::Satiated => {
                    trace!(scans, "monitor done");
                    return Outcome::Satiated;
                }
            }

            if interval.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(interval).await;
            }
        }
    }
}
