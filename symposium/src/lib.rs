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

#![forbid(unsafe_code)]
#![forbid(missing_docs)]

//! # Symposium
//!
//! A dining-philosophers simulation built on Tokio. Philosophers sit around a
//! ring of forks, each needing the two forks beside them to eat, while a
//! monitor watches every philosopher's last meal and ends the run on the first
//! starvation or once everyone has eaten enough.
//!
//! ## Key Concepts
//!
//! - **Forks (`Fork`)**: exclusive resources, each owning its own async lock.
//!   Holding a fork is holding a [`HeldFork`] token; dropping it puts the fork down.
//! - **Philosophers (`Philosopher`)**: one task each, cycling think, take forks,
//!   eat, sleep. Their `Vitals` (last meal start, meals eaten) sit behind a lock
//!   shared with the monitor.
//! - **Monitor (`Monitor`)**: scans all vitals, journals a death, and trips the
//!   table's one-way adjournment latch.
//! - **Journal (`Journal`)**: serializes `<elapsed_ms> <id> <message>` lines and
//!   seals itself once the run is over.
//! - **Runtime (`SymposiumRuntime`)**: returned by [`SymposiumApp`], joins every
//!   task and reports a [`Summary`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use symposium::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = TableSettings::from_millis(5, 800, 200, 200, Some(3))?;
//!     let summary = SymposiumApp::launch_async(settings).await.join().await?;
//!     assert_eq!(summary.outcome, Outcome::Satiated);
//!     Ok(())
//! }
//! ```

/// Runtime plumbing: settings, configuration, the shared table, journal and launch.
pub(crate) mod common;

/// Forks, philosophers and the dining loop.
pub(crate) mod philosopher;

/// The starvation and satiation monitor.
pub(crate) mod monitor;

/// A prelude module for conveniently importing the most commonly used items.
///
/// # Re-exports
///
/// *   [`crate::common::SymposiumApp`]: Entry point that seats the philosophers and starts the run.
/// *   [`crate::common::SymposiumRuntime`]: Handle to a running table.
/// *   [`crate::common::TableSettings`]: Validated run parameters.
/// *   [`crate::common::SymposiumConfig`]: Ambient configuration loaded from XDG locations.
/// *   [`crate::common::Journal`] and [`crate::common::Activity`]: The event line sink.
/// *   [`crate::common::Table`]: The shared table context.
/// *   [`crate::philosopher::Fork`], [`crate::philosopher::HeldFork`], [`crate::philosopher::Philosopher`], [`crate::philosopher::Vitals`].
/// *   [`crate::monitor::Monitor`], [`crate::monitor::Verdict`], [`crate::monitor::Outcome`], [`crate::monitor::Summary`].
/// *   [`crate::common::SettingsError`], [`crate::common::ConfigError`] and [`crate::common::SymposiumError`].
pub mod prelude {
    pub use crate::common::{
        Activity, ConfigError, Journal, SettingsError, SymposiumApp, SymposiumConfig, SymposiumError,
        SymposiumRuntime, Table, TableSettings,
    };
    pub use crate::monitor::{Monitor, Outcome, Summary, Verdict};
    pub use crate::philosopher::{Fork, HeldFork, Philosopher, Vitals};
}

pub use common::config;
pub use prelude::*;
