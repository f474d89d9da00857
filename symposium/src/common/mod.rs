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

//! Runtime plumbing shared by the philosophers and the monitor.
//!
//! # Key Re-exported Components:
//!
//! *   [`SymposiumApp`]: Seats the philosophers and starts a run.
//! *   [`SymposiumRuntime`]: A running table, joined for its [`Summary`](crate::monitor::Summary).
//! *   [`Table`]: The shared context every task holds a clone of.
//! *   [`TableSettings`]: Validated run parameters.
//! *   [`Journal`]: The serialized event line sink.
//! *   [`SymposiumConfig`]: Ambient configuration from XDG locations.

pub use config::SymposiumConfig;
pub use errors::{ConfigError, SettingsError, SymposiumError};
pub use journal::{Activity, Journal};
pub use settings::TableSettings;
pub use symposium_app::SymposiumApp;
pub use symposium_runtime::SymposiumRuntime;
pub use table::Table;

/// Defines the configuration system for Symposium.
pub mod config;
/// Error types.
mod errors;
/// Defines the `Journal` event sink.
mod journal;
/// Defines the validated run parameters.
mod settings;
/// Defines the `SymposiumApp` entry point.
mod symposium_app;
/// Defines the `SymposiumRuntime` handle of a running table.
mod symposium_runtime;
/// Defines the shared `Table` context.
mod table;
