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

//! Symposium CLI.
//!
//! ```text
//! symposium <number_of_philosophers> <time_to_die> <time_to_eat> <time_to_sleep> [meals]
//! ```
//!
//! Journal lines go to stdout, diagnostics to the configured log file.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use symposium::prelude::*;

#[derive(Parser)]
#[command(name = "symposium")]
#[command(version)]
#[command(about = "Dining philosophers simulation")]
struct Cli {
    /// Number of philosophers, and of forks
    number_of_philosophers: usize,

    /// Milliseconds a philosopher survives without starting a meal
    time_to_die: u64,

    /// Milliseconds spent eating with both forks
    time_to_eat: u64,

    /// Milliseconds spent sleeping after a meal
    time_to_sleep: u64,

    /// Meals every philosopher must finish before the run ends (0 or absent: until someone dies)
    number_of_times_each_philosopher_must_eat: Option<u32>,
}

fn initialize_tracing(config: &SymposiumConfig) -> Result<Option<WorkerGuard>> {
    if !config.behavior.enable_tracing {
        return Ok(None);
    }

    std::fs::create_dir_all(&config.paths.log_directory)?;
    let file_appender = RollingFileAppender::new(
        Rotation::NEVER,
        &config.paths.log_directory,
        &config.paths.log_filename,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.tracing.level))?;

    let subscriber = FmtSubscriber::builder()
        .with_span_events(FmtSpan::NONE)
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Loaded before tracing exists, so the fallback reason is logged afterwards.
    let (config, config_error) = match SymposiumConfig::try_load() {
        Ok(config) => (config, None),
        Err(e) => (SymposiumConfig::default(), Some(e)),
    };
    let _guard = initialize_tracing(&config)?;
    info!("** Symposium startup **");
    if let Some(e) = config_error {
        error!("{}, using defaults", e);
    }

    let settings = TableSettings::from_millis(
        cli.number_of_philosophers,
        cli.time_to_die,
        cli.time_to_eat,
        cli.time_to_sleep,
        cli.number_of_times_each_philosopher_must_eat,
    )?;

    let summary = SymposiumApp::launch_with(settings, config, io::stdout())
        .await
        .join()
        .await?;

    match summary.outcome {
        Outcome::Starved {
            philosopher,
            hungry_for,
        } => warn!(
            philosopher,
            hungry_ms = hungry_for.as_millis(),
            "run ended by starvation"
        ),
        Outcome::Satiated => info!("run ended with every philosopher fed"),
    }
    info!(meals = ?summary.meals, "** Symposium shutdown **");
    Ok(())
}
