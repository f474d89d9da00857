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

//! Testing utilities for Symposium tables.
//!
//! Import everything through the [`prelude`]:
//!
//! ```rust,ignore
//! use symposium_test::prelude::*;
//!
//! #[symposium_test]
//! async fn lone_philosopher_starves() -> anyhow::Result<()> {
//!     initialize_tracing();
//!     Ok(())
//! }
//! ```

use std::sync::Once;

use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[doc(hidden)]
pub mod panic_capture;

/// Re-exports for test modules.
pub mod prelude {
    pub use super::initialize_tracing;
    pub use symposium_test_macro::symposium_test;
}

static INIT: Once = Once::new();

/// Installs the global tracing subscriber used by the test suites.
///
/// Diagnostics go to `logs/symposium_tests.txt` so they never mix with journal
/// output captured by the tests. Safe to call from every test; only the first
/// call has an effect.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        if let Err(e) = std::fs::create_dir_all("logs") {
            eprintln!("could not create logs dir: {e}");
            return;
        }

        let file_appender = RollingFileAppender::new(Rotation::NEVER, "logs", "symposium_tests.txt");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Leak the guard so the writer outlives every test thread.
        Box::leak(Box::new(guard));

        let filter = EnvFilter::new("trace")
            .add_directive("symposium::philosopher=trace".parse().unwrap())
            .add_directive("symposium::monitor=trace".parse().unwrap())
            .add_directive("symposium::common=debug".parse().unwrap())
            .add_directive("tokio=info".parse().unwrap())
            .add_directive(tracing_subscriber::filter::LevelFilter::TRACE.into());

        let subscriber = FmtSubscriber::builder()
            .with_span_events(FmtSpan::NONE)
            .with_max_level(Level::TRACE)
            .compact()
            .with_line_number(true)
            .with_target(true)
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("a global tracing subscriber was already installed");
        }
    });
}
