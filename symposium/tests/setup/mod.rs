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
#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use symposium::prelude::*;

/// In-memory journal output shared between the table and the test.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    /// Every journal line written so far, parsed.
    pub fn lines(&self) -> Vec<JournalLine> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(JournalLine::parse)
            .collect()
    }
}

/// One `<elapsed_ms> <id> <message>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalLine {
    pub elapsed_ms: u64,
    pub philosopher: usize,
    pub message: String,
}

impl JournalLine {
    pub fn parse(line: &str) -> Self {
        let mut fields = line.splitn(3, ' ');
        let elapsed_ms = fields
            .next()
            .and_then(|f| f.parse().ok())
            .unwrap_or_else(|| panic!("bad timestamp in {line:?}"));
        let philosopher = fields
            .next()
            .and_then(|f| f.parse().ok())
            .unwrap_or_else(|| panic!("bad philosopher id in {line:?}"));
        let message = fields
            .next()
            .unwrap_or_else(|| panic!("missing message in {line:?}"))
            .to_string();
        Self {
            elapsed_ms,
            philosopher,
            message,
        }
    }

    pub fn is(&self, activity: Activity) -> bool {
        self.message == activity.message()
    }
}

/// Ambient configuration for tests: tight polling, no stagger.
pub fn test_config() -> SymposiumConfig {
    let mut config = SymposiumConfig::default();
    config.monitor.poll_interval_us = 500;
    config.launch.stagger_us = 0;
    config
}

/// Runs a table to completion, returning the summary and the journal lines.
pub async fn run_table(
    settings: TableSettings,
    config: SymposiumConfig,
) -> anyhow::Result<(Summary, Vec<JournalLine>)> {
    let buffer = SharedBuffer::default();
    let runtime = SymposiumApp::launch_with(settings, config, buffer.clone()).await;
    let summary = runtime.join().await?;
    Ok((summary, buffer.lines()))
}

/// Number of lines with `activity` for 1-based `philosopher`.
pub fn count(lines: &[JournalLine], philosopher: usize, activity: Activity) -> usize {
    lines
        .iter()
        .filter(|line| line.philosopher == philosopher && line.is(activity))
        .count()
}
