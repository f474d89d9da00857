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
use symposium::prelude::*;

use crate::setup::*;

mod setup;

#[test]
fn run_blocks_until_the_table_is_cleared() -> anyhow::Result<()> {
    let buffer = SharedBuffer::default();
    let settings = TableSettings::from_millis(2, 400, 20, 20, Some(2))?;
    let summary = SymposiumApp::run_with(settings, test_config(), buffer.clone())?;

    assert_eq!(summary.outcome, Outcome::Satiated);
    assert_eq!(summary.meals.len(), 2);
    assert!(summary.meals.iter().all(|&meals| meals >= 2));
    assert!(!buffer.lines().is_empty());
    Ok(())
}

#[test]
fn run_reports_a_lone_death() -> anyhow::Result<()> {
    let buffer = SharedBuffer::default();
    let settings = TableSettings::from_millis(1, 60, 10, 10, Some(1))?;
    let summary = SymposiumApp::run_with(settings, test_config(), buffer.clone())?;

    assert!(matches!(summary.outcome, Outcome::Starved { philosopher: 1, .. }));
    assert!(buffer.lines().last().is_some_and(|line| line.is(Activity::Died)));
    Ok(())
}

#[test]
fn run_with_global_configuration_journals_to_stdout() -> anyhow::Result<()> {
    let settings = TableSettings::from_millis(1, 20, 10, 10, None)?;
    let summary = SymposiumApp::run(settings)?;

    assert!(matches!(summary.outcome, Outcome::Starved { philosopher: 1, .. }));
    assert_eq!(summary.meals, vec![0]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn launch_async_with_global_configuration() -> anyhow::Result<()> {
    let settings = TableSettings::from_millis(1, 20, 10, 10, Some(1))?;
    let runtime = SymposiumApp::launch_async(settings).await;
    let table = runtime.table().clone();
    let summary = runtime.join().await?;

    assert!(matches!(summary.outcome, Outcome::Starved { philosopher: 1, .. }));
    assert!(table.journal().is_sealed());
    Ok(())
}

#[tokio::test]
#[should_panic(expected = "within a Tokio runtime")]
async fn run_refuses_to_nest_inside_a_runtime() {
    let settings = TableSettings::from_millis(1, 60, 10, 10, None).unwrap();
    let _ = SymposiumApp::run_with(settings, test_config(), SharedBuffer::default());
}

#[test]
fn invalid_settings_never_reach_the_table() {
    assert!(matches!(
        TableSettings::from_millis(0, 100, 100, 100, None),
        Err(SettingsError::NoPhilosophers)
    ));
}
