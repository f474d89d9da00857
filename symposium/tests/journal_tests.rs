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
use std::collections::HashMap;

use symposium::prelude::*;
use symposium_test::prelude::*;

use crate::setup::*;

mod setup;

const MESSAGES: [&str; 5] = [
    "is thinking",
    "has taken a fork",
    "is eating",
    "is sleeping",
    "died",
];

#[symposium_test]
async fn every_line_is_well_formed() -> anyhow::Result<()> {
    initialize_tracing();
    let settings = TableSettings::from_millis(5, 800, 50, 50, Some(3))?;
    let (_, lines) = run_table(settings, test_config()).await?;

    assert!(!lines.is_empty());
    for line in &lines {
        assert!((1..=5).contains(&line.philosopher), "{line:?}");
        assert!(MESSAGES.contains(&line.message.as_str()), "{line:?}");
    }
    Ok(())
}

#[symposium_test]
async fn timestamps_never_go_backwards() -> anyhow::Result<()> {
    initialize_tracing();
    let settings = TableSettings::from_millis(4, 600, 30, 30, Some(4))?;
    let (_, lines) = run_table(settings, test_config()).await?;

    // Elapsed time is taken under the journal lock, so the whole journal is ordered.
    assert!(lines.windows(2).all(|pair| pair[0].elapsed_ms <= pair[1].elapsed_ms));

    let mut last_seen: HashMap<usize, u64> = HashMap::new();
    for line in &lines {
        let previous = last_seen.insert(line.philosopher, line.elapsed_ms);
        assert!(previous.is_none_or(|previous| previous <= line.elapsed_ms));
    }
    Ok(())
}

#[symposium_test]
async fn each_philosopher_follows_the_cycle() -> anyhow::Result<()> {
    initialize_tracing();
    let settings = TableSettings::from_millis(3, 800, 20, 20, Some(3))?;
    let (_, lines) = run_table(settings, test_config()).await?;

    for philosopher in 1..=3 {
        let own: Vec<&str> = lines
            .iter()
            .filter(|line| line.philosopher == philosopher)
            .map(|line| line.message.as_str())
            .collect();
        let cycle = ["is thinking", "has taken a fork", "has taken a fork", "is eating", "is sleeping"];
        for (index, message) in own.iter().enumerate() {
            assert_eq!(*message, cycle[index % cycle.len()], "philosopher {philosopher}: {own:?}");
        }
    }
    Ok(())
}

#[symposium_test]
async fn meals_are_counted_once_per_cycle() -> anyhow::Result<()> {
    initialize_tracing();
    let settings = TableSettings::from_millis(4, 600, 20, 20, Some(5))?;
    let (summary, lines) = run_table(settings, test_config()).await?;

    for (seat, &meals) in summary.meals.iter().enumerate() {
        let started = count(&lines, seat + 1, Activity::Eating) as u32;
        let finished = count(&lines, seat + 1, Activity::Sleeping) as u32;
        // The run can end mid-meal, or between counting a meal and journaling sleep.
        assert!(finished == meals || finished + 1 == meals, "philosopher {}", seat + 1);
        assert!(started == meals || started == meals + 1, "philosopher {}", seat + 1);
    }
    Ok(())
}

#[symposium_test]
async fn the_table_is_quiet_after_a_death() -> anyhow::Result<()> {
    initialize_tracing();
    let settings = TableSettings::from_millis(3, 100, 200, 100, None)?;
    let buffer = SharedBuffer::default();
    let runtime = SymposiumApp::launch_with(settings, test_config(), buffer.clone()).await;
    let table = runtime.table().clone();
    let summary = runtime.join().await?;

    assert!(matches!(summary.outcome, Outcome::Starved { .. }));
    assert!(table.is_adjourned());
    assert!(table.journal().is_sealed());
    assert!(table.forks().iter().all(Fork::is_free));

    let before = buffer.lines();
    assert!(!table.journal().log(1, Activity::Thinking));
    assert_eq!(buffer.lines(), before);
    assert!(before.last().is_some_and(|line| line.is(Activity::Died)));
    Ok(())
}

#[symposium_test]
async fn the_table_is_quiet_after_everyone_has_eaten() -> anyhow::Result<()> {
    initialize_tracing();
    let settings = TableSettings::from_millis(4, 600, 20, 20, Some(2))?;
    let buffer = SharedBuffer::default();
    let runtime = SymposiumApp::launch_with(settings, test_config(), buffer.clone()).await;
    let table = runtime.table().clone();
    let summary = runtime.join().await?;

    assert_eq!(summary.outcome, Outcome::Satiated);
    assert!(table.is_adjourned());
    assert!(table.journal().is_sealed());
    assert!(table.forks().iter().all(Fork::is_free));

    let before = buffer.lines();
    assert!(!table.journal().log(1, Activity::Eating));
    assert_eq!(buffer.lines(), before);
    assert!(!before.iter().any(|line| line.is(Activity::Died)));
    Ok(())
}
