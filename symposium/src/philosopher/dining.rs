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

use std::ops::ControlFlow;
use std::time::Instant;

use tracing::{debug, instrument, trace};

use crate::common::{Activity, Table};
use crate::philosopher::{Grip, Philosopher};

/// Runs one philosopher until the table is adjourned.
///
/// Think, take the first fork, take the second fork, eat, put both forks down,
/// sleep, repeat. The adjournment latch is checked after every step that can
/// suspend, so a philosopher leaves at most one eat or sleep duration after
/// the monitor ends the run. Whatever forks are still held on the way out are
/// put down.
#[instrument(skip(table), fields(philosopher = seat + 1))]
pub(crate) async fn dine(table: Table, seat: usize) {
    let philosopher = table.philosopher(seat);
    let mut grip = Grip::default();

    while sit_through_one_meal(&table, philosopher, &mut grip)
        .await
        .is_continue()
    {}

    trace!(forks_held = grip.held(), "leaving the table");
    grip.put_down();
}

async fn sit_through_one_meal(
    table: &Table,
    philosopher: &Philosopher,
    grip: &mut Grip,
) -> ControlFlow<()> {
    let id = philosopher.id();
    let settings = table.settings();
    let (first, second) = philosopher.reaching_order();

    table.journal().log(id, Activity::Thinking);
    still_seated(table)?;

    grip.hold_first(table.fork(first).acquire().await);
    table.journal().log(id, Activity::TookFork);
    still_seated(table)?;

    if philosopher.has_single_fork() {
        // A second acquire of the same fork would never return.
        debug!("only one fork on the table, waiting for adjournment");
        table.adjourned().await;
        return ControlFlow::Break(());
    }

    grip.hold_second(table.fork(second).acquire().await);
    table.journal().log(id, Activity::TookFork);
    still_seated(table)?;

    {
        let mut vitals = philosopher.vitals();
        vitals.begin_meal(Instant::now());
        table.journal().log(id, Activity::Eating);
    }
    tokio::time::sleep(settings.time_to_eat()).await;
    still_seated(table)?;

    grip.put_down();
    let meals = {
        let mut vitals = philosopher.vitals();
        vitals.finish_meal();
        vitals.meals_eaten()
    };
    trace!(meals, "meal finished");

    table.journal().log(id, Activity::Sleeping);
    tokio::time::sleep(settings.time_to_sleep()).await;
    still_seated(table)
}

fn still_seated(table: &Table) -> ControlFlow<()> {
    if table.is_adjourned() {
        ControlFlow::Break(())
    } else {
        ControlFlow::Continue(())
    }
}
