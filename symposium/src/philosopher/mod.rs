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

use std::time::{Duration, Instant};

use parking_lot::{Mutex, MutexGuard};

pub use fork::{Fork, HeldFork};

pub(crate) use dining::dine;

mod dining;
mod fork;

/// The part of a philosopher the monitor is allowed to look at.
///
/// Only ever read or written under the owning [`Philosopher`]'s lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    last_meal: Instant,
    meals_eaten: u32,
}

impl Vitals {
    /// Vitals of a philosopher who sat down at `start` and has not eaten yet.
    pub const fn new(start: Instant) -> Self {
        Self {
            last_meal: start,
            meals_eaten: 0,
        }
    }

    /// When the most recent meal started (the start instant before the first meal).
    #[inline]
    pub const fn last_meal(&self) -> Instant {
        self.last_meal
    }

    /// Number of finished meals.
    #[inline]
    pub const fn meals_eaten(&self) -> u32 {
        self.meals_eaten
    }

    /// Time since the last meal started, as seen at `now`.
    pub fn hungry_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_meal)
    }

    pub(crate) fn begin_meal(&mut self, now: Instant) {
        self.last_meal = now;
    }

    pub(crate) fn finish_meal(&mut self) {
        self.meals_eaten += 1;
    }
}

/// A seat at the table: an id, the two adjacent forks and the guarded [`Vitals`].
///
/// Forks are referenced by index into the table's fork ring. The philosopher in
/// seat `i` has fork `i` on the left and fork `(i + 1) % n` on the right, so the
/// left fork of one philosopher is the right fork of the previous one.
#[derive(Debug)]
pub struct Philosopher {
    id: usize,
    left: usize,
    right: usize,
    vitals: Mutex<Vitals>,
}

impl Philosopher {
    /// Seats a philosopher at 0-based `seat` of a table with `seats` places.
    ///
    /// `seats` is never zero: [`TableSettings`](crate::common::TableSettings)
    /// rejects an empty table before anyone sits down.
    pub(crate) fn seat(seat: usize, seats: usize, start: Instant) -> Self {
        Self {
            id: seat + 1,
            left: seat,
            right: (seat + 1) % seats,
            vitals: Mutex::new(Vitals::new(start)),
        }
    }

    /// The philosopher's 1-based id.
    #[inline]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Index of the left fork.
    #[inline]
    pub const fn left(&self) -> usize {
        self.left
    }

    /// Index of the right fork.
    #[inline]
    pub const fn right(&self) -> usize {
        self.right
    }

    /// Fork indices in the order this philosopher picks them up.
    ///
    /// Lower index first. Everyone but the last philosopher reaches left then
    /// right; the last one reaches for fork 0 (its right) first, which breaks the
    /// circular wait around the ring.
    pub fn reaching_order(&self) -> (usize, usize) {
        (self.left.min(self.right), self.left.max(self.right))
    }

    /// Whether both sides are the same fork, which happens with one philosopher.
    #[inline]
    pub const fn has_single_fork(&self) -> bool {
        self.left == self.right
    }

    /// A copy of the current vitals.
    pub fn snapshot(&self) -> Vitals {
        *self.vitals.lock()
    }

    pub(crate) fn vitals(&self) -> MutexGuard<'_, Vitals> {
        self.vitals.lock()
    }
}

/// The forks a philosopher is holding. Putting them down twice is harmless.
#[derive(Debug, Default)]
pub(crate) struct Grip {
    first: Option<HeldFork>,
    second: Option<HeldFork>,
}

impl Grip {
    pub(crate) fn hold_first(&mut self, fork: HeldFork) {
        self.first = Some(fork);
    }

    pub(crate) fn hold_second(&mut self, fork: HeldFork) {
        self.second = Some(fork);
    }

    pub(crate) const fn held(&self) -> usize {
        self.first.is_some() as usize + self.second.is_some() as usize
    }

    pub(crate) fn put_down(&mut self) {
        if let Some(fork) = self.first.take() {
            fork.release();
        }
        if let Some(fork) = self.second.take() {
            fork.release();
        }
    }
}
