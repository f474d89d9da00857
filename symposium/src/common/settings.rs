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

use std::num::NonZeroU32;
use std::time::Duration;

use crate::common::SettingsError;

/// Parameters of one run, fixed before the first philosopher sits down.
///
/// Shared read-only by every philosopher and the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSettings {
    philosophers: usize,
    time_to_die: Duration,
    time_to_eat: Duration,
    time_to_sleep: Duration,
    meals_target: Option<NonZeroU32>,
}

impl TableSettings {
    /// Builds validated settings.
    ///
    /// A `meals_target` of `None` or `Some(0)` means the run only ends on a death.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoPhilosophers`] when `philosophers` is zero.
    pub fn new(
        philosophers: usize,
        time_to_die: Duration,
        time_to_eat: Duration,
        time_to_sleep: Duration,
        meals_target: Option<u32>,
    ) -> Result<Self, SettingsError> {
        if philosophers == 0 {
            return Err(SettingsError::NoPhilosophers);
        }
        Ok(Self {
            philosophers,
            time_to_die,
            time_to_eat,
            time_to_sleep,
            meals_target: meals_target.and_then(NonZeroU32::new),
        })
    }

    /// Same as [`TableSettings::new`] with every duration given in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoPhilosophers`] when `philosophers` is zero.
    pub fn from_millis(
        philosophers: usize,
        time_to_die: u64,
        time_to_eat: u64,
        time_to_sleep: u64,
        meals_target: Option<u32>,
    ) -> Result<Self, SettingsError> {
        Self::new(
            philosophers,
            Duration::from_millis(time_to_die),
            Duration::from_millis(time_to_eat),
            Duration::from_millis(time_to_sleep),
            meals_target,
        )
    }

    /// Number of philosophers, which is also the number of forks.
    #[inline]
    pub const fn philosophers(&self) -> usize {
        self.philosophers
    }

    /// Longest allowed gap between two meal starts.
    #[inline]
    pub const fn time_to_die(&self) -> Duration {
        self.time_to_die
    }

    /// How long a philosopher holds both forks.
    #[inline]
    pub const fn time_to_eat(&self) -> Duration {
        self.time_to_eat
    }

    /// How long a philosopher sleeps after eating.
    #[inline]
    pub const fn time_to_sleep(&self) -> Duration {
        self.time_to_sleep
    }

    /// Meals every philosopher must finish before the run ends, if bounded.
    #[inline]
    pub const fn meals_target(&self) -> Option<NonZeroU32> {
        self.meals_target
    }
}
