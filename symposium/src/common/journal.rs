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

use std::fmt;
use std::io::Write;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{trace, warn};

/// Something a philosopher did, as it appears at the end of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    /// Waiting for forks.
    Thinking,
    /// Picked up one fork.
    TookFork,
    /// Holding both forks.
    Eating,
    /// Resting after a meal.
    Sleeping,
    /// Starved; always the final line of a run.
    Died,
}

impl Activity {
    /// The message printed for this activity.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Thinking => "is thinking",
            Self::TookFork => "has taken a fork",
            Self::Eating => "is eating",
            Self::Sleeping => "is sleeping",
            Self::Died => "died",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

struct Page {
    out: Box<dyn Write + Send>,
    sealed: bool,
}

/// Serialized sink for philosopher activity lines.
///
/// Every line has the form `<elapsed_ms> <philosopher_id> <message>`, with the
/// elapsed time measured from the table's start instant. Lines are written under
/// one lock, so they never interleave and their timestamps never go backwards.
///
/// Once sealed (after a death or once everyone has eaten enough) the journal
/// drops every further line. The monitor seals with the "died" line itself,
/// which makes that line the last one of the run.
pub struct Journal {
    start: Instant,
    page: Mutex<Page>,
}

impl Journal {
    /// Creates a journal writing to `out`, timing lines from `start`.
    pub fn new(start: Instant, out: impl Write + Send + 'static) -> Self {
        Self {
            start,
            page: Mutex::new(Page {
                out: Box::new(out),
                sealed: false,
            }),
        }
    }

    /// The instant every line is timed from.
    #[inline]
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Appends one line. Returns `false` when the journal is already sealed.
    pub fn log(&self, philosopher: usize, activity: Activity) -> bool {
        let mut page = self.page.lock();
        if page.sealed {
            trace!(philosopher, %activity, "journal sealed, line dropped");
            return false;
        }
        self.write_line(&mut page, philosopher, activity);
        true
    }

    /// Appends a final line and seals the journal in the same critical section.
    ///
    /// Returns `false`, writing nothing, if the journal was already sealed.
    pub fn seal_with(&self, philosopher: usize, activity: Activity) -> bool {
        let mut page = self.page.lock();
        if page.sealed {
            return false;
        }
        self.write_line(&mut page, philosopher, activity);
        page.sealed = true;
        Self::flush(&mut page);
        true
    }

    /// Seals the journal without writing a line.
    pub fn seal(&self) {
        let mut page = self.page.lock();
        if !page.sealed {
            page.sealed = true;
            Self::flush(&mut page);
        }
    }

    /// Whether the journal stopped accepting lines.
    pub fn is_sealed(&self) -> bool {
        self.page.lock().sealed
    }

    fn write_line(&self, page: &mut Page, philosopher: usize, activity: Activity) {
        let elapsed = self.start.elapsed().as_millis();
        if let Err(e) = writeln!(page.out, "{elapsed} {philosopher} {activity}") {
            warn!(philosopher, %activity, "failed to write journal line: {}", e);
        }
    }

    fn flush(page: &mut Page) {
        if let Err(e) = page.out.flush() {
            warn!("failed to flush journal: {}", e);
        }
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("start", &self.start)
            .field("sealed", &self.is_sealed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock())
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    #[test]
    fn lines_carry_elapsed_id_and_message() {
        let buffer = Buffer::default();
        let journal = Journal::new(Instant::now(), buffer.clone());

        assert!(journal.log(3, Activity::TookFork));
        assert!(journal.log(3, Activity::Eating));

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        let fields: Vec<&str> = lines[0].splitn(3, ' ').collect();
        assert!(fields[0].parse::<u128>().is_ok());
        assert_eq!(fields[1], "3");
        assert_eq!(fields[2], "has taken a fork");
        assert!(lines[1].ends_with(" 3 is eating"));
    }

    #[test]
    fn sealed_journal_drops_later_lines() {
        let buffer = Buffer::default();
        let journal = Journal::new(Instant::now(), buffer.clone());

        assert!(journal.log(1, Activity::Thinking));
        assert!(journal.seal_with(2, Activity::Died));
        assert!(!journal.log(1, Activity::Eating));
        assert!(!journal.seal_with(1, Activity::Died));
        assert!(journal.is_sealed());

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(" 2 died"));
    }

    #[test]
    fn plain_seal_writes_nothing() {
        let buffer = Buffer::default();
        let journal = Journal::new(Instant::now(), buffer.clone());

        journal.seal();
        assert!(!journal.log(1, Activity::Sleeping));
        assert!(buffer.lines().is_empty());
    }

    #[test]
    fn activity_messages() {
        assert_eq!(Activity::Thinking.to_string(), "is thinking");
        assert_eq!(Activity::TookFork.to_string(), "has taken a fork");
        assert_eq!(Activity::Eating.to_string(), "is eating");
        assert_eq!(Activity::Sleeping.to_string(), "is sleeping");
        assert_eq!(Activity::Died.to_string(), "died");
    }
}
