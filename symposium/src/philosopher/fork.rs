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

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

/// An exclusive resource on the table.
///
/// Each fork owns its lock. Holding the fork means holding the [`HeldFork`]
/// returned by [`Fork::acquire`]; there is no other way to take it.
#[derive(Debug)]
pub struct Fork {
    id: usize,
    lock: Arc<Mutex<()>>,
}

impl Fork {
    /// Creates a free fork. `id` is 1-based and only used for diagnostics.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// The fork's 1-based id.
    #[inline]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Waits until the fork is free and takes it.
    ///
    /// Waiters are served in FIFO order. Taking a fork the caller already holds
    /// never completes, so callers must not do that.
    pub async fn acquire(&self) -> HeldFork {
        let guard = Arc::clone(&self.lock).lock_owned().await;
        trace!(fork = self.id, "fork taken");
        HeldFork {
            id: self.id,
            _guard: guard,
        }
    }

    /// Takes the fork only if nobody holds it.
    pub fn try_acquire(&self) -> Option<HeldFork> {
        Arc::clone(&self.lock)
            .try_lock_owned()
            .ok()
            .map(|guard| HeldFork {
                id: self.id,
                _guard: guard,
            })
    }

    /// Whether the fork is currently lying on the table.
    pub fn is_free(&self) -> bool {
        self.lock.try_lock().is_ok()
    }
}

/// Proof of holding a [`Fork`]. Dropping it puts the fork back down.
#[derive(Debug)]
pub struct HeldFork {
    id: usize,
    _guard: OwnedMutexGuard<()>,
}

impl HeldFork {
    /// Id of the held fork.
    #[inline]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Puts the fork down.
    pub fn release(self) {
        trace!(fork = self.id, "fork released");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn release_frees_the_fork() {
        let fork = Fork::new(1);
        let held = fork.acquire().await;
        assert_eq!(held.id(), 1);
        assert!(!fork.is_free());
        assert!(fork.try_acquire().is_none());

        held.release();
        assert!(fork.is_free());
        assert!(fork.try_acquire().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn at_most_one_holder() {
        let fork = Arc::new(Fork::new(7));
        let holders = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let fork = Arc::clone(&fork);
                let holders = Arc::clone(&holders);
                let max_seen = Arc::clone(&max_seen);
                tokio::spawn(async move {
                    for _ in 0..20 {
                        let held = fork.acquire().await;
                        let now = holders.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_micros(100)).await;
                        holders.fetch_sub(1, Ordering::SeqCst);
                        held.release();
                    }
                })
            })
            .collect();

        for task in tasks {
            task.await.expect("holder task panicked");
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert!(fork.is_free());
    }
}
