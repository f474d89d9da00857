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
//! Panic capture for `#[symposium_test]`.
//!
//! One process-wide hook is installed on first use and forwards every panic to
//! the hook that was there before it. A panic is additionally recorded into the
//! [`CapturedPanic`] attached to the panicking thread, so concurrent tests only
//! ever see panics raised on their own runtime threads.

use std::cell::RefCell;
use std::panic;
use std::sync::{Arc, Once};

use parking_lot::Mutex;

static INSTALL: Once = Once::new();

thread_local! {
    static ATTACHED: RefCell<Option<Arc<CapturedPanic>>> = const { RefCell::new(None) };
}

/// The first panic raised on the threads of one test.
#[derive(Debug, Default)]
pub struct CapturedPanic {
    first: Mutex<Option<(String, String)>>,
}

impl CapturedPanic {
    /// Location and message of the first recorded panic, if any.
    pub fn first(&self) -> Option<(String, String)> {
        self.first.lock().clone()
    }

    fn record(&self, location: String, message: String) {
        let mut first = self.first.lock();
        if first.is_none() {
            *first = Some((location, message));
        }
    }
}

/// Installs the shared panic hook. Only the first call has an effect.
pub fn install() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let attached = ATTACHED.try_with(|slot| slot.borrow().clone()).ok().flatten();
            if let Some(capture) = attached {
                let message = info
                    .payload()
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| info.payload().downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "No error message".to_string())
                    .trim()
                    .replace('\n', " ");
                let location = info
                    .location()
                    .map_or_else(
                        || "unknown location".to_string(),
                        |l| format!("{}:{}:{}", l.file(), l.line(), l.column()),
                    );
                tracing::error!("Panic: {}", message);
                capture.record(location, message);
            }
            previous(info);
        }));
    });
}

/// Records panics raised on the current thread into `capture`.
pub fn attach(capture: &Arc<CapturedPanic>) {
    ATTACHED.with(|slot| *slot.borrow_mut() = Some(Arc::clone(capture)));
}

/// Stops recording panics raised on the current thread.
pub fn detach() {
    ATTACHED.with(|slot| *slot.borrow_mut() = None);
}
