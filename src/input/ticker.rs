// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Cancellable one-shot timer abstraction.
//!
//! Key repeat is driven by a chain of one-shot timers rather than a periodic
//! clock, because the delay changes on every tick as the interval schedule is
//! consumed. [`Ticker`] is the seam between the button controller and the
//! platform: arming hands back a [`TimerHandle`], and a cancelled handle must
//! never be delivered afterwards.
//!
//! Handles are never reused, so a consumer that records the handle it armed
//! and ignores every other delivery is immune to the cancel race: a tick that
//! was already in flight when its timer was cancelled arrives with a stale
//! handle and is dropped.

use std::collections::HashSet;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::events::AppEvent;

/// Identity of one armed timer. Monotonically increasing, never reused.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TimerHandle(u64);

pub(crate) trait Ticker {
    /// Schedules a one-shot tick after `delay`.
    fn arm(&mut self, delay: Duration) -> TimerHandle;

    /// Cancels a previously armed timer. Idempotent; cancelling a handle that
    /// already fired is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Thread-backed ticker delivering ticks through the application event
/// channel.
///
/// Each armed timer is a short-lived sleeper thread. The shared set holds the
/// handles of timers that are still live; firing and cancelling both remove
/// the handle, so the set never outgrows the number of in-flight timers. A
/// tick that was already in the channel when its timer was cancelled is
/// rejected by the consumer's handle comparison.
pub(crate) struct ThreadTicker {
    event_tx: Sender<AppEvent>,
    live: Arc<Mutex<HashSet<u64>>>,
    next_handle: u64,
}

impl ThreadTicker {
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        Self {
            event_tx,
            live: Arc::new(Mutex::new(HashSet::new())),
            next_handle: 0,
        }
    }
}

impl Ticker for ThreadTicker {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let event_tx = self.event_tx.clone();
        let live = Arc::clone(&self.live);
        live.lock().unwrap_or_else(|e| e.into_inner()).insert(handle.0);

        thread::spawn(move || {
            thread::sleep(delay);

            let mut live = live.lock().unwrap_or_else(|e| e.into_inner());
            if live.remove(&handle.0) {
                event_tx.send(AppEvent::RepeatTimer(handle)).ok();
            }
        });

        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut live = self.live.lock().unwrap_or_else(|e| e.into_inner());
        live.remove(&handle.0);
    }
}

/// Test ticker that records arm/cancel calls and never fires on its own;
/// tests deliver ticks by handing the armed handle back to the consumer.
#[cfg(test)]
pub(crate) struct ManualTicker {
    pub(crate) armed: Vec<(TimerHandle, Duration)>,
    pub(crate) cancelled: Vec<TimerHandle>,
    next_handle: u64,
}

#[cfg(test)]
impl ManualTicker {
    pub(crate) fn new() -> Self {
        Self {
            armed: Vec::new(),
            cancelled: Vec::new(),
            next_handle: 0,
        }
    }

    pub(crate) fn last_armed(&self) -> Option<(TimerHandle, Duration)> {
        self.armed.last().copied()
    }
}

#[cfg(test)]
impl Ticker for ManualTicker {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.armed.push((handle, delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::mpsc;

    fn live_count(ticker: &ThreadTicker) -> usize {
        ticker.live.lock().unwrap().len()
    }

    #[test]
    fn cancelled_timer_is_never_delivered() {
        let (tx, rx) = mpsc::channel();
        let mut ticker = ThreadTicker::new(tx);

        let handle = ticker.arm(Duration::from_millis(50));
        ticker.cancel(handle);

        assert_eq!(live_count(&ticker), 0);
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn cancel_after_the_tick_fired_leaves_no_residue() {
        let (tx, rx) = mpsc::channel();
        let mut ticker = ThreadTicker::new(tx);

        let handle = ticker.arm(Duration::ZERO);
        // Receiving the tick proves the sleeper has already retired its
        // handle; this cancel arrives too late to matter.
        let fired = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(fired, AppEvent::RepeatTimer(h) if h == handle));
        ticker.cancel(handle);

        assert_eq!(live_count(&ticker), 0);
    }
}
