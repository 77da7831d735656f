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

//! Remote-control button debouncing and repeat scheduling.
//!
//! [`ButtonInputController`] normalizes raw key down/up signals into a clean
//! `buttonpress` / `buttonrepeat` / `buttonrelease` stream on its owned
//! [`EventBus`]. At most one logical key is ever active: while a key is held,
//! down signals for other keys are recorded as bookkeeping but produce no
//! events until the first key is released.
//!
//! Repeats run on an interval schedule consumed back-to-front, so the first
//! repeat uses the schedule's last (slowest) entry and each subsequent tick
//! moves one entry toward the front, flooring at the fastest interval. The
//! seek engine swaps the schedule at runtime to slow the perceived repeat
//! rate near content boundaries.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::bus::EventBus;
use crate::input::ButtonCode;
use crate::input::back::{HistoryEntry, NavigationHistory};
use crate::input::ticker::{Ticker, TimerHandle};
use crate::seek::ScheduleControl;

pub(crate) const BUTTON_PRESS: &str = "buttonpress";
pub(crate) const BUTTON_REPEAT: &str = "buttonrepeat";
pub(crate) const BUTTON_RELEASE: &str = "buttonrelease";

/// Default repeat interval schedule in milliseconds, consumed back-to-front:
/// the initial repeat is slow and accelerates as the cursor walks toward the
/// front of the array.
pub(crate) const DEFAULT_BUTTON_INTERVALS_MS: [u64; 5] = [100, 150, 200, 350, 700];

pub(crate) struct ButtonInputController {
    bus: EventBus<ButtonCode>,

    /// The single key currently producing press/repeat/release events.
    active: Option<ButtonCode>,

    /// Every key the platform reports as held, with the time its down signal
    /// arrived. Used to detect stray duplicate down signals from the input
    /// source's own auto-repeat.
    held: HashMap<ButtonCode, Instant>,

    pending: Option<TimerHandle>,

    intervals: Vec<Duration>,
    default_intervals: Vec<Duration>,
    cursor: usize,

    /// While set, raw signals pass through unprocessed so a raw text-entry
    /// field can consume them.
    suspended: bool,

    ticker: Box<dyn Ticker>,
    history: Box<dyn NavigationHistory>,
}

impl ButtonInputController {
    /// Creates a controller and arms the back-navigation interception by
    /// pushing the initial sentinel history entry.
    pub(crate) fn new(
        intervals: &[Duration],
        ticker: Box<dyn Ticker>,
        mut history: Box<dyn NavigationHistory>,
    ) -> Self {
        history.push_sentinel();

        Self {
            bus: EventBus::with_vocabulary(&[BUTTON_PRESS, BUTTON_REPEAT, BUTTON_RELEASE]),
            active: None,
            held: HashMap::new(),
            pending: None,
            intervals: intervals.to_vec(),
            default_intervals: intervals.to_vec(),
            cursor: intervals.len().saturating_sub(1),
            suspended: false,
            ticker,
            history,
        }
    }

    /// The controller's event bus, for subscribing to the normalized button
    /// event stream.
    pub(crate) fn events(&mut self) -> &mut EventBus<ButtonCode> {
        &mut self.bus
    }

    /// Processes a raw key-down signal.
    ///
    /// Unrecognized codes and duplicate downs for an already-held key are
    /// dropped silently. A down for a recognized key while another key is
    /// active is recorded as held but produces no events.
    pub(crate) fn key_down(&mut self, raw: u16) -> Result<()> {
        if self.suspended {
            return Ok(());
        }

        let Some(code) = ButtonCode::from_raw(raw) else {
            return Ok(());
        };

        // Auto-repeat from the input source itself.
        if self.held.contains_key(&code) {
            return Ok(());
        }
        self.held.insert(code, Instant::now());

        if self.active.is_some() {
            return Ok(());
        }

        self.active = Some(code);
        self.bus.trigger(BUTTON_PRESS, &code)?;

        // The first repeat is armed with the schedule's last entry.
        self.cursor = self.intervals.len().saturating_sub(1);
        self.arm_repeat();

        Ok(())
    }

    /// Processes a raw key-up signal.
    ///
    /// A release of the active key cancels the pending repeat and emits
    /// `buttonrelease`; releases of other keys only clear bookkeeping.
    pub(crate) fn key_up(&mut self, raw: u16) -> Result<()> {
        if self.suspended {
            return Ok(());
        }

        let Some(code) = ButtonCode::from_raw(raw) else {
            return Ok(());
        };

        self.held.remove(&code);

        if self.active == Some(code) {
            self.active = None;
            self.cancel_repeat();
            self.bus.trigger(BUTTON_RELEASE, &code)?;
        }

        Ok(())
    }

    /// Delivers a repeat-timer tick.
    ///
    /// Ticks whose handle is not the one currently pending are stale (the
    /// timer was cancelled or replaced while the tick was in flight) and
    /// are dropped.
    pub(crate) fn timer_fired(&mut self, handle: TimerHandle) -> Result<()> {
        if self.pending != Some(handle) {
            return Ok(());
        }
        self.pending = None;

        let Some(code) = self.active else {
            return Ok(());
        };

        self.bus.trigger(BUTTON_REPEAT, &code)?;
        self.arm_repeat();

        Ok(())
    }

    /// Clears active-key state, the pending repeat timer and all held-key
    /// bookkeeping without emitting `buttonrelease`, and ends any
    /// suspension.
    ///
    /// Used when the platform may have silently dropped a key-up signal,
    /// e.g. on focus loss.
    pub(crate) fn resync(&mut self) {
        self.active = None;
        self.held.clear();
        self.cancel_repeat();
        self.cursor = self.intervals.len().saturating_sub(1);
        self.suspended = false;
    }

    /// Clears all state like [`resync`](Self::resync) and additionally makes
    /// every subsequent raw signal pass through unprocessed, until the next
    /// `resync`.
    pub(crate) fn suspend(&mut self) {
        self.resync();
        self.suspended = true;
    }

    #[cfg(test)]
    pub(crate) fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Translates a pop of the platform navigation history.
    ///
    /// Popping a non-sentinel entry becomes a synthetic BACK press
    /// immediately followed by release, after which a fresh sentinel is
    /// pushed to re-arm the interception. A pop of the sentinel itself only
    /// re-pushes it.
    pub(crate) fn history_popped(&mut self, entry: HistoryEntry) -> Result<()> {
        if entry != HistoryEntry::Sentinel {
            self.bus.trigger(BUTTON_PRESS, &ButtonCode::Back)?;
            self.bus.trigger(BUTTON_RELEASE, &ButtonCode::Back)?;
        }
        self.history.push_sentinel();
        Ok(())
    }

    /// Arms the next repeat with the entry under the cursor, then walks the
    /// cursor one step toward the front of the schedule, flooring at the
    /// fastest interval.
    fn arm_repeat(&mut self) {
        let Some(delay) = self.intervals.get(self.cursor).copied() else {
            return;
        };
        self.pending = Some(self.ticker.arm(delay));
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cancel_repeat(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.ticker.cancel(handle);
        }
    }
}

impl ScheduleControl for ButtonInputController {
    /// Swaps the active repeat schedule and resets the cursor to its end.
    ///
    /// The pending timer is left alone: the swapped schedule takes effect at
    /// the next reschedule.
    fn set_button_intervals(&mut self, intervals: &[Duration]) {
        self.intervals = intervals.to_vec();
        self.cursor = self.intervals.len().saturating_sub(1);
    }

    fn restore_default_intervals(&mut self) {
        let defaults = self.default_intervals.clone();
        self.set_button_intervals(&defaults);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::input::ticker::ManualTicker;

    const UP: u16 = 38;
    const DOWN: u16 = 40;
    const SELECT: u16 = 13;

    impl Ticker for Rc<RefCell<ManualTicker>> {
        fn arm(&mut self, delay: Duration) -> TimerHandle {
            self.borrow_mut().arm(delay)
        }

        fn cancel(&mut self, handle: TimerHandle) {
            self.borrow_mut().cancel(handle)
        }
    }

    struct RecordingHistory {
        pushes: usize,
    }

    impl NavigationHistory for Rc<RefCell<RecordingHistory>> {
        fn push_sentinel(&mut self) {
            self.borrow_mut().pushes += 1;
        }
    }

    struct Fixture {
        controller: ButtonInputController,
        ticker: Rc<RefCell<ManualTicker>>,
        history: Rc<RefCell<RecordingHistory>>,
        log: Rc<RefCell<Vec<String>>>,
    }

    fn fixture_with_intervals(intervals_ms: &[u64]) -> Fixture {
        let intervals: Vec<Duration> =
            intervals_ms.iter().map(|ms| Duration::from_millis(*ms)).collect();
        let ticker = Rc::new(RefCell::new(ManualTicker::new()));
        let history = Rc::new(RefCell::new(RecordingHistory { pushes: 0 }));

        let mut controller = ButtonInputController::new(
            &intervals,
            Box::new(Rc::clone(&ticker)),
            Box::new(Rc::clone(&history)),
        );

        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, tag) in [
            (BUTTON_PRESS, "press"),
            (BUTTON_REPEAT, "repeat"),
            (BUTTON_RELEASE, "release"),
        ] {
            let log = Rc::clone(&log);
            controller
                .events()
                .on(name, Box::new(move |code| log.borrow_mut().push(format!("{tag}:{code:?}"))))
                .unwrap();
        }

        Fixture { controller, ticker, history, log }
    }

    fn fixture() -> Fixture {
        fixture_with_intervals(&[100, 200, 400])
    }

    fn events(fixture: &Fixture) -> Vec<String> {
        fixture.log.borrow().clone()
    }

    fn fire_pending(fixture: &mut Fixture) {
        let (handle, _) = fixture.ticker.borrow().last_armed().unwrap();
        fixture.controller.timer_fired(handle).unwrap();
    }

    #[test]
    fn press_then_repeats_then_release() {
        let mut f = fixture();

        f.controller.key_down(UP).unwrap();
        fire_pending(&mut f);
        fire_pending(&mut f);
        f.controller.key_up(UP).unwrap();

        assert_eq!(events(&f), vec!["press:Up", "repeat:Up", "repeat:Up", "release:Up"]);
    }

    #[test]
    fn schedule_is_consumed_back_to_front_and_floors_at_first_entry() {
        let mut f = fixture();

        f.controller.key_down(UP).unwrap();
        let delays: Vec<u64> = {
            // First repeat is armed with the last (slowest) entry.
            let armed = &f.ticker.borrow().armed;
            armed.iter().map(|(_, d)| d.as_millis() as u64).collect()
        };
        assert_eq!(delays, vec![400]);

        for _ in 0..4 {
            fire_pending(&mut f);
        }

        let delays: Vec<u64> = f
            .ticker
            .borrow()
            .armed
            .iter()
            .map(|(_, d)| d.as_millis() as u64)
            .collect();
        // Accelerates toward the front of the schedule, then floors.
        assert_eq!(delays, vec![400, 200, 100, 100, 100]);
    }

    #[test]
    fn second_key_down_is_bookkeeping_only_while_another_is_active() {
        let mut f = fixture();

        f.controller.key_down(UP).unwrap();
        f.controller.key_down(DOWN).unwrap();
        fire_pending(&mut f);
        f.controller.key_up(DOWN).unwrap();
        f.controller.key_up(UP).unwrap();

        // DOWN never produces any event, only UP does.
        assert_eq!(events(&f), vec!["press:Up", "repeat:Up", "release:Up"]);
    }

    #[test]
    fn duplicate_down_signal_for_held_key_is_ignored() {
        let mut f = fixture();

        f.controller.key_down(SELECT).unwrap();
        f.controller.key_down(SELECT).unwrap();
        f.controller.key_down(SELECT).unwrap();

        assert_eq!(events(&f), vec!["press:Select"]);
    }

    #[test]
    fn unrecognized_raw_codes_are_dropped() {
        let mut f = fixture();

        f.controller.key_down(999).unwrap();
        f.controller.key_up(999).unwrap();

        assert!(events(&f).is_empty());
        assert!(f.ticker.borrow().armed.is_empty());
    }

    #[test]
    fn release_cancels_pending_repeat() {
        let mut f = fixture();

        f.controller.key_down(UP).unwrap();
        let (pending, _) = f.ticker.borrow().last_armed().unwrap();
        f.controller.key_up(UP).unwrap();

        assert_eq!(f.ticker.borrow().cancelled, vec![pending]);

        // A tick that was in flight when the timer was cancelled arrives with
        // a stale handle and must not produce a repeat.
        f.controller.timer_fired(pending).unwrap();
        assert_eq!(events(&f), vec!["press:Up", "release:Up"]);
    }

    #[test]
    fn resync_clears_without_release() {
        let mut f = fixture();

        f.controller.key_down(UP).unwrap();
        f.controller.resync();

        assert_eq!(events(&f), vec!["press:Up"]);

        // A fresh down for any key produces a fresh press; the stale held
        // bookkeeping from before the resync is gone.
        f.controller.key_down(UP).unwrap();
        assert_eq!(events(&f), vec!["press:Up", "press:Up"]);
    }

    #[test]
    fn suspend_passes_raw_signals_through_until_resync() {
        let mut f = fixture();

        f.controller.suspend();
        assert!(f.controller.is_suspended());

        f.controller.key_down(UP).unwrap();
        f.controller.key_up(UP).unwrap();
        assert!(events(&f).is_empty());

        f.controller.resync();
        assert!(!f.controller.is_suspended());

        f.controller.key_down(UP).unwrap();
        assert_eq!(events(&f), vec!["press:Up"]);
    }

    #[test]
    fn schedule_swap_resets_cursor_to_end() {
        let mut f = fixture();

        f.controller.key_down(UP).unwrap();
        fire_pending(&mut f);
        fire_pending(&mut f);

        f.controller.set_button_intervals(&[
            Duration::from_millis(500),
            Duration::from_millis(900),
        ]);
        fire_pending(&mut f);

        let (_, last) = f.ticker.borrow().last_armed().unwrap();
        assert_eq!(last, Duration::from_millis(900));

        f.controller.restore_default_intervals();
        fire_pending(&mut f);
        let (_, last) = f.ticker.borrow().last_armed().unwrap();
        assert_eq!(last, Duration::from_millis(400));
    }

    #[test]
    fn non_sentinel_history_pop_becomes_back_press_and_release() {
        let mut f = fixture();
        assert_eq!(f.history.borrow().pushes, 1);

        f.controller.history_popped(HistoryEntry::Entry).unwrap();

        assert_eq!(events(&f), vec!["press:Back", "release:Back"]);
        // Interception is re-armed with a fresh sentinel.
        assert_eq!(f.history.borrow().pushes, 2);
    }

    #[test]
    fn sentinel_pop_only_rearms() {
        let mut f = fixture();

        f.controller.history_popped(HistoryEntry::Sentinel).unwrap();

        assert!(events(&f).is_empty());
        assert_eq!(f.history.borrow().pushes, 2);
    }
}
