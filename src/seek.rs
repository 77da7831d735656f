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

//! Continuous-seek deceleration engine.
//!
//! While a seek key is held, [`SeekAccelerationEngine`] maintains an anchor
//! position, the provisional scrub target, advanced by a fixed fraction of
//! the content duration on every `buttonrepeat` tick. No real seek is issued
//! until the key is released; intermediate ticks only move the anchor for
//! the scrub display. On release the anchor is committed through the
//! playback collaborator in one jump.
//!
//! When the anchor enters the trailing portion of the content while
//! scrubbing forward, the engine swaps the button controller's repeat
//! schedule for a decelerated one, so the perceived scrub speed drops before
//! the end is reached. The anchor itself is clamped below the duration and
//! can never complete playback on its own.
//!
//! A seek key that is tapped rather than held never produces a repeat, and
//! is handled as a fixed-length skip on release instead; the two paths are
//! mutually exclusive per press.

use std::time::Duration;

use crate::input::ButtonCode;
use crate::player::PlayerState;

/// Fraction of the content duration the anchor moves per repeat tick.
pub(crate) const FAST_SEEK_JUMP_AMOUNT: f64 = 0.03;

/// Fraction of the content duration, measured from the end, inside which
/// forward scrubbing decelerates.
pub(crate) const DECELERATION_PERCENTAGE_MOMENT: f64 = 0.30;

/// The anchor never gets closer to the end than this, so a scrub cannot
/// accidentally complete playback.
pub(crate) const SEEK_END_GUARD_SECS: f64 = 1.0;

/// Decelerated repeat schedule in milliseconds, swapped in near the trailing
/// boundary.
pub(crate) const DECELERATED_INTERVALS_MS: [u64; 5] = [500, 650, 800, 1000, 1250];

/// The slice of the playback collaborator the engine needs: where we are,
/// how long the content is, and the one real seek issued on commit.
pub(crate) trait Playback {
    fn position(&self) -> f64;
    fn duration(&self) -> f64;
    fn seek_to(&mut self, position: f64);
}

/// Control over the button controller's repeat interval schedule.
pub(crate) trait ScheduleControl {
    fn set_button_intervals(&mut self, intervals: &[Duration]);
    fn restore_default_intervals(&mut self);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SeekDirection {
    Forward,
    Back,
}

impl SeekDirection {
    fn for_code(code: ButtonCode) -> Option<Self> {
        match code {
            ButtonCode::Right | ButtonCode::FastForward => Some(Self::Forward),
            ButtonCode::Left | ButtonCode::Rewind => Some(Self::Back),
            _ => None,
        }
    }
}

enum SeekState {
    Idle,
    Seeking {
        direction: SeekDirection,
        /// Provisional scrub target, not yet committed to the player.
        anchor: f64,
        /// Duration snapshot taken when the scrub started.
        duration: f64,
        decelerating: bool,
    },
}

pub(crate) struct SeekAccelerationEngine {
    state: SeekState,
    /// Direction of a seek key that is down but has not repeated yet; a
    /// release in this state is a tap-skip.
    armed: Option<SeekDirection>,
    skip_secs: f64,
    decelerated_intervals: Vec<Duration>,
}

impl SeekAccelerationEngine {
    pub(crate) fn new(skip_secs: f64, decelerated_intervals: &[Duration]) -> Self {
        Self {
            state: SeekState::Idle,
            armed: None,
            skip_secs,
            decelerated_intervals: decelerated_intervals.to_vec(),
        }
    }

    /// Whether a held-scrub session is in progress.
    pub(crate) fn is_skipping(&self) -> bool {
        matches!(self.state, SeekState::Seeking { .. })
    }

    /// The current anchor position, while scrubbing.
    pub(crate) fn anchor(&self) -> Option<f64> {
        match self.state {
            SeekState::Seeking { anchor, .. } => Some(anchor),
            SeekState::Idle => None,
        }
    }

    /// Records a seek key going down. Nothing moves yet; the press only arms
    /// either the scrub (if repeats follow) or the tap-skip (if not).
    pub(crate) fn on_button_press(&mut self, code: ButtonCode) {
        if let Some(direction) = SeekDirection::for_code(code) {
            self.armed = Some(direction);
        }
    }

    /// Advances the anchor on a repeat tick of a held seek key, returning
    /// the new anchor for the scrub display.
    ///
    /// The first repeat starts the scrub session from the current playback
    /// position. Entering the trailing deceleration zone while scrubbing
    /// forward swaps the repeat schedule; leaving it restores the default.
    pub(crate) fn on_button_repeat(
        &mut self,
        code: ButtonCode,
        playback: &dyn Playback,
        schedule: &mut dyn ScheduleControl,
    ) -> Option<f64> {
        let direction = SeekDirection::for_code(code)?;

        if let SeekState::Idle = self.state {
            if self.armed != Some(direction) {
                return None;
            }
            self.state = SeekState::Seeking {
                direction,
                anchor: playback.position(),
                duration: playback.duration(),
                decelerating: false,
            };
        }

        let SeekState::Seeking { direction: dir, anchor, duration, decelerating } =
            &mut self.state
        else {
            return None;
        };

        if *dir != direction {
            return None;
        }

        // For very short content the guard line would sit below zero; the
        // anchor still has to stay inside [0, duration].
        let end = (*duration - SEEK_END_GUARD_SECS).max(0.0);
        let step = *duration * FAST_SEEK_JUMP_AMOUNT;
        *anchor = match direction {
            SeekDirection::Forward => (*anchor + step).min(end),
            SeekDirection::Back => (*anchor - step).max(0.0),
        };

        let in_deceleration_zone = direction == SeekDirection::Forward
            && *anchor >= *duration * (1.0 - DECELERATION_PERCENTAGE_MOMENT);

        if in_deceleration_zone != *decelerating {
            if in_deceleration_zone {
                schedule.set_button_intervals(&self.decelerated_intervals);
            } else {
                schedule.restore_default_intervals();
            }
            *decelerating = in_deceleration_zone;
        }

        Some(*anchor)
    }

    /// Finishes the press: commits the anchor if a scrub was in progress,
    /// otherwise performs the fixed-length tap-skip.
    pub(crate) fn on_button_release(
        &mut self,
        code: ButtonCode,
        playback: &mut dyn Playback,
        schedule: &mut dyn ScheduleControl,
    ) {
        let Some(direction) = SeekDirection::for_code(code) else {
            return;
        };

        match std::mem::replace(&mut self.state, SeekState::Idle) {
            SeekState::Seeking { anchor, .. } => {
                playback.seek_to(anchor);
                schedule.restore_default_intervals();
            }
            SeekState::Idle => {
                if self.armed == Some(direction) {
                    let step = match direction {
                        SeekDirection::Forward => self.skip_secs,
                        SeekDirection::Back => -self.skip_secs,
                    };
                    let end = (playback.duration() - SEEK_END_GUARD_SECS).max(0.0);
                    let target = (playback.position() + step).clamp(0.0, end);
                    playback.seek_to(target);
                }
            }
        }

        self.armed = None;
    }

    /// Abandons any scrub in progress without committing, e.g. when the
    /// player loses focus or playback ends underneath us.
    pub(crate) fn cancel(&mut self, schedule: &mut dyn ScheduleControl) {
        if self.is_skipping() {
            schedule.restore_default_intervals();
        }
        self.state = SeekState::Idle;
        self.armed = None;
    }

    /// Playback status notification from the player collaborator.
    pub(crate) fn on_player_state(&mut self, state: PlayerState, schedule: &mut dyn ScheduleControl) {
        if state == PlayerState::Stopped {
            self.cancel(schedule);
        }
    }
}
