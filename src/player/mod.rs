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

//! Playback position tracking.
//!
//! The real decoding and rendering of media belongs to a platform player SDK
//! outside this application; the input core only needs the thin collaborator
//! surface defined by [`Playback`](crate::seek::Playback): current position,
//! duration, and a seek operation. [`PlaybackSession`] is the in-process
//! stand-in backing the demo shell, advancing its position on the
//! application tick.

use std::time::Duration;

use crate::seek::Playback;

/// Playback status of the current session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// One playback session: a title, a position and a duration.
pub(crate) struct PlaybackSession {
    pub(crate) title: String,
    pub(crate) state: PlayerState,
    position_secs: f64,
    duration_secs: f64,
}

impl PlaybackSession {
    pub(crate) fn idle() -> Self {
        Self {
            title: String::new(),
            state: PlayerState::Stopped,
            position_secs: 0.0,
            duration_secs: 0.0,
        }
    }

    /// Starts playing `title` from the beginning.
    pub(crate) fn start(&mut self, title: &str, duration_secs: u64) {
        self.title = title.to_string();
        self.state = PlayerState::Playing;
        self.position_secs = 0.0;
        self.duration_secs = duration_secs as f64;
    }

    pub(crate) fn stop(&mut self) {
        self.state = PlayerState::Stopped;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
    }

    pub(crate) fn toggle_pause(&mut self) {
        self.state = match self.state {
            PlayerState::Playing => PlayerState::Paused,
            PlayerState::Paused => PlayerState::Playing,
            PlayerState::Stopped => PlayerState::Stopped,
        };
    }

    /// Advances the position by the elapsed tick interval while playing.
    /// Reaching the end of the content stops the session.
    pub(crate) fn tick(&mut self, elapsed: Duration) {
        if self.state != PlayerState::Playing {
            return;
        }

        self.position_secs += elapsed.as_secs_f64();
        if self.position_secs >= self.duration_secs {
            self.stop();
        }
    }
}

impl Playback for PlaybackSession {
    fn position(&self) -> f64 {
        self.position_secs
    }

    fn duration(&self) -> f64 {
        self.duration_secs
    }

    fn seek_to(&mut self, position: f64) {
        self.position_secs = position.clamp(0.0, self.duration_secs);
    }
}
