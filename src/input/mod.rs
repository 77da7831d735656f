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

//! Input normalization layer.
//!
//! This module turns raw, noisy platform signals into a clean event stream:
//!
//! * [`buttons`]: debounces a physical remote and emits press/repeat/release
//!   events on a decaying timing schedule.
//! * [`touch`]: classifies single-finger touch sessions as taps or
//!   directional swipes.
//! * [`ticker`]: the cancellable timer abstraction backing key repeat.
//! * [`back`]: sentinel-based interception of the platform's native
//!   back-navigation signal.

pub(crate) mod back;
pub(crate) mod buttons;
pub(crate) mod ticker;
pub(crate) mod touch;

/// Logical remote-control keys recognized by the application.
///
/// Raw platform signals carry numeric codes; only the nine codes mapping onto
/// this set are processed, everything else passes through untouched. Swipe
/// gestures reuse the four directional variants as their direction code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum ButtonCode {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    Rewind,
    PlayPause,
    FastForward,
}

impl ButtonCode {
    /// Maps a raw platform key code to a logical button.
    ///
    /// Returns `None` for unrecognized codes, which callers drop silently.
    pub(crate) fn from_raw(code: u16) -> Option<Self> {
        match code {
            38 => Some(Self::Up),
            40 => Some(Self::Down),
            37 => Some(Self::Left),
            39 => Some(Self::Right),
            13 => Some(Self::Select),
            8 => Some(Self::Back),
            412 => Some(Self::Rewind),
            179 => Some(Self::PlayPause),
            417 => Some(Self::FastForward),
            _ => None,
        }
    }
}

/// The phase of a normalized button event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ButtonPhase {
    Press,
    Repeat,
    Release,
}
