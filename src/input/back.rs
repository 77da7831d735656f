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

//! Platform back-navigation interception.
//!
//! Some platforms own a navigation history and fire a "navigate back" signal
//! the application cannot observe directly. The trick used here is to keep
//! exactly one sentinel entry pushed onto that history at all times: when a
//! pop removes a non-sentinel entry, the button controller reinterprets it as
//! a BACK key press and pushes a fresh sentinel to re-arm the interception.
//!
//! Platforms without a native back-navigation concept plug in
//! [`NoopHistory`].

/// One record in the platform navigation history, as seen by the
/// interception logic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum HistoryEntry {
    /// The placeholder entry kept present so its removal can be detected.
    Sentinel,
    /// Any entry pushed by the rest of the application.
    Entry,
}

/// The slice of the platform history the interception needs: the ability to
/// push a sentinel. Pops are reported to the button controller by the
/// platform signal layer, not polled through this trait.
pub(crate) trait NavigationHistory {
    fn push_sentinel(&mut self);
}

/// History for platforms with no back-navigation concept. Pushes go nowhere
/// and no pop signal ever arrives.
pub(crate) struct NoopHistory;

impl NavigationHistory for NoopHistory {
    fn push_sentinel(&mut self) {}
}
