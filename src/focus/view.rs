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

//! The collaborator contract between the focus router and its views.
//!
//! Views hold no routing logic: the router forwards normalized input to the
//! focused view as a [`ControlEvent`], and the view answers with an optional
//! [`SemanticEvent`] describing what the input meant in its context. The
//! router is the only consumer of semantic events and the only mutator of
//! focus state.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::input::ButtonCode;
use crate::theme::Theme;

/// A normalized input event forwarded to the focused view.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ControlEvent {
    Press(ButtonCode),
    Repeat(ButtonCode),
    Release(ButtonCode),
    /// A swipe, with its direction reusing a directional button code.
    Swipe(ButtonCode),
    Tap { x: f64, y: f64 },
}

/// What a selection landed on, from the router's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SelectTarget {
    /// A category in the navigation list.
    Category,
    /// A playable content item.
    Playable,
    /// A drill-down item opening a nested row.
    Subcategory,
    /// A button-row or dialog affordance.
    Action,
}

/// A semantic event emitted by a view in response to input it handled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SemanticEvent {
    /// The view's current item was committed.
    Select { index: usize, target: SelectTarget },
    /// The view gave up its pending selection.
    Deselect,
    /// Focus left the view through its "up" edge.
    Exit,
    /// Focus bounced off the view's "down" edge.
    Bounce(Option<ButtonCode>),
    /// The view's cursor moved without committing.
    IndexChange(usize),
    /// The view wants focus.
    MakeActive,
    /// The view finished populating its content.
    LoadComplete,
}

/// Contract every focusable view fulfils for the router.
///
/// `show`/`hide` and `expand`/`collapse` are the only externally observable
/// side effects of a focus transition; views own their rendering and the
/// router owns nothing visual.
pub(crate) trait FocusView {
    fn show(&mut self);
    fn hide(&mut self);

    fn expand(&mut self) {}
    fn collapse(&mut self) {}

    /// Marks the view as the current recipient of input.
    fn make_active(&mut self) {}

    /// Tears the view down when it is permanently discarded, e.g. a popped
    /// drill-down row.
    fn remove(&mut self) {}

    /// Handles a normalized input event, answering with the semantic event
    /// it amounts to in this view's context, if any.
    fn handle_controls(&mut self, event: &ControlEvent) -> Option<SemanticEvent>;

    /// Draws the view if it is currently visible.
    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}
