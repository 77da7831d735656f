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

//! Full-screen player overlay.
//!
//! Renders the playback state and the scrub bar. While a seek key is held
//! the bar follows the uncommitted anchor position rather than the real
//! playback position. Media keys never reach this view because the
//! application routes them to the seek engine, so the only control it
//! answers to is BACK, which exits playback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::focus::view::{ControlEvent, FocusView, SemanticEvent};
use crate::input::ButtonCode;
use crate::player::{PlaybackSession, PlayerState};
use crate::seek::Playback;
use crate::theme::Theme;
use crate::util::format::format_time;

pub(crate) struct PlayerOverlayView {
    session: Rc<RefCell<PlaybackSession>>,
    /// Uncommitted scrub anchor, set by the application while a held seek is
    /// in progress.
    scrub_anchor: Rc<Cell<Option<f64>>>,
    visible: bool,
}

impl PlayerOverlayView {
    pub(crate) fn new(
        session: Rc<RefCell<PlaybackSession>>,
        scrub_anchor: Rc<Cell<Option<f64>>>,
    ) -> Self {
        Self {
            session,
            scrub_anchor,
            visible: false,
        }
    }
}

impl FocusView for PlayerOverlayView {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn handle_controls(&mut self, event: &ControlEvent) -> Option<SemanticEvent> {
        match event {
            ControlEvent::Press(ButtonCode::Back) => Some(SemanticEvent::Exit),
            _ => None,
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let session = self.session.borrow();
        let duration = session.duration();

        let anchor = self.scrub_anchor.get();
        let shown_position = anchor.unwrap_or_else(|| session.position());
        let ratio = if duration > 0.0 {
            (shown_position / duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let status = match (anchor, session.state) {
            (Some(_), _) => "Seeking",
            (None, PlayerState::Playing) => "Playing",
            (None, PlayerState::Paused) => "Paused",
            (None, PlayerState::Stopped) => "Stopped",
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .title(format!("{status}: {}", session.title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [info, bar] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        let times = format!("{} / {}", format_time(shown_position), format_time(duration));
        frame.render_widget(
            Paragraph::new(times).style(Style::default().fg(theme.dim_fg)),
            info,
        );

        let gauge = Gauge::default()
            .ratio(ratio)
            .use_unicode(true)
            .gauge_style(
                Style::default()
                    .fg(theme.accent_colour)
                    .bg(theme.gauge_track_colour),
            )
            .label("");
        frame.render_widget(gauge, bar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_back_exits_playback() {
        let session = Rc::new(RefCell::new(PlaybackSession::idle()));
        let anchor = Rc::new(Cell::new(None));
        let mut view = PlayerOverlayView::new(session, anchor);

        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Back)),
            Some(SemanticEvent::Exit)
        );
        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Select)),
            None
        );
        assert_eq!(
            view.handle_controls(&ControlEvent::Release(ButtonCode::Back)),
            None
        );
    }
}
