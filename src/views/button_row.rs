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

//! The button row underneath the content row.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::focus::view::{ControlEvent, FocusView, SelectTarget, SemanticEvent};
use crate::input::ButtonCode;
use crate::theme::Theme;

pub(crate) struct ButtonRowView {
    labels: Vec<String>,
    index: usize,
    visible: bool,
    active: bool,
}

impl ButtonRowView {
    pub(crate) fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            index: 0,
            visible: false,
            active: false,
        }
    }

    fn move_cursor(&mut self, code: ButtonCode) -> Option<SemanticEvent> {
        let next = match code {
            ButtonCode::Left => self.index.checked_sub(1)?,
            ButtonCode::Right if self.index + 1 < self.labels.len() => self.index + 1,
            _ => return None,
        };
        self.index = next;
        Some(SemanticEvent::IndexChange(next))
    }
}

impl FocusView for ButtonRowView {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.active = false;
    }

    fn make_active(&mut self) {
        self.visible = true;
        self.active = true;
    }

    fn handle_controls(&mut self, event: &ControlEvent) -> Option<SemanticEvent> {
        match event {
            ControlEvent::Press(code) | ControlEvent::Repeat(code) | ControlEvent::Swipe(code) => {
                match code {
                    ButtonCode::Left | ButtonCode::Right => self.move_cursor(*code),
                    ButtonCode::Up | ButtonCode::Back => Some(SemanticEvent::Exit),
                    ButtonCode::Select if matches!(event, ControlEvent::Press(_)) => {
                        Some(SemanticEvent::Select {
                            index: self.index,
                            target: SelectTarget::Action,
                        })
                    }
                    _ => None,
                }
            }
            ControlEvent::Tap { .. } => Some(SemanticEvent::Select {
                index: self.index,
                target: SelectTarget::Action,
            }),
            ControlEvent::Release(_) => None,
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let mut spans = Vec::new();
        for (i, label) in self.labels.iter().enumerate() {
            let style = if i == self.index && self.active {
                Style::default()
                    .fg(theme.focus_fg)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.dim_fg)
            };
            spans.push(Span::styled(format!(" [{label}] "), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
