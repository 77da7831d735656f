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

//! Modal confirmation dialog.
//!
//! Used both for the exit confirmation raised before anything has focus and
//! for entitlement notices bounced off the content row. Option 0 is the
//! affirmative; the router decides what confirming means from its own
//! context.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::focus::view::{ControlEvent, FocusView, SelectTarget, SemanticEvent};
use crate::input::ButtonCode;
use crate::theme::Theme;

pub(crate) struct DialogView {
    message: String,
    options: Vec<String>,
    index: usize,
    visible: bool,
}

impl DialogView {
    pub(crate) fn new(message: &str, options: Vec<String>) -> Self {
        Self {
            message: message.to_string(),
            options,
            index: 0,
            visible: false,
        }
    }
}

impl FocusView for DialogView {
    fn show(&mut self) {
        self.visible = true;
        self.index = 0;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn handle_controls(&mut self, event: &ControlEvent) -> Option<SemanticEvent> {
        match event {
            ControlEvent::Press(code) | ControlEvent::Swipe(code) => match code {
                ButtonCode::Left => {
                    self.index = self.index.saturating_sub(1);
                    Some(SemanticEvent::IndexChange(self.index))
                }
                ButtonCode::Right => {
                    if self.index + 1 < self.options.len() {
                        self.index += 1;
                    }
                    Some(SemanticEvent::IndexChange(self.index))
                }
                ButtonCode::Select => Some(SemanticEvent::Select {
                    index: self.index,
                    target: SelectTarget::Action,
                }),
                ButtonCode::Back => Some(SemanticEvent::Exit),
                _ => None,
            },
            ControlEvent::Tap { .. } => Some(SemanticEvent::Select {
                index: self.index,
                target: SelectTarget::Action,
            }),
            _ => None,
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let [centered] = Layout::horizontal([Constraint::Length(44)])
            .flex(Flex::Center)
            .areas(area);
        let [centered] = Layout::vertical([Constraint::Length(7)])
            .flex(Flex::Center)
            .areas(centered);

        frame.render_widget(Clear, centered);

        let mut options = Vec::new();
        for (i, option) in self.options.iter().enumerate() {
            let style = if i == self.index {
                Style::default()
                    .fg(theme.focus_fg)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.dim_fg)
            };
            options.push(Span::styled(format!(" [{option}] "), style));
            options.push(Span::raw("  "));
        }

        let body = Paragraph::new(vec![
            Line::from(self.message.clone()),
            Line::default(),
            Line::from(options),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent_colour))
                .padding(Padding::uniform(1)),
        );

        frame.render_widget(body, centered);
    }
}
