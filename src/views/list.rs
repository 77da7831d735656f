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

//! The left-hand category navigation list.
//!
//! Key navigation moves a cursor that is only committed by SELECT (or a
//! direct tap), so the router can distinguish the current cursor position
//! from the confirmed selection.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::focus::view::{ControlEvent, FocusView, SelectTarget, SemanticEvent};
use crate::input::ButtonCode;
use crate::theme::Theme;

pub(crate) struct CategoryListView {
    titles: Vec<String>,
    index: usize,
    visible: bool,
    expanded: bool,
    active: bool,
    list_state: ListState,
}

impl CategoryListView {
    pub(crate) fn new(titles: Vec<String>) -> Self {
        Self {
            titles,
            index: 0,
            visible: false,
            expanded: false,
            active: false,
            list_state: ListState::default(),
        }
    }

    fn move_cursor(&mut self, code: ButtonCode) -> Option<SemanticEvent> {
        let next = match code {
            ButtonCode::Up => self.index.checked_sub(1)?,
            ButtonCode::Down if self.index + 1 < self.titles.len() => self.index + 1,
            _ => return None,
        };

        self.index = next;
        Some(SemanticEvent::IndexChange(next))
    }

    fn select_current(&self) -> Option<SemanticEvent> {
        if self.titles.is_empty() {
            return None;
        }
        Some(SemanticEvent::Select {
            index: self.index,
            target: SelectTarget::Category,
        })
    }
}

impl FocusView for CategoryListView {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.active = false;
    }

    fn expand(&mut self) {
        self.expanded = true;
    }

    fn collapse(&mut self) {
        self.expanded = false;
        self.active = false;
    }

    fn make_active(&mut self) {
        self.active = true;
    }

    fn handle_controls(&mut self, event: &ControlEvent) -> Option<SemanticEvent> {
        match event {
            ControlEvent::Press(code) | ControlEvent::Repeat(code) | ControlEvent::Swipe(code) => {
                match code {
                    ButtonCode::Up | ButtonCode::Down => self.move_cursor(*code),
                    ButtonCode::Select | ButtonCode::Right
                        if matches!(event, ControlEvent::Press(_)) =>
                    {
                        self.select_current()
                    }
                    ButtonCode::Back | ButtonCode::Left
                        if matches!(event, ControlEvent::Press(_)) =>
                    {
                        Some(SemanticEvent::Deselect)
                    }
                    _ => None,
                }
            }
            // Touch commits directly, with no confirmation step.
            ControlEvent::Tap { .. } => self.select_current(),
            ControlEvent::Release(_) => None,
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let highlight = if self.active {
            Style::default()
                .fg(theme.focus_fg)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.dim_fg)
        };

        let items: Vec<ListItem> = self
            .titles
            .iter()
            .map(|title| ListItem::new(title.clone()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border_colour))
                    .title("Categories"),
            )
            .highlight_style(highlight);

        self.list_state.select(Some(self.index));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> CategoryListView {
        CategoryListView::new(vec!["Featured".into(), "Documentaries".into(), "Shorts".into()])
    }

    #[test]
    fn cursor_moves_emit_index_change_and_clamp_at_edges() {
        let mut view = view();

        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Up)),
            None
        );
        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Down)),
            Some(SemanticEvent::IndexChange(1))
        );
        assert_eq!(
            view.handle_controls(&ControlEvent::Repeat(ButtonCode::Down)),
            Some(SemanticEvent::IndexChange(2))
        );
        assert_eq!(
            view.handle_controls(&ControlEvent::Repeat(ButtonCode::Down)),
            None
        );
    }

    #[test]
    fn select_commits_the_cursor_position() {
        let mut view = view();
        view.handle_controls(&ControlEvent::Press(ButtonCode::Down));

        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Select)),
            Some(SemanticEvent::Select { index: 1, target: SelectTarget::Category })
        );
    }

    #[test]
    fn back_deselects() {
        let mut view = view();

        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Back)),
            Some(SemanticEvent::Deselect)
        );
    }

    #[test]
    fn tap_selects_directly() {
        let mut view = view();

        assert_eq!(
            view.handle_controls(&ControlEvent::Tap { x: 5.0, y: 5.0 }),
            Some(SemanticEvent::Select { index: 0, target: SelectTarget::Category })
        );
    }
}
