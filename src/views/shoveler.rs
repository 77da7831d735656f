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

//! The horizontal content row ("shoveler").
//!
//! Shows the items of the committed category, or of one drill-down level.
//! The row reads its entries through a shared [`RowData`] cell so the
//! application can repopulate it when a new category is committed, without
//! reaching into the view.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::focus::view::{ControlEvent, FocusView, SelectTarget, SemanticEvent};
use crate::input::ButtonCode;
use crate::model::{ContentItem, ContentKind};
use crate::theme::Theme;

#[derive(Clone, Debug)]
pub(crate) struct RowEntry {
    pub(crate) title: String,
    pub(crate) kind: ContentKind,
    pub(crate) duration_secs: u64,
}

/// The data a content row renders, shared between the owning application and
/// the view.
#[derive(Clone, Debug, Default)]
pub(crate) struct RowData {
    pub(crate) title: String,
    pub(crate) entries: Vec<RowEntry>,
}

impl RowData {
    pub(crate) fn from_items(title: &str, items: &[ContentItem]) -> Self {
        Self {
            title: title.to_string(),
            entries: items
                .iter()
                .map(|item| RowEntry {
                    title: item.title.clone(),
                    kind: item.kind,
                    duration_secs: item.duration_secs,
                })
                .collect(),
        }
    }
}

pub(crate) struct ShovelerView {
    data: Rc<RefCell<RowData>>,
    index: usize,
    visible: bool,
    active: bool,
}

impl ShovelerView {
    pub(crate) fn new(data: Rc<RefCell<RowData>>) -> Self {
        Self {
            data,
            index: 0,
            visible: false,
            active: false,
        }
    }

    /// Clamps the cursor back into range after the shared row data changed.
    fn clamp_cursor(&mut self) {
        let len = self.data.borrow().entries.len();
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }

    fn move_cursor(&mut self, code: ButtonCode) -> Option<SemanticEvent> {
        self.clamp_cursor();
        let len = self.data.borrow().entries.len();

        let next = match code {
            ButtonCode::Left => self.index.checked_sub(1)?,
            ButtonCode::Right if self.index + 1 < len => self.index + 1,
            _ => return None,
        };

        self.index = next;
        Some(SemanticEvent::IndexChange(next))
    }

    fn select_current(&mut self) -> Option<SemanticEvent> {
        self.clamp_cursor();
        let data = self.data.borrow();
        let entry = data.entries.get(self.index)?;

        let target = match entry.kind {
            ContentKind::Playable => SelectTarget::Playable,
            ContentKind::Subcategory => SelectTarget::Subcategory,
        };

        Some(SemanticEvent::Select { index: self.index, target })
    }
}

impl FocusView for ShovelerView {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.active = false;
    }

    fn make_active(&mut self) {
        self.active = true;
        self.clamp_cursor();
    }

    fn handle_controls(&mut self, event: &ControlEvent) -> Option<SemanticEvent> {
        match event {
            ControlEvent::Press(code) | ControlEvent::Repeat(code) | ControlEvent::Swipe(code) => {
                match code {
                    ButtonCode::Left | ButtonCode::Right => self.move_cursor(*code),
                    ButtonCode::Up => Some(SemanticEvent::Exit),
                    ButtonCode::Down => Some(SemanticEvent::Bounce(Some(ButtonCode::Down))),
                    ButtonCode::Select if matches!(event, ControlEvent::Press(_)) => {
                        self.select_current()
                    }
                    ButtonCode::Back if matches!(event, ControlEvent::Press(_)) => {
                        Some(SemanticEvent::Exit)
                    }
                    _ => None,
                }
            }
            ControlEvent::Tap { .. } => self.select_current(),
            ControlEvent::Release(_) => None,
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }
        self.clamp_cursor();

        let data = self.data.borrow();

        let mut spans = Vec::new();
        for (i, entry) in data.entries.iter().enumerate() {
            let marker = match entry.kind {
                ContentKind::Playable => "",
                ContentKind::Subcategory => " »",
            };
            let label = format!(" {}{} ", entry.title, marker);

            let style = if i == self.index && self.active {
                Style::default()
                    .fg(theme.focus_fg)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.dim_fg)
            };

            spans.push(Span::styled(label, style));
            spans.push(Span::raw("  "));
        }

        let row = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_colour))
                .title(data.title.clone()),
        );

        frame.render_widget(row, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::sample_catalog;

    fn view() -> (ShovelerView, Rc<RefCell<RowData>>) {
        let catalog = sample_catalog();
        let data = Rc::new(RefCell::new(RowData::from_items(
            &catalog[0].title,
            &catalog[0].items,
        )));
        (ShovelerView::new(Rc::clone(&data)), data)
    }

    #[test]
    fn edges_exit_up_and_bounce_down() {
        let (mut view, _) = view();

        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Up)),
            Some(SemanticEvent::Exit)
        );
        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Down)),
            Some(SemanticEvent::Bounce(Some(ButtonCode::Down)))
        );
    }

    #[test]
    fn select_distinguishes_playable_from_subcategory() {
        let (mut view, _) = view();

        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Select)),
            Some(SemanticEvent::Select { index: 0, target: SelectTarget::Playable })
        );

        view.handle_controls(&ControlEvent::Press(ButtonCode::Right));
        view.handle_controls(&ControlEvent::Press(ButtonCode::Right));
        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Select)),
            Some(SemanticEvent::Select { index: 2, target: SelectTarget::Subcategory })
        );
    }

    #[test]
    fn cursor_clamps_when_shared_data_shrinks() {
        let (mut view, data) = view();

        for _ in 0..3 {
            view.handle_controls(&ControlEvent::Press(ButtonCode::Right));
        }
        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Select)),
            Some(SemanticEvent::Select { index: 3, target: SelectTarget::Playable })
        );

        data.borrow_mut().entries.truncate(2);
        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Select)),
            Some(SemanticEvent::Select { index: 1, target: SelectTarget::Playable })
        );
    }

    #[test]
    fn empty_row_produces_no_selection() {
        let data = Rc::new(RefCell::new(RowData::default()));
        let mut view = ShovelerView::new(data);

        assert_eq!(
            view.handle_controls(&ControlEvent::Press(ButtonCode::Select)),
            None
        );
    }
}
