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

//! Text entry overlay for category search.
//!
//! While the overlay is open, raw key events belong to the managed text
//! input component rather than the button controller. The application uses
//! the [`EntryOutcome`] returned from event handling to suspend button
//! processing on open and to resynchronise it on close, so that no stale
//! held-key state survives the focus change.

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

/// What the application should do after the overlay has seen an event.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EntryOutcome {
    /// The overlay was just opened. Suspend button input.
    Opened,
    /// The overlay was just closed. Resynchronise button input.
    Closed,
    /// A non-empty query was submitted and the overlay closed.
    Submitted(String),
    /// The event was consumed by the text input.
    Consumed,
    /// The overlay is closed and the event is not its trigger.
    Ignored,
}

pub(crate) struct SearchEntry {
    active: bool,
    pub(crate) input: Input,
}

impl SearchEntry {

    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn handle_event(&mut self, event: Event) -> EntryOutcome {
        if self.active {
            match event {
                Event::Key(key_event) => {
                    match key_event.code {
                        KeyCode::Esc => {
                            self.active = false;
                            self.input.reset();
                            EntryOutcome::Closed
                        }

                        KeyCode::Enter => {
                            let buffer = self.input.value().trim().to_string();
                            self.active = false;
                            self.input.reset();
                            if buffer.is_empty() {
                                EntryOutcome::Closed
                            } else {
                                EntryOutcome::Submitted(buffer)
                            }
                        }

                        _ => {
                            // Delegate all other key events to the managed
                            // input component.
                            self.input.handle_event(&event);
                            EntryOutcome::Consumed
                        }
                    }
                }

                _ => EntryOutcome::Consumed,
            }
        } else {
            match event {
                Event::Key(key_event) if key_event.code == KeyCode::Char('/') => {
                    self.active = true;
                    EntryOutcome::Opened
                }

                _ => EntryOutcome::Ignored,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn slash_opens_and_escape_closes() {
        let mut entry = SearchEntry::new();

        assert_eq!(entry.handle_event(key(KeyCode::Char('x'))), EntryOutcome::Ignored);
        assert_eq!(entry.handle_event(key(KeyCode::Char('/'))), EntryOutcome::Opened);
        assert!(entry.active());

        assert_eq!(entry.handle_event(key(KeyCode::Esc)), EntryOutcome::Closed);
        assert!(!entry.active());
    }

    #[test]
    fn typed_text_is_submitted_on_enter() {
        let mut entry = SearchEntry::new();
        entry.handle_event(key(KeyCode::Char('/')));

        for ch in "docs".chars() {
            assert_eq!(entry.handle_event(key(KeyCode::Char(ch))), EntryOutcome::Consumed);
        }

        assert_eq!(
            entry.handle_event(key(KeyCode::Enter)),
            EntryOutcome::Submitted("docs".to_string())
        );
        assert!(!entry.active());
        assert_eq!(entry.input.value(), "");
    }

    #[test]
    fn empty_submission_just_closes() {
        let mut entry = SearchEntry::new();
        entry.handle_event(key(KeyCode::Char('/')));

        assert_eq!(entry.handle_event(key(KeyCode::Enter)), EntryOutcome::Closed);
    }
}
