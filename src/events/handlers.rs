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

//! Per-event handler functions for the application event loop.
//!
//! Raw terminal input is translated into the platform-shaped signals the
//! input controllers expect (numeric key codes, touch contacts). Normalized
//! button and gesture events come back around through the channel and are
//! routed here to either the seek engine (while the player has key focus)
//! or the focus router, whose resulting actions are applied to the
//! application state.

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::App;
use crate::entry::EntryOutcome;
use crate::events::{AppEvent, TICK_INTERVAL};
use crate::focus::{FocusState, RouterAction};
use crate::input::touch::{TouchContact, TouchPayload};
use crate::input::{ButtonCode, ButtonPhase};
use crate::model::items_at_path;
use crate::player::PlayerState;
use crate::render::screen_regions;
use crate::views::RowData;

/// Display units per terminal cell when adapting pointer input to touch
/// coordinates. Chosen so a swipe spans a plausible number of cells; the
/// gesture controller thinks in pixel-like units.
const CELL_WIDTH_UNITS: f64 = 8.0;
const CELL_HEIGHT_UNITS: f64 = 16.0;

/// Translates raw keyboard input.
///
/// The search entry overlay gets first refusal: while it is open it consumes
/// everything, and its open/close transitions drive the button controller's
/// suspend/resync. Everything else maps onto the numeric key codes the
/// button controller understands.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.entry.handle_event(Event::Key(key)) {
        EntryOutcome::Opened => {
            app.buttons.suspend();
            // Suspending swallows the release of any held seek key, so the
            // scrub session must be abandoned with it.
            abandon_seek(app);
            return Ok(());
        }
        EntryOutcome::Closed => {
            app.buttons.resync();
            abandon_seek(app);
            return Ok(());
        }
        EntryOutcome::Submitted(query) => {
            app.buttons.resync();
            abandon_seek(app);
            return run_search(app, &query);
        }
        EntryOutcome::Consumed => return Ok(()),
        EntryOutcome::Ignored => {}
    }

    if key.code == KeyCode::Char('q') && key.kind == KeyEventKind::Press {
        app.event_tx.send(AppEvent::ExitApplication)?;
        return Ok(());
    }

    let Some(raw) = raw_code_for_key(key.code) else {
        return Ok(());
    };

    match key.kind {
        KeyEventKind::Press => {
            app.buttons.key_down(raw)?;
            // Without keyboard-enhancement support the terminal never
            // reports releases; complete the press immediately so no key is
            // left stuck in the held state.
            if !app.supports_key_release {
                app.buttons.key_up(raw)?;
            }
        }
        // The controller runs its own repeat schedule off the held state.
        KeyEventKind::Repeat => {}
        KeyEventKind::Release => app.buttons.key_up(raw)?,
    }

    Ok(())
}

/// Drops any in-progress scrub without committing its anchor.
fn abandon_seek(app: &mut App) {
    app.seek.cancel(&mut app.buttons);
    app.scrub_anchor.set(None);
}

/// Maps terminal keys onto the numeric remote-control key codes.
fn raw_code_for_key(code: KeyCode) -> Option<u16> {
    match code {
        KeyCode::Up => Some(38),
        KeyCode::Down => Some(40),
        KeyCode::Left => Some(37),
        KeyCode::Right => Some(39),
        KeyCode::Enter => Some(13),
        KeyCode::Esc | KeyCode::Backspace => Some(8),
        KeyCode::Char(' ') => Some(179),
        KeyCode::Char(',') => Some(412),
        KeyCode::Char('.') => Some(417),
        _ => None,
    }
}

/// Adapts pointer input into the touch signals the gesture controller
/// expects: press starts a session, drag moves it, release classifies it.
pub(super) fn process_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    let contact = TouchContact {
        x: mouse.column as f64 * CELL_WIDTH_UNITS,
        y: mouse.row as f64 * CELL_HEIGHT_UNITS,
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let classes = classes_at(app, mouse.column, mouse.row);
            app.touch.touch_begin(&[contact], &classes);
        }
        MouseEventKind::Drag(MouseButton::Left) => app.touch.touch_move(&[contact]),
        MouseEventKind::Up(MouseButton::Left) => app.touch.touch_end()?,
        _ => {}
    }

    Ok(())
}

/// Resolves the element classes under a screen position from the same layout
/// the renderer uses.
fn classes_at(app: &App, column: u16, row: u16) -> Vec<String> {
    let regions = screen_regions(app.screen, app.router.list_expanded());

    let mut classes = Vec::new();
    if regions.list.contains((column, row).into()) {
        classes.push("category-list".to_string());
    }
    if regions.content.contains((column, row).into()) {
        classes.push("content-row".to_string());
    }
    if regions.buttons.contains((column, row).into()) {
        classes.push("action-bar".to_string());
    }
    classes
}

/// Routes a normalized button event.
///
/// While the player has key focus the transport keys belong to the seek
/// engine and never reach the focus router; everything else is forwarded to
/// the focused view through the router.
pub(super) fn process_button_event(
    app: &mut App,
    phase: ButtonPhase,
    code: ButtonCode,
) -> Result<()> {
    if matches!(app.router.state(), FocusState::Player(_)) {
        match code {
            ButtonCode::PlayPause => {
                if phase == ButtonPhase::Press {
                    app.playback.borrow_mut().toggle_pause();
                }
                return Ok(());
            }

            ButtonCode::Left
            | ButtonCode::Right
            | ButtonCode::Rewind
            | ButtonCode::FastForward => {
                match phase {
                    ButtonPhase::Press => app.seek.on_button_press(code),
                    ButtonPhase::Repeat => {
                        let anchor = {
                            let playback = app.playback.borrow();
                            app.seek.on_button_repeat(code, &*playback, &mut app.buttons)
                        };
                        if let Some(anchor) = anchor {
                            app.scrub_anchor.set(Some(anchor));
                        }
                    }
                    ButtonPhase::Release => {
                        {
                            let mut playback = app.playback.borrow_mut();
                            app.seek.on_button_release(code, &mut *playback, &mut app.buttons);
                        }
                        app.scrub_anchor.set(None);
                    }
                }
                return Ok(());
            }

            _ => {}
        }
    }

    if let Some(action) = app.router.handle_button(phase, code) {
        apply_router_action(app, action)?;
    }

    Ok(())
}

pub(super) fn process_gesture_event(app: &mut App, payload: &TouchPayload) -> Result<()> {
    if let Some(action) = app.router.handle_gesture(payload) {
        apply_router_action(app, action)?;
    }
    Ok(())
}

/// Applies an effect the focus router asked for but cannot perform itself.
pub(super) fn apply_router_action(app: &mut App, action: RouterAction) -> Result<()> {
    match action {
        RouterAction::ShowCategory(index) => {
            if let Some(category) = app.catalog.get(index) {
                *app.row_data.borrow_mut() = RowData::from_items(&category.title, &category.items);
            }
            if let Some(row) = &mut app.router.button_row {
                row.show();
            }
            // The catalog is in memory, so the load completes synchronously.
            app.router.content_ready();
        }

        RouterAction::Play { category, path } => {
            let Some(category) = app.catalog.get(category) else {
                return Ok(());
            };
            let Some((leaf, parents)) = path.split_last() else {
                return Ok(());
            };
            if let Some(item) = items_at_path(category, parents).and_then(|items| items.get(*leaf))
            {
                app.playback.borrow_mut().start(&item.title, item.duration_secs);
            }
        }

        RouterAction::StopPlayback => {
            app.playback.borrow_mut().stop();
            app.seek.cancel(&mut app.buttons);
            app.scrub_anchor.set(None);
        }

        RouterAction::ExitApplication => app.event_tx.send(AppEvent::ExitApplication)?,
    }

    Ok(())
}

/// Finds the first category whose title matches the submitted query and
/// selects it directly, skipping the list confirmation step.
fn run_search(app: &mut App, query: &str) -> Result<()> {
    let needle = query.to_lowercase();
    let found = app
        .catalog
        .iter()
        .position(|category| category.title.to_lowercase().contains(&needle));

    if let Some(index) = found {
        if let Some(action) = app.router.select_category(index) {
            apply_router_action(app, action)?;
        }
    }

    Ok(())
}

/// Advances playback by one tick interval and lets the seek engine react to
/// the resulting player state; playback ending underneath a scrub abandons
/// it.
pub(super) fn handle_tick(app: &mut App) {
    let state = {
        let mut playback = app.playback.borrow_mut();
        playback.tick(TICK_INTERVAL);
        playback.state
    };

    app.seek.on_player_state(state, &mut app.buttons);
    if state == PlayerState::Stopped {
        app.scrub_anchor.set(None);
    }
}
