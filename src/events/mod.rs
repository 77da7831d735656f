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

//! Application event loop.
//!
//! Everything that happens in the application arrives here as an
//! [`AppEvent`] on a single mpsc channel: raw terminal input from the input
//! thread, repeat-timer ticks from the button controller's timers, the
//! periodic render tick, and the normalized button and gesture events that
//! the input controllers publish on their buses. Routing every stage of the
//! pipeline back through the channel keeps dispatch strictly sequential;
//! a handler can never observe a half-applied state change from another
//! handler.
//!
//! # Organization
//!
//! * [`handlers`]: The per-event handler functions; raw input translation,
//!   focus routing and playback effects.

mod handlers;
use handlers::*;

use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::App;
use crate::input::touch::TouchPayload;
use crate::input::ticker::TimerHandle;
use crate::input::{ButtonCode, ButtonPhase};
use crate::render::draw;

/// Interval of the periodic tick, effectively the minimum frame rate.
pub(crate) const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub(crate) enum AppEvent {
    /// Raw keyboard input from the terminal.
    Key(KeyEvent),
    /// Raw pointer input from the terminal, adapted into touch signals.
    Mouse(MouseEvent),

    /// A normalized button event published by the button controller.
    Button(ButtonPhase, ButtonCode),
    /// A classified tap or swipe published by the gesture controller.
    Gesture(TouchPayload),

    /// A key-repeat timer fired.
    RepeatTimer(TimerHandle),

    Tick,

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::Mouse(mouse) => process_mouse_event(app, mouse)?,
            AppEvent::Button(phase, code) => process_button_event(app, phase, code)?,
            AppEvent::Gesture(payload) => process_gesture_event(app, &payload)?,
            AppEvent::RepeatTimer(handle) => app.buttons.timer_fired(handle)?,
            AppEvent::Tick | AppEvent::ExitApplication => handle_tick(app),
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}
