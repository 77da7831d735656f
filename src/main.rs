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

//! # Ten-foot input core.
//!
//! The input-normalization and focus-routing core of a media browsing
//! client, wrapped in a terminal demo shell.
//!
//! Raw key and pointer signals are normalized by the input controllers into
//! clean button and gesture streams; the focus router forwards them to the
//! one view holding focus and moves focus around a category list, a content
//! row, drill-down rows, a player overlay and modal dialogs. Held seek keys
//! go through an accelerating scrub engine instead of the router.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern so the
//! terminal state is preserved even in the event of a crash. All inputs,
//! including the button controller's own repeat timers, are funneled into
//! one `std::sync::mpsc` channel and processed sequentially by the event
//! loop on the main thread.

mod bus;
mod config;
mod entry;
mod events;
mod focus;
mod input;
mod model;
mod player;
mod render;
mod seek;
mod theme;
mod util;
mod views;

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{
    config::AppConfig,
    entry::SearchEntry,
    events::{AppEvent, TICK_INTERVAL, process_events},
    focus::FocusRouter,
    input::back::NoopHistory,
    input::buttons::{BUTTON_PRESS, BUTTON_RELEASE, BUTTON_REPEAT, ButtonInputController},
    input::ticker::ThreadTicker,
    input::touch::{SWIPE, TouchGestureController},
    input::{ButtonCode, ButtonPhase},
    model::{Category, sample_catalog},
    player::PlaybackSession,
    seek::SeekAccelerationEngine,
    theme::Theme,
    views::{
        ButtonRowView, CatalogFactory, CategoryListView, DialogView, PlayerOverlayView, RowData,
        ShovelerView,
    },
};

/// Application state.
struct App {
    pub theme: Theme,

    /// Frame area of the last render, for pointer hit testing.
    pub screen: Rect,
    /// Whether the terminal reports key releases; without them every press
    /// is completed synthetically.
    pub supports_key_release: bool,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub catalog: Vec<Category>,
    /// Content row data, shared with the shoveler view.
    pub row_data: Rc<RefCell<RowData>>,
    /// Playback session, shared with the player overlay.
    pub playback: Rc<RefCell<PlaybackSession>>,
    /// Uncommitted scrub position, shared with the player overlay.
    pub scrub_anchor: Rc<Cell<Option<f64>>>,

    pub buttons: ButtonInputController,
    pub touch: TouchGestureController,
    pub seek: SeekAccelerationEngine,
    pub router: FocusRouter,
    pub entry: SearchEntry,
}

impl App {
    /// Create a new instance of application state, wiring the input
    /// controllers' buses into the application event channel.
    pub fn new(config: AppConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let catalog = sample_catalog();
        let titles: Vec<String> = catalog.iter().map(|c| c.title.clone()).collect();

        let row_data = Rc::new(RefCell::new(RowData::default()));
        let playback = Rc::new(RefCell::new(PlaybackSession::idle()));
        let scrub_anchor = Rc::new(Cell::new(None));

        let intervals: Vec<Duration> = config
            .button_intervals_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect();
        let decelerated: Vec<Duration> = config
            .decelerated_intervals_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect();

        let ticker = ThreadTicker::new(event_tx.clone());
        let mut buttons =
            ButtonInputController::new(&intervals, Box::new(ticker), Box::new(NoopHistory));

        for (name, phase) in [
            (BUTTON_PRESS, ButtonPhase::Press),
            (BUTTON_REPEAT, ButtonPhase::Repeat),
            (BUTTON_RELEASE, ButtonPhase::Release),
        ] {
            let tx = event_tx.clone();
            buttons.events().on(
                name,
                Box::new(move |code: &ButtonCode| {
                    tx.send(AppEvent::Button(phase, *code)).ok();
                }),
            )?;
        }

        let mut touch = TouchGestureController::new();
        let tx = event_tx.clone();
        touch.events().on(
            SWIPE,
            Box::new(move |payload| {
                tx.send(AppEvent::Gesture(payload.clone())).ok();
            }),
        )?;
        // Taps are dispatched by element class; every interactive region
        // forwards into the same channel and the router resolves the target.
        for class in ["category-list", "content-row", "action-bar"] {
            let tx = event_tx.clone();
            touch.register_touch_handler(
                class,
                Box::new(move |payload| {
                    tx.send(AppEvent::Gesture(payload.clone())).ok();
                }),
            );
        }

        let router = FocusRouter::new(
            Box::new(CategoryListView::new(titles)),
            Box::new(ShovelerView::new(Rc::clone(&row_data))),
            Some(Box::new(ButtonRowView::new(vec![
                "Details".to_string(),
                "Add to List".to_string(),
            ]))),
            Box::new(PlayerOverlayView::new(
                Rc::clone(&playback),
                Rc::clone(&scrub_anchor),
            )),
            Box::new(DialogView::new(
                "Exit the application?",
                vec!["Exit".to_string(), "Cancel".to_string()],
            )),
            Box::new(CatalogFactory::new(catalog.clone())),
        );

        let seek = SeekAccelerationEngine::new(config.skip_seconds, &decelerated);

        Ok(Self {
            theme: Theme::default(),
            screen: Rect::default(),
            supports_key_release: false,
            event_tx,
            event_rx,
            catalog,
            row_data,
            playback,
            scrub_anchor,
            buttons,
            touch,
            seek,
            router,
            entry: SearchEntry::new(),
        })
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();
    // Write the effective configuration back so a fresh install gets an
    // editable file on disk.
    config::save_config(&config).ok();

    let mut app = App::new(config).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&mut app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal, app.supports_key_release);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Enables mouse capture for the pointer-to-touch adapter.
/// * Requests key release reporting where the terminal supports it.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &mut App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd
    // get a thin black outline
    util::term::set_terminal_bg(&Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    app.supports_key_release = supports_keyboard_enhancement().unwrap_or(false);
    if app.supports_key_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to enable key release reporting")?;
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it is typically called during cleanup or
/// panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, pop_keyboard: bool) {
    if pop_keyboard {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags).ok();
    }
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background threads and enters the main event
/// loop.
///
/// This function spawns:
/// * An input thread forwarding raw terminal key and mouse events.
/// * A tick thread driving playback progress and periodic re-rendering.
///
/// After spawning them it gives the category list initial focus and hands
/// control to [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to forward raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    tx_input.send(AppEvent::Key(key)).ok();
                }
                Ok(event::Event::Mouse(mouse)) => {
                    tx_input.send(AppEvent::Mouse(mouse)).ok();
                }
                _ => {}
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI
    // application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(TICK_INTERVAL);
        }
    });

    // The in-memory catalog is available immediately; give the category
    // list initial focus.
    app.router.list_ready();

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
