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

//! User interface rendering logic.
//!
//! The primary entry point is the [`draw`] function, called after every
//! processed event. Layout is computed by [`screen_regions`] from the
//! router's layout flags; the pointer-to-touch adapter resolves its hit
//! tests against the same regions, so what is drawn and what is tappable
//! can never disagree. The views themselves each draw through the
//! [`FocusView`](crate::focus::view::FocusView) contract and no-op while
//! hidden.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Block, Paragraph},
};

use crate::App;

/// The screen split into its three interaction regions.
pub(crate) struct ScreenRegions {
    pub(crate) list: Rect,
    pub(crate) content: Rect,
    pub(crate) buttons: Rect,
}

/// Width of the category list sidebar when it is collapsed to an edge strip.
const LIST_COLLAPSED_WIDTH: u16 = 6;
/// Width of the category list sidebar when it is expanded and focused.
const LIST_EXPANDED_WIDTH: u16 = 28;

/// Partitions the screen according to the current layout state.
pub(crate) fn screen_regions(area: Rect, list_expanded: bool) -> ScreenRegions {
    let [main, buttons, _footer] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let list_width = if list_expanded {
        LIST_EXPANDED_WIDTH
    } else {
        LIST_COLLAPSED_WIDTH
    };
    let [list, content] =
        Layout::horizontal([Constraint::Length(list_width), Constraint::Min(0)]).areas(main);

    ScreenRegions { list, content, buttons }
}

/// Renders the user interface to the terminal frame.
///
/// The frame area is recorded on the [`App`] so the pointer-to-touch adapter
/// can hit-test against the layout that is actually on screen.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.screen = area;

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_colour)),
        area,
    );

    let regions = screen_regions(area, app.router.list_expanded());

    app.router.list.draw(f, regions.list, &app.theme);

    match app.router.subcategory_stack.last_mut() {
        Some(top) => top.draw(f, regions.content, &app.theme),
        None => app.router.shoveler.draw(f, regions.content, &app.theme),
    }

    if let Some(row) = &mut app.router.button_row {
        row.draw(f, regions.buttons, &app.theme);
    }

    // Overlays draw above everything; both no-op while hidden.
    app.router.player.draw(f, overlay_area(area, 70, 30), &app.theme);
    app.router.dialog.draw(f, area, &app.theme);

    draw_entry(f, area, app);
}

/// A centered overlay rectangle sized as a percentage of the screen.
fn overlay_area(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let [horizontal] = Layout::horizontal([Constraint::Percentage(width_pct)])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::vertical([Constraint::Percentage(height_pct)])
        .flex(Flex::Center)
        .areas(horizontal);
    centered
}

/// Renders the search entry line in the footer, with the cursor placed while
/// the overlay is open.
fn draw_entry(f: &mut Frame, area: Rect, app: &App) {
    let [_, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    if !app.entry.active() {
        return;
    }

    let line = format!("/{}", app.entry.input.value());
    f.render_widget(
        Paragraph::new(line).style(
            Style::default()
                .fg(app.theme.focus_fg)
                .bg(app.theme.gauge_track_colour),
        ),
        footer,
    );

    let cursor_x = footer.x + 1 + app.entry.input.cursor() as u16;
    f.set_cursor_position((cursor_x.min(footer.right().saturating_sub(1)), footer.y));
}
