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

//! Focus routing state machine.
//!
//! [`FocusRouter`] owns the pointer to the one view currently receiving
//! input. Normalized button and gesture events are forwarded to that view;
//! the view answers with a semantic event (select, deselect, exit, bounce)
//! and the router consumes it to move focus between the navigation list, the
//! content row, the button row, drill-down subcategory rows, the player and
//! modal dialogs.
//!
//! The state space is a tagged enum rather than a set of boolean flags, so
//! combinations like "dialog open while the player has focus" are
//! unrepresentable. Transitions not listed in the rules below are runtime
//! no-ops.

pub(crate) mod view;

use crate::input::{ButtonCode, ButtonPhase};
use crate::input::touch::TouchPayload;
use view::{ControlEvent, FocusView, SelectTarget, SemanticEvent};

/// Which part of the content row has focus.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RowFocus {
    Shoveler,
    ButtonRow,
}

/// Where focus goes back to when a player or dialog closes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ReturnFocus {
    /// Nothing was focused yet (startup race).
    Boot,
    ContentRow(RowFocus),
    Subcategory,
}

/// The focus state machine; exactly one variant is active at a time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FocusState {
    /// Startup: no view has received focus yet.
    ListCollapsed,
    /// The navigation list is expanded and focused.
    ListExpanded,
    /// The content row for the confirmed category is focused.
    ContentRow(RowFocus),
    /// A drill-down row is focused; the subcategory stack depth is >= 1.
    Subcategory,
    Player(ReturnFocus),
    Dialog(ReturnFocus),
}

/// Effects the router cannot perform itself and hands to the application.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RouterAction {
    /// Populate the content row with the category at this list index.
    ShowCategory(usize),
    /// Start playback of the item reached through `path` within the
    /// confirmed category.
    Play { category: usize, path: Vec<usize> },
    StopPlayback,
    ExitApplication,
}

/// Supplies a rendered view for a drill-down row; the data fetch behind it
/// belongs to the application.
pub(crate) trait SubcategoryFactory {
    fn subcategory_view(&mut self, category: usize, path: &[usize]) -> Option<Box<dyn FocusView>>;
}

pub(crate) struct FocusRouter {
    state: FocusState,

    pub(crate) list: Box<dyn FocusView>,
    pub(crate) shoveler: Box<dyn FocusView>,
    pub(crate) button_row: Option<Box<dyn FocusView>>,
    pub(crate) player: Box<dyn FocusView>,
    pub(crate) dialog: Box<dyn FocusView>,

    /// Previously entered drill-down views, most recent last. Depth mirrors
    /// `drill_path`.
    pub(crate) subcategory_stack: Vec<Box<dyn FocusView>>,
    drill_path: Vec<usize>,

    factory: Box<dyn SubcategoryFactory>,

    /// Layout flag used to resolve the target of touch input; touch
    /// navigation is direct and never goes through a confirmation step.
    list_expanded: bool,

    /// List cursor position as last reported, not yet committed.
    curr_selected_index: usize,
    /// The category whose content row was last committed.
    confirmed_selection: Option<usize>,
    /// A category query is in flight; set on commit, cleared by
    /// [`content_ready`](Self::content_ready).
    pending_load: bool,

    /// Where focus returns when the expanded list collapses again.
    expand_return: Option<ReturnFocus>,

    /// Whether a content item without a button row still carries an
    /// entitlement affordance, making bounce-down open a dialog.
    entitlement_notice: bool,
}

#[derive(Clone, Copy)]
enum Origin {
    List,
    Shoveler,
    ButtonRow,
    Subcategory,
    Player(ReturnFocus),
    Dialog(ReturnFocus),
}

impl FocusRouter {
    pub(crate) fn new(
        list: Box<dyn FocusView>,
        shoveler: Box<dyn FocusView>,
        button_row: Option<Box<dyn FocusView>>,
        player: Box<dyn FocusView>,
        dialog: Box<dyn FocusView>,
        factory: Box<dyn SubcategoryFactory>,
    ) -> Self {
        Self {
            state: FocusState::ListCollapsed,
            list,
            shoveler,
            button_row,
            player,
            dialog,
            subcategory_stack: Vec::new(),
            drill_path: Vec::new(),
            factory,
            list_expanded: false,
            curr_selected_index: 0,
            confirmed_selection: None,
            pending_load: false,
            expand_return: None,
            entitlement_notice: false,
        }
    }

    pub(crate) fn state(&self) -> FocusState {
        self.state
    }

    pub(crate) fn list_expanded(&self) -> bool {
        self.list_expanded
    }

    pub(crate) fn set_entitlement_notice(&mut self, notice: bool) {
        self.entitlement_notice = notice;
    }

    /// The navigation list finished loading; give it initial focus.
    pub(crate) fn list_ready(&mut self) {
        if self.state != FocusState::ListCollapsed {
            return;
        }
        self.list.show();
        self.list.expand();
        self.list.make_active();
        self.list_expanded = true;
        self.state = FocusState::ListExpanded;
    }

    /// The content row finished populating for the committed category.
    pub(crate) fn content_ready(&mut self) {
        self.pending_load = false;
    }

    /// Programmatic category selection, e.g. from a search result.
    ///
    /// Commits the category directly, bypassing the list confirmation step.
    /// Ignored while a player or dialog is open, and when the category is
    /// already the committed one.
    pub(crate) fn select_category(&mut self, index: usize) -> Option<RouterAction> {
        if matches!(self.state, FocusState::Player(_) | FocusState::Dialog(_)) {
            return None;
        }
        if self.confirmed_selection == Some(index) && !self.pending_load {
            return None;
        }
        self.curr_selected_index = index;
        self.commit_category(index)
    }

    /// Routes a normalized button event to the focused view and consumes
    /// whatever semantic event the view answers with.
    pub(crate) fn handle_button(
        &mut self,
        phase: ButtonPhase,
        code: ButtonCode,
    ) -> Option<RouterAction> {
        // Startup race: BACK before anything has focus asks for exit
        // confirmation instead of being forwarded.
        if self.state == FocusState::ListCollapsed {
            if phase == ButtonPhase::Press && code == ButtonCode::Back {
                self.open_dialog(ReturnFocus::Boot);
            }
            return None;
        }

        let event = match phase {
            ButtonPhase::Press => ControlEvent::Press(code),
            ButtonPhase::Repeat => ControlEvent::Repeat(code),
            ButtonPhase::Release => ControlEvent::Release(code),
        };

        self.forward(&event)
    }

    /// Routes touch events. The target view is resolved purely from
    /// expand/collapse layout state, not from key focus.
    pub(crate) fn handle_gesture(&mut self, payload: &TouchPayload) -> Option<RouterAction> {
        let event = match payload {
            TouchPayload::Swipe(direction) => ControlEvent::Swipe(*direction),
            TouchPayload::Tap { x, y, .. } => ControlEvent::Tap { x: *x, y: *y },
        };

        match self.state {
            FocusState::Dialog(_) | FocusState::Player(_) => self.forward(&event),
            _ if self.list_expanded => {
                let semantic = self.list.handle_controls(&event);
                self.apply(Origin::List, semantic)
            }
            _ if !self.subcategory_stack.is_empty() => {
                let semantic = self.top_subcategory().handle_controls(&event);
                self.apply(Origin::Subcategory, semantic)
            }
            _ => {
                let semantic = self.shoveler.handle_controls(&event);
                self.apply(Origin::Shoveler, semantic)
            }
        }
    }

    fn forward(&mut self, event: &ControlEvent) -> Option<RouterAction> {
        let origin = match self.state {
            FocusState::ListCollapsed => return None,
            FocusState::ListExpanded => Origin::List,
            FocusState::ContentRow(RowFocus::Shoveler) => Origin::Shoveler,
            FocusState::ContentRow(RowFocus::ButtonRow) => Origin::ButtonRow,
            FocusState::Subcategory => Origin::Subcategory,
            FocusState::Player(ret) => Origin::Player(ret),
            FocusState::Dialog(ret) => Origin::Dialog(ret),
        };

        let semantic = match origin {
            Origin::List => self.list.handle_controls(event),
            Origin::Shoveler => self.shoveler.handle_controls(event),
            Origin::ButtonRow => match &mut self.button_row {
                Some(row) => row.handle_controls(event),
                None => None,
            },
            Origin::Subcategory => self.top_subcategory().handle_controls(event),
            Origin::Player(_) => self.player.handle_controls(event),
            Origin::Dialog(_) => self.dialog.handle_controls(event),
        };

        self.apply(origin, semantic)
    }

    fn apply(&mut self, origin: Origin, semantic: Option<SemanticEvent>) -> Option<RouterAction> {
        let semantic = semantic?;

        match (origin, semantic) {
            (Origin::List, SemanticEvent::IndexChange(index)) => {
                self.curr_selected_index = index;
                None
            }

            (Origin::List, SemanticEvent::Select { index, .. }) => {
                // A selection that changes nothing, with no query in flight,
                // collapses to a plain deselect.
                if self.confirmed_selection == Some(index) && !self.pending_load {
                    return self.apply(Origin::List, Some(SemanticEvent::Deselect));
                }
                self.commit_category(index)
            }

            (Origin::List, SemanticEvent::Deselect) => {
                let Some(ret) = self.expand_return.take() else {
                    return None;
                };
                self.list.collapse();
                self.list_expanded = false;
                self.focus_return(ret);
                None
            }

            (Origin::Shoveler, SemanticEvent::Exit) => {
                self.expand_list(ReturnFocus::ContentRow(RowFocus::Shoveler));
                None
            }

            (Origin::Subcategory, SemanticEvent::Exit) => {
                self.pop_subcategory();
                None
            }

            (Origin::Shoveler, SemanticEvent::Bounce(_)) => {
                if let Some(row) = &mut self.button_row {
                    row.make_active();
                    self.state = FocusState::ContentRow(RowFocus::ButtonRow);
                } else if self.entitlement_notice {
                    self.open_dialog(ReturnFocus::ContentRow(RowFocus::Shoveler));
                }
                None
            }

            (Origin::Shoveler, SemanticEvent::Select { index, target })
            | (Origin::Subcategory, SemanticEvent::Select { index, target }) => {
                match target {
                    SelectTarget::Playable => self.open_player(origin, index),
                    SelectTarget::Subcategory => self.push_subcategory(index),
                    _ => None,
                }
            }

            (Origin::ButtonRow, SemanticEvent::Exit) => {
                self.shoveler.make_active();
                self.state = FocusState::ContentRow(RowFocus::Shoveler);
                None
            }

            (Origin::ButtonRow, SemanticEvent::Select { .. }) => {
                self.open_dialog(ReturnFocus::ContentRow(RowFocus::ButtonRow));
                None
            }

            (Origin::Player(ret), SemanticEvent::Exit) => {
                self.player.hide();
                self.focus_return(ret);
                Some(RouterAction::StopPlayback)
            }

            (Origin::Dialog(ret), SemanticEvent::Select { index, .. }) => {
                if index == 0 && ret == ReturnFocus::Boot {
                    return Some(RouterAction::ExitApplication);
                }
                self.close_dialog(ret);
                None
            }

            (Origin::Dialog(ret), SemanticEvent::Exit)
            | (Origin::Dialog(ret), SemanticEvent::Deselect) => {
                self.close_dialog(ret);
                None
            }

            (_, SemanticEvent::MakeActive) | (_, SemanticEvent::LoadComplete) => None,

            // Every transition pair not listed above is deliberately a
            // runtime no-op, matching the reachable paths of the original
            // client.
            _ => None,
        }
    }

    fn commit_category(&mut self, index: usize) -> Option<RouterAction> {
        self.confirmed_selection = Some(index);
        self.pending_load = true;

        // A fresh category discards any drill-down the old one had.
        self.clear_subcategories();

        self.list.hide();
        self.list_expanded = false;
        self.expand_return = None;

        self.shoveler.show();
        self.shoveler.make_active();
        self.state = FocusState::ContentRow(RowFocus::Shoveler);

        Some(RouterAction::ShowCategory(index))
    }

    fn expand_list(&mut self, ret: ReturnFocus) {
        self.list.show();
        self.list.expand();
        self.list.make_active();
        self.list_expanded = true;
        self.expand_return = Some(ret);
        self.state = FocusState::ListExpanded;
    }

    fn push_subcategory(&mut self, index: usize) -> Option<RouterAction> {
        let category = self.confirmed_selection?;

        self.drill_path.push(index);
        let Some(mut nested) = self.factory.subcategory_view(category, &self.drill_path) else {
            // Inconsistent catalog data; stay where we are.
            self.drill_path.pop();
            return None;
        };

        if let Some(top) = self.subcategory_stack.last_mut() {
            top.hide();
        } else {
            self.shoveler.hide();
        }

        nested.show();
        nested.make_active();
        self.subcategory_stack.push(nested);
        self.state = FocusState::Subcategory;
        None
    }

    fn pop_subcategory(&mut self) {
        if let Some(mut popped) = self.subcategory_stack.pop() {
            popped.hide();
            popped.remove();
        }
        self.drill_path.pop();

        match self.subcategory_stack.last_mut() {
            Some(top) => {
                top.show();
                top.make_active();
                self.state = FocusState::Subcategory;
            }
            None => {
                self.shoveler.show();
                self.shoveler.make_active();
                self.state = FocusState::ContentRow(RowFocus::Shoveler);
            }
        }
    }

    fn clear_subcategories(&mut self) {
        for mut view in self.subcategory_stack.drain(..) {
            view.hide();
            view.remove();
        }
        self.drill_path.clear();
    }

    fn open_player(&mut self, origin: Origin, index: usize) -> Option<RouterAction> {
        let category = self.confirmed_selection?;

        let ret = match origin {
            Origin::Subcategory => ReturnFocus::Subcategory,
            _ => ReturnFocus::ContentRow(RowFocus::Shoveler),
        };

        let mut path = self.drill_path.clone();
        path.push(index);

        self.player.show();
        self.player.make_active();
        self.state = FocusState::Player(ret);

        Some(RouterAction::Play { category, path })
    }

    fn open_dialog(&mut self, ret: ReturnFocus) {
        self.dialog.show();
        self.dialog.make_active();
        self.state = FocusState::Dialog(ret);
    }

    fn close_dialog(&mut self, ret: ReturnFocus) {
        self.dialog.hide();
        self.focus_return(ret);
    }

    fn focus_return(&mut self, ret: ReturnFocus) {
        match ret {
            ReturnFocus::Boot => {
                self.state = FocusState::ListCollapsed;
            }
            ReturnFocus::ContentRow(row) => {
                match row {
                    RowFocus::Shoveler => self.shoveler.make_active(),
                    RowFocus::ButtonRow => {
                        if let Some(button_row) = &mut self.button_row {
                            button_row.make_active();
                        }
                    }
                }
                self.state = FocusState::ContentRow(row);
            }
            ReturnFocus::Subcategory => {
                if let Some(top) = self.subcategory_stack.last_mut() {
                    top.make_active();
                    self.state = FocusState::Subcategory;
                } else {
                    self.shoveler.make_active();
                    self.state = FocusState::ContentRow(RowFocus::Shoveler);
                }
            }
        }
    }

    fn top_subcategory(&mut self) -> &mut Box<dyn FocusView> {
        self.subcategory_stack
            .last_mut()
            .unwrap_or(&mut self.shoveler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use ratatui::Frame;
    use ratatui::layout::Rect;

    use crate::theme::Theme;

    /// View stub that records lifecycle calls and answers `handle_controls`
    /// from a scripted queue.
    struct StubView {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        responses: Rc<RefCell<VecDeque<SemanticEvent>>>,
    }

    impl StubView {
        fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> (Self, Rc<RefCell<VecDeque<SemanticEvent>>>) {
            let responses = Rc::new(RefCell::new(VecDeque::new()));
            let view = Self {
                name,
                log: Rc::clone(log),
                responses: Rc::clone(&responses),
            };
            (view, responses)
        }

        fn record(&self, call: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, call));
        }
    }

    impl FocusView for StubView {
        fn show(&mut self) {
            self.record("show");
        }

        fn hide(&mut self) {
            self.record("hide");
        }

        fn expand(&mut self) {
            self.record("expand");
        }

        fn collapse(&mut self) {
            self.record("collapse");
        }

        fn make_active(&mut self) {
            self.record("active");
        }

        fn remove(&mut self) {
            self.record("remove");
        }

        fn handle_controls(&mut self, _event: &ControlEvent) -> Option<SemanticEvent> {
            self.responses.borrow_mut().pop_front()
        }

        fn draw(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}
    }

    struct StubFactory {
        log: Rc<RefCell<Vec<String>>>,
        /// Depth limit past which the factory reports no nested data.
        max_depth: usize,
        responses: Rc<RefCell<VecDeque<SemanticEvent>>>,
    }

    impl SubcategoryFactory for StubFactory {
        fn subcategory_view(
            &mut self,
            _category: usize,
            path: &[usize],
        ) -> Option<Box<dyn FocusView>> {
            if path.len() > self.max_depth {
                return None;
            }
            // Every nested view shares one scripted queue; only the top of
            // the stack is ever asked to handle controls.
            Some(Box::new(StubView {
                name: "sub",
                log: Rc::clone(&self.log),
                responses: Rc::clone(&self.responses),
            }))
        }
    }

    struct Fixture {
        router: FocusRouter,
        log: Rc<RefCell<Vec<String>>>,
        list: Rc<RefCell<VecDeque<SemanticEvent>>>,
        shoveler: Rc<RefCell<VecDeque<SemanticEvent>>>,
        button_row: Rc<RefCell<VecDeque<SemanticEvent>>>,
        player: Rc<RefCell<VecDeque<SemanticEvent>>>,
        dialog: Rc<RefCell<VecDeque<SemanticEvent>>>,
        subcategory: Rc<RefCell<VecDeque<SemanticEvent>>>,
    }

    fn fixture_with_button_row(with_button_row: bool) -> Fixture {
        let log = Rc::new(RefCell::new(Vec::new()));

        let (list, list_responses) = StubView::new("list", &log);
        let (shoveler, shoveler_responses) = StubView::new("shoveler", &log);
        let (button_row, button_row_responses) = StubView::new("buttons", &log);
        let (player, player_responses) = StubView::new("player", &log);
        let (dialog, dialog_responses) = StubView::new("dialog", &log);

        let subcategory = Rc::new(RefCell::new(VecDeque::new()));
        let factory = StubFactory {
            log: Rc::clone(&log),
            max_depth: 8,
            responses: Rc::clone(&subcategory),
        };

        let router = FocusRouter::new(
            Box::new(list),
            Box::new(shoveler),
            with_button_row.then(|| Box::new(button_row) as Box<dyn FocusView>),
            Box::new(player),
            Box::new(dialog),
            Box::new(factory),
        );

        Fixture {
            router,
            log,
            list: list_responses,
            shoveler: shoveler_responses,
            button_row: button_row_responses,
            player: player_responses,
            dialog: dialog_responses,
            subcategory,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_button_row(true)
    }

    fn press(f: &mut Fixture) -> Option<RouterAction> {
        f.router.handle_button(ButtonPhase::Press, ButtonCode::Select)
    }

    fn script(queue: &Rc<RefCell<VecDeque<SemanticEvent>>>, event: SemanticEvent) {
        queue.borrow_mut().push_back(event);
    }

    /// Boots the router and commits category 1, landing on the content row.
    fn boot_to_content(f: &mut Fixture) {
        f.router.list_ready();
        script(&f.list, SemanticEvent::Select { index: 1, target: SelectTarget::Category });
        let action = press(f);
        assert_eq!(action, Some(RouterAction::ShowCategory(1)));
        f.router.content_ready();
        f.log.borrow_mut().clear();
    }

    #[test]
    fn back_before_any_focus_opens_exit_confirmation() {
        let mut f = fixture();

        let action = f.router.handle_button(ButtonPhase::Press, ButtonCode::Back);
        assert_eq!(action, None);
        assert_eq!(f.router.state(), FocusState::Dialog(ReturnFocus::Boot));

        script(&f.dialog, SemanticEvent::Select { index: 0, target: SelectTarget::Action });
        let action = press(&mut f);
        assert_eq!(action, Some(RouterAction::ExitApplication));
    }

    #[test]
    fn dismissing_boot_dialog_returns_to_unfocused_state() {
        let mut f = fixture();

        f.router.handle_button(ButtonPhase::Press, ButtonCode::Back);
        script(&f.dialog, SemanticEvent::Exit);
        press(&mut f);

        assert_eq!(f.router.state(), FocusState::ListCollapsed);
    }

    #[test]
    fn other_keys_before_any_focus_are_dropped() {
        let mut f = fixture();

        let action = f.router.handle_button(ButtonPhase::Press, ButtonCode::Select);
        assert_eq!(action, None);
        assert_eq!(f.router.state(), FocusState::ListCollapsed);
    }

    #[test]
    fn list_select_commits_category_and_moves_focus_to_content_row() {
        let mut f = fixture();
        f.router.list_ready();
        assert_eq!(f.router.state(), FocusState::ListExpanded);

        script(&f.list, SemanticEvent::Select { index: 2, target: SelectTarget::Category });
        let action = press(&mut f);

        assert_eq!(action, Some(RouterAction::ShowCategory(2)));
        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
        assert!(f.log.borrow().contains(&"list:hide".to_string()));
        assert!(f.log.borrow().contains(&"shoveler:active".to_string()));
        assert!(!f.router.list_expanded());
    }

    #[test]
    fn reselecting_the_same_category_degrades_to_deselect() {
        let mut f = fixture();
        boot_to_content(&mut f);

        // Back up into the expanded list, then select the same category.
        script(&f.shoveler, SemanticEvent::Exit);
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::ListExpanded);

        script(&f.list, SemanticEvent::Select { index: 1, target: SelectTarget::Category });
        let action = press(&mut f);

        // No new query; list collapses back onto the content row.
        assert_eq!(action, None);
        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
        assert!(f.log.borrow().contains(&"list:collapse".to_string()));
    }

    #[test]
    fn content_exit_expands_list_and_deselect_returns() {
        let mut f = fixture();
        boot_to_content(&mut f);

        script(&f.shoveler, SemanticEvent::Exit);
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::ListExpanded);
        assert!(f.router.list_expanded());

        script(&f.list, SemanticEvent::Deselect);
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
        assert!(!f.router.list_expanded());
    }

    #[test]
    fn deselect_with_no_prior_expansion_is_a_no_op() {
        let mut f = fixture();
        f.router.list_ready();

        script(&f.list, SemanticEvent::Deselect);
        press(&mut f);

        assert_eq!(f.router.state(), FocusState::ListExpanded);
    }

    #[test]
    fn bounce_down_moves_to_button_row_when_present() {
        let mut f = fixture();
        boot_to_content(&mut f);

        script(&f.shoveler, SemanticEvent::Bounce(Some(ButtonCode::Down)));
        press(&mut f);

        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::ButtonRow));

        // Up from the button row goes back to the shoveler.
        script(&f.button_row, SemanticEvent::Exit);
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
    }

    #[test]
    fn bounce_down_without_button_row_opens_entitlement_dialog() {
        let mut f = fixture_with_button_row(false);
        boot_to_content(&mut f);
        f.router.set_entitlement_notice(true);

        script(&f.shoveler, SemanticEvent::Bounce(Some(ButtonCode::Down)));
        press(&mut f);

        assert_eq!(
            f.router.state(),
            FocusState::Dialog(ReturnFocus::ContentRow(RowFocus::Shoveler))
        );

        script(&f.dialog, SemanticEvent::Exit);
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
    }

    #[test]
    fn bounce_down_with_nothing_below_is_ignored() {
        let mut f = fixture_with_button_row(false);
        boot_to_content(&mut f);

        script(&f.shoveler, SemanticEvent::Bounce(Some(ButtonCode::Down)));
        press(&mut f);

        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
    }

    #[test]
    fn subcategory_round_trip_restores_the_prior_view() {
        let mut f = fixture();
        boot_to_content(&mut f);

        // Drill in two levels deep.
        script(&f.shoveler, SemanticEvent::Select { index: 3, target: SelectTarget::Subcategory });
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::Subcategory);
        assert_eq!(f.router.subcategory_stack.len(), 1);

        script(&f.subcategory, SemanticEvent::Select { index: 0, target: SelectTarget::Subcategory });
        press(&mut f);
        assert_eq!(f.router.subcategory_stack.len(), 2);

        // Back out both levels; the stack unwinds to the content row.
        script(&f.subcategory, SemanticEvent::Exit);
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::Subcategory);
        assert_eq!(f.router.subcategory_stack.len(), 1);

        script(&f.subcategory, SemanticEvent::Exit);
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
        assert!(f.router.subcategory_stack.is_empty());
        assert!(f.log.borrow().contains(&"shoveler:active".to_string()));
    }

    #[test]
    fn missing_subcategory_data_leaves_focus_unchanged() {
        let mut f = fixture();
        boot_to_content(&mut f);
        // Pretend the catalog has no nested data at all.
        f.router.factory = Box::new(StubFactory {
            log: Rc::clone(&f.log),
            max_depth: 0,
            responses: Rc::clone(&f.subcategory),
        });

        script(&f.shoveler, SemanticEvent::Select { index: 3, target: SelectTarget::Subcategory });
        press(&mut f);

        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
        assert!(f.router.subcategory_stack.is_empty());
    }

    #[test]
    fn playable_select_opens_player_and_exit_returns_to_initiator() {
        let mut f = fixture();
        boot_to_content(&mut f);

        // Play from inside a drill-down row.
        script(&f.shoveler, SemanticEvent::Select { index: 3, target: SelectTarget::Subcategory });
        press(&mut f);

        script(&f.subcategory, SemanticEvent::Select { index: 2, target: SelectTarget::Playable });
        let action = press(&mut f);
        assert_eq!(
            action,
            Some(RouterAction::Play { category: 1, path: vec![3, 2] })
        );
        assert_eq!(f.router.state(), FocusState::Player(ReturnFocus::Subcategory));

        script(&f.player, SemanticEvent::Exit);
        let action = press(&mut f);
        assert_eq!(action, Some(RouterAction::StopPlayback));
        assert_eq!(f.router.state(), FocusState::Subcategory);
        assert_eq!(f.router.subcategory_stack.len(), 1);
    }

    #[test]
    fn committing_a_new_category_discards_the_drill_down() {
        let mut f = fixture();
        boot_to_content(&mut f);

        script(&f.shoveler, SemanticEvent::Select { index: 3, target: SelectTarget::Subcategory });
        press(&mut f);
        assert_eq!(f.router.subcategory_stack.len(), 1);

        script(&f.subcategory, SemanticEvent::Exit);
        press(&mut f);
        script(&f.shoveler, SemanticEvent::Exit);
        press(&mut f);
        assert_eq!(f.router.state(), FocusState::ListExpanded);

        script(&f.list, SemanticEvent::Select { index: 0, target: SelectTarget::Category });
        let action = press(&mut f);
        assert_eq!(action, Some(RouterAction::ShowCategory(0)));
        assert!(f.router.subcategory_stack.is_empty());
    }

    #[test]
    fn touch_target_follows_layout_state_not_key_focus() {
        let mut f = fixture();
        boot_to_content(&mut f);

        // List collapsed: the swipe goes to the content row.
        script(&f.shoveler, SemanticEvent::Exit);
        let action = f.router.handle_gesture(&TouchPayload::Swipe(ButtonCode::Up));
        assert_eq!(action, None);
        assert_eq!(f.router.state(), FocusState::ListExpanded);

        // List expanded: the next tap is the list's, and it commits
        // directly with no confirmation step.
        script(&f.list, SemanticEvent::Select { index: 0, target: SelectTarget::Category });
        let action = f.router.handle_gesture(&TouchPayload::Tap {
            x: 10.0,
            y: 10.0,
            classes: vec![],
        });
        assert_eq!(action, Some(RouterAction::ShowCategory(0)));
    }

    #[test]
    fn informational_semantic_events_do_not_move_focus() {
        let mut f = fixture();
        boot_to_content(&mut f);

        for event in [SemanticEvent::MakeActive, SemanticEvent::LoadComplete] {
            script(&f.shoveler, event);
            assert_eq!(press(&mut f), None);
            assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));
        }
    }

    #[test]
    fn programmatic_selection_commits_without_the_list() {
        let mut f = fixture();
        boot_to_content(&mut f);

        let action = f.router.select_category(2);
        assert_eq!(action, Some(RouterAction::ShowCategory(2)));
        assert_eq!(f.router.state(), FocusState::ContentRow(RowFocus::Shoveler));

        // The committed category is not re-queried.
        f.router.content_ready();
        assert_eq!(f.router.select_category(2), None);

        // And a player on screen keeps its focus.
        script(&f.shoveler, SemanticEvent::Select { index: 0, target: SelectTarget::Playable });
        press(&mut f);
        assert_eq!(f.router.select_category(0), None);
    }

    #[test]
    fn index_change_tracks_cursor_without_committing() {
        let mut f = fixture();
        f.router.list_ready();

        script(&f.list, SemanticEvent::IndexChange(4));
        press(&mut f);

        assert_eq!(f.router.curr_selected_index, 4);
        assert_eq!(f.router.confirmed_selection, None);
        assert_eq!(f.router.state(), FocusState::ListExpanded);
    }
}
