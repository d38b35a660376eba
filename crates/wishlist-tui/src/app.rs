// TUI application state and intent handling
use ratatui::widgets::ListState;
use wishlist_api::WishlistItem;
use wishlist_core::Controller;

use crate::form::DraftForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating the item list
    Searching, // Typing in the search box
    Category,  // Typing in the category filter
    Adding,    // Filling in the add form
}

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Ephemeral UI state plus the controller that owns the real data
pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub controller: Controller,
    pub form: DraftForm,
    pub selected_index: usize,
    pub list_state: ListState,
    pub spinner_tick: usize,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            controller,
            form: DraftForm::new(),
            selected_index: 0,
            list_state,
            spinner_tick: 0,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_category_mode(&mut self) {
        self.input_mode = InputMode::Category;
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()]
    }

    pub fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    /// Fold any finished requests into the view state
    pub fn poll_completions(&mut self) -> bool {
        let changed = self.controller.try_apply_pending();
        if changed {
            self.sync_selection();
        }
        changed
    }

    // --- search bar -----------------------------------------------------

    pub fn search_push(&mut self, c: char) {
        let mut term = self.controller.filters().search_term.clone();
        term.push(c);
        self.controller.set_search_term(term);
    }

    pub fn search_pop(&mut self) {
        let mut term = self.controller.filters().search_term.clone();
        term.pop();
        self.controller.set_search_term(term);
    }

    pub fn category_push(&mut self, c: char) {
        let mut category = self.controller.filters().category.clone();
        category.push(c);
        self.controller.set_category(category);
    }

    pub fn category_pop(&mut self) {
        let mut category = self.controller.filters().category.clone();
        category.pop();
        self.controller.set_category(category);
    }

    pub fn cycle_downloaded_filter(&mut self) {
        let next = self.controller.filters().downloaded.cycle();
        self.controller.set_downloaded_filter(next);
    }

    pub fn reset_filters(&mut self) {
        self.controller.reset_filters();
    }

    // --- add form -------------------------------------------------------

    pub fn submit_form(&mut self) {
        if let Some(draft) = self.form.submit() {
            self.controller.add(draft);
            self.enter_normal_mode();
        }
    }

    // --- item list ------------------------------------------------------

    pub fn items(&self) -> &[WishlistItem] {
        &self.controller.state().items
    }

    pub fn selected_item(&self) -> Option<&WishlistItem> {
        self.items().get(self.selected_index)
    }

    pub fn next_item(&mut self) {
        let len = self.items().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1).min(len - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_item(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    /// Per-item actions are only offered while the list is shown
    fn actions_available(&self) -> bool {
        !self.controller.state().loading
    }

    pub fn delete_selected(&mut self) {
        if !self.actions_available() {
            return;
        }
        if let Some(id) = self.selected_item().map(|item| item.id) {
            self.controller.delete(id);
        }
    }

    pub fn toggle_selected(&mut self) {
        if !self.actions_available() {
            return;
        }
        if let Some(item) = self.selected_item().cloned() {
            self.controller.toggle_downloaded(&item);
        }
    }

    /// Keep the selection inside the list after it was replaced
    pub fn sync_selection(&mut self) {
        let len = self.items().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }
}
