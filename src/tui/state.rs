//! Interactive application state and key handling.
//!
//! The state machine is deliberately synchronous: a search runs to
//! completion before the next event is read, so at most one search is
//! ever in flight and results can never arrive out of order. A failed
//! search leaves the previous results and preview on screen and surfaces
//! the error in the footer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tgrep::engine::Engine;
use tgrep::preview::{self, DEFAULT_CONTEXT};
use tgrep::SearchResult;

/// Shown in the preview panel until a result is selected.
pub const PREVIEW_PLACEHOLDER: &str = "Select a result to preview context";

/// Which input line receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Files,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Search,
    Quit,
}

pub struct App {
    pub engine: Engine,
    pub focus: Focus,
    pub query: String,
    pub file_query: String,
    pub results: Vec<SearchResult>,
    pub selected: usize,
    pub list_offset: usize,
    pub searching: bool,
    pub error: Option<String>,
    pub preview: String,
    pub width: u16,
    pub height: u16,
}

impl App {
    pub fn new(engine: Engine, width: u16, height: u16) -> App {
        App {
            engine,
            focus: Focus::Query,
            query: String::new(),
            file_query: "*".to_string(),
            results: Vec::new(),
            selected: 0,
            list_offset: 0,
            searching: false,
            error: None,
            preview: PREVIEW_PLACEHOLDER.to_string(),
            width,
            height,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Quit;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_input_mut().clear();
            }
            KeyCode::Tab => self.toggle_focus(),
            KeyCode::Enter => {
                if !self.query.is_empty() && !self.searching {
                    return Action::Search;
                }
            }
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.keep_selection_visible();
                    self.refresh_preview();
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                    self.keep_selection_visible();
                    self.refresh_preview();
                }
            }
            KeyCode::Backspace => {
                self.focused_input_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_input_mut().push(c);
            }
            _ => {}
        }
        Action::Continue
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.keep_selection_visible();
    }

    /// Run the pending search. The caller redraws between `begin_search`
    /// and this so the status line shows progress.
    pub fn run_search(&mut self) {
        match self.engine.search(&self.query, &self.file_query) {
            Ok(results) => {
                self.results = results;
                self.selected = 0;
                self.list_offset = 0;
                self.error = None;
                self.refresh_preview();
            }
            Err(err) => {
                // Previous results stay on screen.
                self.error = Some(err.to_string());
            }
        }
        self.searching = false;
    }

    pub fn begin_search(&mut self) {
        self.searching = true;
        self.error = None;
    }

    /// Height of the results/preview panels, derived from the terminal
    /// height minus the fixed chrome rows.
    pub fn panel_height(&self) -> usize {
        (self.height as usize).saturating_sub(15).max(6)
    }

    /// Result rows that fit in the panel below its column header.
    pub fn visible_rows(&self) -> usize {
        self.panel_height().saturating_sub(3).max(1)
    }

    pub fn keep_selection_visible(&mut self) {
        let visible = self.visible_rows();
        if self.selected < self.list_offset {
            self.list_offset = self.selected;
        }
        if self.selected >= self.list_offset + visible {
            self.list_offset = self.selected - visible + 1;
        }
    }

    fn refresh_preview(&mut self) {
        match self.results.get(self.selected) {
            Some(result) => {
                self.preview = preview::preview(self.engine.root(), result, DEFAULT_CONTEXT);
            }
            None => self.preview = PREVIEW_PLACEHOLDER.to_string(),
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Query => Focus::Files,
            Focus::Files => Focus::Query,
        };
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            Focus::Query => &mut self.query,
            Focus::Files => &mut self.file_query,
        }
    }
}
