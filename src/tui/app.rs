use ratatui::widgets::ListState;

use crate::domain::Topic;
use crate::query::{Query, QueryView};
use crate::session::Session;

pub const PAGE_SIZE: usize = 10;

/// Which input field, if any, currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    AddTitle,
    AddCategory,
}

/// Presentation state for the TUI: the current query, the derived view,
/// selection, input buffers and the status line. All topic data lives in
/// the `Session`; this struct only holds what the renderer needs.
pub struct TuiApp {
    pub query: Query,
    pub view: QueryView,
    pub topic_index: usize,
    pub list_state: ListState,
    pub picked_id: Option<String>,
    pub input_mode: InputMode,
    pub search_input: String,
    pub add_title: String,
    pub add_category: String,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            query: Query::default(),
            view: QueryView::default(),
            topic_index: 0,
            list_state,
            picked_id: None,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            add_title: String::new(),
            add_category: String::new(),
            status_message: None,
            should_quit: false,
        }
    }

    /// Re-derive the view from the session and clamp the selection.
    pub fn refresh(&mut self, session: &Session) {
        self.view = session.query(&self.query);
        if self.topic_index >= self.view.topics.len() && !self.view.topics.is_empty() {
            self.topic_index = self.view.topics.len() - 1;
        }
        self.list_state.select(Some(self.topic_index));
    }

    pub fn selected_topic(&self) -> Option<&Topic> {
        self.view.topics.get(self.topic_index)
    }

    pub fn move_up(&mut self) {
        if self.topic_index > 0 {
            self.topic_index -= 1;
            self.list_state.select(Some(self.topic_index));
        }
    }

    pub fn move_down(&mut self) {
        if !self.view.topics.is_empty() && self.topic_index < self.view.topics.len() - 1 {
            self.topic_index += 1;
            self.list_state.select(Some(self.topic_index));
        }
    }

    pub fn next_page(&mut self) {
        let max_index = self.view.topics.len().saturating_sub(1);
        self.topic_index = (self.topic_index + PAGE_SIZE).min(max_index);
        self.list_state.select(Some(self.topic_index));
    }

    pub fn prev_page(&mut self) {
        self.topic_index = self.topic_index.saturating_sub(PAGE_SIZE);
        self.list_state.select(Some(self.topic_index));
    }

    pub fn cycle_window(&mut self) {
        self.query.window = self.query.window.next();
    }

    pub fn cycle_sort(&mut self) {
        self.query.sort = self.query.sort.next();
    }

    /// Cycle the category filter through the options the current view
    /// offers: none → first → ... → last → none.
    pub fn cycle_category(&mut self) {
        let options = &self.view.categories;
        self.query.category = match self.query.category.as_deref() {
            None => options.first().cloned(),
            Some(current) => match options.iter().position(|c| c == current) {
                Some(i) if i + 1 < options.len() => Some(options[i + 1].clone()),
                _ => None,
            },
        };
    }

    pub fn clear_filters(&mut self) {
        self.query = Query {
            sort: self.query.sort,
            ..Query::default()
        };
        self.search_input.clear();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
