use super::config::Config;
use super::keymap::KeyMap;
use crate::domain::{combobox::Combobox, models::GithubUser};
use crate::theme::{PaletteType, Theme};
use std::sync::Arc;

pub mod error;
pub mod input;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use input::AppTextArea;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal, // Searching / browsing
    Error,  // Error overlay on top
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Search,
    Details,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>, // "Loaded 12 users"

    // --- Search ---
    pub combobox: Combobox,
    pub input: AppTextArea<'a>,
    /// Last debounced value; results for any other query are stale.
    pub settled_query: String,
    pub users: Vec<GithubUser>,
    pub is_searching: bool,

    // --- Details ---
    pub selected_user: Option<GithubUser>,
    /// Login whose full record is being fetched; later selections replace it.
    pub pending_login: Option<String>,
    pub details_scroll: u16,

    // --- Layout ---
    pub focused_panel: Panel,

    // --- Animation ---
    pub frame_count: u64,

    // --- Config ---
    pub api_origin: String,
    pub keymap: Arc<KeyMap>,
    pub palette_type: PaletteType,
    pub theme: Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: &Config, api_origin: impl Into<String>) -> Self {
        let mut state = Self {
            combobox: Combobox::new(config.label.clone(), config.combo_config()),
            api_origin: api_origin.into(),
            keymap: Arc::new(KeyMap::from_config(&config.keys)),
            palette_type: config.theme,
            theme: Theme::from_palette_type(config.theme),
            ..Default::default()
        };
        state.input.set_placeholder_text(config.label.clone());
        state
    }

    pub fn is_busy(&self) -> bool {
        self.is_searching || self.pending_login.is_some()
    }

    pub fn details_line_count(&self) -> usize {
        self.selected_user
            .as_ref()
            .and_then(|user| user.to_pretty_json().ok())
            .map_or(0, |json| json.lines().count())
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        let config = Config::default();
        let mut input = AppTextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_placeholder_text(config.label.clone());
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            status_message: None,
            combobox: Combobox::new(config.label.clone(), config.combo_config()),
            input,
            settled_query: String::new(),
            users: Vec::new(),
            is_searching: false,
            selected_user: None,
            pending_login: None,
            details_scroll: 0,
            focused_panel: Panel::Search,
            frame_count: 0,
            api_origin: crate::infrastructure::github::DEFAULT_API_BASE.to_string(),
            keymap: Arc::new(KeyMap::from_config(&config.keys)),
            palette_type: config.theme,
            theme: Theme::from_palette_type(config.theme),
        }
    }
}
