use super::command::Command;
use crate::domain::{combobox::NavKey, error::SearchError, models::GithubUser};

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- Runtime ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Search Input ---
    InputKey(crossterm::event::KeyEvent), // Edit the search text
    ComboKey(NavKey),                     // Arrow/Enter/Escape on the combobox
    OptionClicked(String),                // Mouse click on an option row
    FocusSearch,                          // Input gains focus
    FocusDetails,                         // Input loses focus to the details panel
    BlurElapsed(u64),                     // Deferred blur close fired

    // --- Details Panel ---
    ScrollDetailsUp(u16),
    ScrollDetailsDown(u16),
    DismissError,

    // --- Async Results ---
    QuerySettled(String),                // Debounced input value
    UsersLoaded(String, Vec<GithubUser>), // Search results for a query
    UserLoaded(Box<GithubUser>),          // Full record for a selected login
    SearchFailed(String, SearchError),
    LookupFailed(String, SearchError),
}
