use crate::app::recovery::get_suggestions;
use crate::domain::error::SearchError;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub severity: ErrorSeverity,
    pub suggestions: Vec<String>,
}

impl ErrorState {
    /// Wraps a failed request, `context` naming what was being looked up.
    #[must_use]
    pub fn from_search_error(context: &str, error: &SearchError) -> Self {
        let severity = match error {
            SearchError::Http { status, .. } if *status >= 500 => ErrorSeverity::Warning,
            _ if error.is_rate_limited() => ErrorSeverity::Warning,
            SearchError::InvalidRequest(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        };
        Self {
            message: format!("{context}: {error}"),
            timestamp: Local::now(),
            severity,
            suggestions: get_suggestions(error),
        }
    }
}
