use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Failures of the remote user lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{status} {status_text}{}", message_suffix(.message))]
    Http {
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl SearchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        match self {
            SearchError::Http {
                status: 403 | 429,
                message,
                ..
            } => message
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains("rate limit")),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = SearchError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            message: None,
        };
        assert_eq!(err.to_string(), "404 Not Found");

        let err = SearchError::Http {
            status: 403,
            status_text: "Forbidden".to_string(),
            message: Some("API rate limit exceeded for 127.0.0.1.".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "403 Forbidden: API rate limit exceeded for 127.0.0.1."
        );
        assert!(err.is_rate_limited());
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_transport_is_not_rate_limited() {
        let err = SearchError::Transport("connection refused".to_string());
        assert!(!err.is_rate_limited());
        assert_eq!(err.status(), None);
    }
}
