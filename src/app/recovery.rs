use crate::domain::error::SearchError;

#[must_use]
pub fn get_suggestions(error: &SearchError) -> Vec<String> {
    let mut suggestions = Vec::new();

    if error.is_rate_limited() {
        suggestions.push(
            "Set GITHUB_TOKEN (or `token` in config.toml) to raise the rate limit".to_string(),
        );
        suggestions.push("Wait a minute and type again; results are cached for reuse".to_string());
        return suggestions;
    }

    match error {
        SearchError::Http { status: 401, .. } => {
            suggestions.push("The configured token was rejected; check that it is valid".to_string());
        }
        SearchError::Http { status: 403, .. } => {
            suggestions.push("Access denied; the token may lack the required scopes".to_string());
        }
        SearchError::Http { status: 404, .. } => {
            suggestions.push("No such user; the account may have been renamed or deleted".to_string());
        }
        SearchError::Http { status: 422, .. } => {
            suggestions.push("GitHub rejected the query; try fewer or different characters".to_string());
        }
        SearchError::Http { status, .. } if *status >= 500 => {
            suggestions.push("GitHub is having trouble; try again shortly".to_string());
        }
        SearchError::Transport(_) => {
            suggestions.push("Check your network connection".to_string());
            suggestions.push("Verify `api_base_url` in ~/.config/typeahead/config.toml".to_string());
        }
        SearchError::Decode(_) => {
            suggestions.push(
                "The server did not answer like the GitHub API; verify `api_base_url`".to_string(),
            );
        }
        _ => {}
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, message: Option<&str>) -> SearchError {
        SearchError::Http {
            status,
            status_text: String::new(),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_suggestions() {
        let s = get_suggestions(&http(403, Some("API rate limit exceeded")));
        assert!(s[0].contains("GITHUB_TOKEN"));

        let s = get_suggestions(&http(404, None));
        assert!(s[0].contains("No such user"));

        let s = get_suggestions(&http(502, None));
        assert!(s[0].contains("try again"));

        let s = get_suggestions(&SearchError::Transport("dns".to_string()));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_no_suggestion_for_unknown_status() {
        assert!(get_suggestions(&http(418, None)).is_empty());
    }
}
