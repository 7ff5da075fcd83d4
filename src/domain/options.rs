use super::models::GithubUser;

/// One selectable entry of the combobox list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboOption {
    /// Opaque identifier reported on selection.
    pub id: String,
    /// Primary text, highlighted against the current query.
    pub label: String,
    /// Secondary, dimmed text.
    pub detail: Option<String>,
}

impl ComboOption {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<&GithubUser> for ComboOption {
    fn from(user: &GithubUser) -> Self {
        let detail = match (&user.kind, &user.html_url) {
            (Some(kind), Some(url)) => Some(format!("{kind} · {url}")),
            (Some(kind), None) => Some(kind.clone()),
            (None, Some(url)) => Some(url.clone()),
            (None, None) => None,
        };
        Self {
            id: user.login.clone(),
            label: format!("@{}", user.login),
            detail,
        }
    }
}

/// Identifiers in declaration order. Duplicates are kept as-is.
#[must_use]
pub fn option_ids(options: &[ComboOption]) -> Vec<&str> {
    options.iter().map(|o| o.id.as_str()).collect()
}

#[must_use]
pub fn options_from_users(users: &[GithubUser]) -> Vec<ComboOption> {
    users.iter().map(ComboOption::from).collect()
}
