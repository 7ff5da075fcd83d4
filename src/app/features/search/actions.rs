use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, ErrorState},
};
use crate::domain::options::options_from_users;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::QuerySettled(query) => {
            state.settled_query = query.clone();
            if query.trim().is_empty() {
                state.is_searching = false;
                state.users.clear();
                state.combobox.set_options(Vec::new());
                UpdateResult::Handled(None)
            } else {
                state.is_searching = true;
                UpdateResult::Handled(Some(Command::SearchUsers(query.clone())))
            }
        }
        Action::UsersLoaded(query, users) => {
            if *query != state.settled_query {
                log::debug!("dropping stale results for {query:?}");
                return UpdateResult::Handled(None);
            }
            state.is_searching = false;
            state.combobox.set_options(options_from_users(users));
            state.users = users.clone();
            state.status_message = Some(match users.len() {
                1 => "Loaded 1 user".to_string(),
                n => format!("Loaded {n} users"),
            });
            UpdateResult::Handled(None)
        }
        Action::SearchFailed(query, error) => {
            if *query != state.settled_query {
                log::debug!("dropping stale failure for {query:?}: {error}");
                return UpdateResult::Handled(None);
            }
            // The option list keeps its previous content.
            state.is_searching = false;
            report(state, ErrorState::from_search_error("Search failed", error));
            UpdateResult::Handled(None)
        }
        Action::UserLoaded(user) => {
            if !is_pending(state, &user.login) {
                log::debug!("dropping stale record for {}", user.login);
                return UpdateResult::Handled(None);
            }
            state.pending_login = None;
            state.status_message = Some(format!("Loaded {}", user.login));
            state.selected_user = Some(user.as_ref().clone());
            state.details_scroll = 0;
            UpdateResult::Handled(None)
        }
        Action::LookupFailed(login, error) => {
            if !is_pending(state, login) {
                return UpdateResult::Handled(None);
            }
            state.pending_login = None;
            report(
                state,
                ErrorState::from_search_error(&format!("Lookup of {login} failed"), error),
            );
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn is_pending(state: &AppState, login: &str) -> bool {
    state
        .pending_login
        .as_deref()
        .is_some_and(|pending| pending.eq_ignore_ascii_case(login))
}

fn report(state: &mut AppState, error: ErrorState) {
    log::warn!("{}", error.message);
    state.status_message = Some(error.message.clone());
    state.last_error = Some(error);
    state.mode = AppMode::Error;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{combobox::NavKey, error::SearchError, models::GithubUser};

    fn user(login: &str) -> GithubUser {
        GithubUser {
            login: login.to_string(),
            kind: Some("User".to_string()),
            ..GithubUser::default()
        }
    }

    fn handled(result: UpdateResult) -> Option<Command> {
        match result {
            UpdateResult::Handled(cmd) => cmd,
            UpdateResult::NotHandled => panic!("action not handled"),
        }
    }

    #[test]
    fn test_settled_query_searches() {
        let mut state = AppState::default();
        let cmd = handled(update(&mut state, &Action::QuerySettled("oct".to_string())));
        assert_eq!(cmd, Some(Command::SearchUsers("oct".to_string())));
        assert!(state.is_searching);
    }

    #[test]
    fn test_blank_query_clears_options() {
        let mut state = AppState::default();
        handled(update(&mut state, &Action::QuerySettled("oct".to_string())));
        handled(update(
            &mut state,
            &Action::UsersLoaded("oct".to_string(), vec![user("octocat")]),
        ));
        assert_eq!(state.combobox.option_count(), 1);

        let cmd = handled(update(&mut state, &Action::QuerySettled("  ".to_string())));
        assert_eq!(cmd, None);
        assert_eq!(state.combobox.option_count(), 0);
        assert!(state.users.is_empty());
    }

    #[test]
    fn test_results_become_options() {
        let mut state = AppState::default();
        handled(update(&mut state, &Action::QuerySettled("oct".to_string())));
        handled(update(
            &mut state,
            &Action::UsersLoaded("oct".to_string(), vec![user("octocat"), user("octokit")]),
        ));
        assert!(!state.is_searching);
        assert_eq!(state.combobox.options()[1].id, "octokit");
        assert_eq!(state.combobox.options()[1].label, "@octokit");
        assert_eq!(state.status_message.as_deref(), Some("Loaded 2 users"));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut state = AppState::default();
        handled(update(&mut state, &Action::QuerySettled("oc".to_string())));
        handled(update(&mut state, &Action::QuerySettled("oct".to_string())));
        handled(update(
            &mut state,
            &Action::UsersLoaded("oc".to_string(), vec![user("ocaml")]),
        ));
        assert_eq!(state.combobox.option_count(), 0);
        assert!(state.is_searching);
    }

    #[test]
    fn test_shrinking_results_revalidate_active_option() {
        let mut state = AppState::default();
        handled(update(&mut state, &Action::QuerySettled("o".to_string())));
        handled(update(
            &mut state,
            &Action::UsersLoaded(
                "o".to_string(),
                vec![user("a"), user("b"), user("c")],
            ),
        ));
        state.combobox.on_key_down(NavKey::ArrowUp);
        assert_eq!(state.combobox.active_index(), Some(2));

        handled(update(&mut state, &Action::QuerySettled("oc".to_string())));
        handled(update(
            &mut state,
            &Action::UsersLoaded("oc".to_string(), vec![user("a")]),
        ));
        assert_eq!(state.combobox.active_index(), None);
    }

    #[test]
    fn test_search_failure_keeps_options() {
        let mut state = AppState::default();
        handled(update(&mut state, &Action::QuerySettled("oct".to_string())));
        handled(update(
            &mut state,
            &Action::UsersLoaded("oct".to_string(), vec![user("octocat")]),
        ));
        handled(update(&mut state, &Action::QuerySettled("octo".to_string())));
        handled(update(
            &mut state,
            &Action::SearchFailed(
                "octo".to_string(),
                SearchError::Transport("connection reset".to_string()),
            ),
        ));
        assert_eq!(state.combobox.option_count(), 1);
        assert_eq!(state.mode, AppMode::Error);
        let error = state.last_error.as_ref().unwrap();
        assert!(error.message.starts_with("Search failed: Network error"));
        assert!(!error.suggestions.is_empty());
    }

    #[test]
    fn test_user_loaded_fills_details() {
        let mut state = AppState::default();
        state.pending_login = Some("octocat".to_string());
        state.details_scroll = 5;
        handled(update(
            &mut state,
            &Action::UserLoaded(Box::new(user("octocat"))),
        ));
        assert_eq!(state.selected_user.as_ref().unwrap().login, "octocat");
        assert_eq!(state.pending_login, None);
        assert_eq!(state.details_scroll, 0);
        assert_eq!(state.status_message.as_deref(), Some("Loaded octocat"));
    }

    #[test]
    fn test_superseded_lookup_is_dropped() {
        let mut state = AppState::default();
        state.pending_login = Some("hubot".to_string());
        handled(update(
            &mut state,
            &Action::UserLoaded(Box::new(user("octocat"))),
        ));
        assert_eq!(state.selected_user, None);
        handled(update(
            &mut state,
            &Action::LookupFailed(
                "octocat".to_string(),
                SearchError::Transport("timeout".to_string()),
            ),
        ));
        assert_eq!(state.last_error, None);
        assert_eq!(state.pending_login.as_deref(), Some("hubot"));
    }
}
