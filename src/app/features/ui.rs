use crate::app::{
    action::{Action, UpdateResult},
    state::{AppMode, AppState},
};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            UpdateResult::Handled(None)
        }
        // Redrawn on the next frame.
        Action::Resize(_, _) => UpdateResult::Handled(None),
        Action::Quit => {
            state.should_quit = true;
            UpdateResult::Handled(None)
        }
        Action::DismissError => {
            state.mode = AppMode::Normal;
            state.last_error = None;
            UpdateResult::Handled(None)
        }
        Action::ScrollDetailsUp(n) => {
            state.details_scroll = state.details_scroll.saturating_sub(*n);
            UpdateResult::Handled(None)
        }
        Action::ScrollDetailsDown(n) => {
            let max_scroll = state.details_line_count().saturating_sub(1) as u16;
            state.details_scroll = state.details_scroll.saturating_add(*n).min(max_scroll);
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ErrorState;
    use crate::domain::{error::SearchError, models::GithubUser};

    #[test]
    fn test_details_scroll_is_clamped() {
        let mut state = AppState::default();
        update(&mut state, &Action::ScrollDetailsDown(10));
        assert_eq!(state.details_scroll, 0);

        state.selected_user = Some(GithubUser {
            login: "octocat".to_string(),
            ..GithubUser::default()
        });
        // {, login, id, site_admin, }
        update(&mut state, &Action::ScrollDetailsDown(10));
        assert_eq!(state.details_scroll, 4);
        update(&mut state, &Action::ScrollDetailsUp(3));
        assert_eq!(state.details_scroll, 1);
        update(&mut state, &Action::ScrollDetailsUp(3));
        assert_eq!(state.details_scroll, 0);
    }

    #[test]
    fn test_dismiss_error() {
        let mut state = AppState::default();
        state.mode = AppMode::Error;
        state.last_error = Some(ErrorState::from_search_error(
            "Search failed",
            &SearchError::Transport("offline".to_string()),
        ));
        update(&mut state, &Action::DismissError);
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut state = AppState::default();
        update(&mut state, &Action::Tick);
        update(&mut state, &Action::Tick);
        assert_eq!(state.frame_count, 2);
    }
}
