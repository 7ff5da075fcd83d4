use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppState, Panel},
};
use crate::domain::combobox::{ComboEvent, Outcome};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::InputKey(key) => {
            let before = state.input.text();
            state.input.input(*key);
            state.input.flatten();
            let after = state.input.text();
            if before == after {
                // Cursor movement only.
                return UpdateResult::Handled(None);
            }
            let outcome = state.combobox.on_input_change(&after);
            UpdateResult::Handled(apply_outcome(state, outcome))
        }
        Action::ComboKey(key) => {
            let outcome = state.combobox.on_key_down(*key);
            UpdateResult::Handled(apply_outcome(state, outcome))
        }
        Action::OptionClicked(id) => {
            let mut commands = Vec::new();
            if let Some(cmd) = focus_search(state) {
                commands.push(cmd);
            }
            let outcome = state.combobox.on_select(id);
            if let Some(cmd) = apply_outcome(state, outcome) {
                commands.push(cmd);
            }
            UpdateResult::Handled(Command::batch(commands))
        }
        Action::FocusSearch => UpdateResult::Handled(focus_search(state)),
        Action::FocusDetails => {
            state.focused_panel = Panel::Details;
            let outcome = state.combobox.on_blur();
            UpdateResult::Handled(apply_outcome(state, outcome))
        }
        Action::BlurElapsed(token) => {
            if !state.combobox.on_blur_elapsed(*token) {
                log::debug!("ignoring stale blur timer #{token}");
            }
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn focus_search(state: &mut AppState) -> Option<Command> {
    state.focused_panel = Panel::Search;
    let outcome = state.combobox.on_focus();
    apply_outcome(state, outcome)
}

/// Turns engine events into state changes and runtime commands, in order.
fn apply_outcome(state: &mut AppState, outcome: Outcome) -> Option<Command> {
    let mut commands = Vec::new();
    for event in outcome.events {
        match event {
            ComboEvent::Changed(value) => {
                state.input.set_text(&value);
                commands.push(Command::Debounce(value));
            }
            ComboEvent::Selected(login) => {
                state.pending_login = Some(login.clone());
                commands.push(Command::FetchUser(login));
            }
            ComboEvent::ScheduleClose { token, delay } => {
                commands.push(Command::ScheduleBlurClose { token, delay });
            }
            ComboEvent::CancelClose { token } => {
                commands.push(Command::CancelBlurClose(token));
            }
        }
    }
    Command::batch(commands)
}
