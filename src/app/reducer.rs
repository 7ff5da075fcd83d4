use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::AppState,
};

type Feature = fn(&mut AppState, &Action) -> UpdateResult;

const FEATURES: [Feature; 3] = [
    features::combobox::update,
    features::search::update,
    features::ui::update,
];

/// Applies `action` to the state, returning the side effect to run, if any.
pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    for feature in FEATURES {
        if let UpdateResult::Handled(command) = feature(state, &action) {
            return command;
        }
    }
    log::debug!("unhandled action {action:?}");
    None
}
