use crate::app::{
    action::Action,
    state::{AppMode, AppState, Panel},
    ui,
};
use crate::domain::{combobox::NavKey, options::option_ids};
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Rect, Size};

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    match event {
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            if let Some(action) =
                app_state
                    .keymap
                    .get_action(key, app_state.mode, app_state.focused_panel)
            {
                return Some(action);
            }
            // Everything else edits the search text.
            (app_state.mode == AppMode::Normal && app_state.focused_panel == Panel::Search)
                .then_some(Action::InputKey(key))
        }
        Event::Mouse(mouse) => map_mouse(mouse, app_state, terminal_size),
        _ => None,
    }
}

fn map_mouse(mouse: MouseEvent, app_state: &AppState<'_>, terminal_size: Size) -> Option<Action> {
    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
    let layout = ui::get_layout(area);
    let (column, row) = (mouse.column, mouse.row);

    if app_state.mode == AppMode::Error {
        return matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
            .then_some(Action::DismissError);
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app_state.combobox.is_open() && ui::contains(layout.list, column, row) {
                let ids = option_ids(app_state.combobox.options());
                let index = app_state.combobox.option_at_row(row - layout.list.y);
                if let Some(id) = index.and_then(|i| ids.get(i)) {
                    return Some(Action::OptionClicked((*id).to_string()));
                }
            }
            if ui::contains(layout.search, column, row) {
                Some(Action::FocusSearch)
            } else if app_state.focused_panel == Panel::Search {
                Some(Action::FocusDetails)
            } else {
                None
            }
        }
        MouseEventKind::ScrollUp => {
            if ui::contains(layout.details, column, row) {
                Some(Action::ScrollDetailsUp(1))
            } else if app_state.combobox.is_open() && ui::contains(layout.list, column, row) {
                Some(Action::ComboKey(NavKey::ArrowUp))
            } else {
                None
            }
        }
        MouseEventKind::ScrollDown => {
            if ui::contains(layout.details, column, row) {
                Some(Action::ScrollDetailsDown(1))
            } else if app_state.combobox.is_open() && ui::contains(layout.list, column, row) {
                Some(Action::ComboKey(NavKey::ArrowDown))
            } else {
                None
            }
        }
        _ => None,
    }
}
