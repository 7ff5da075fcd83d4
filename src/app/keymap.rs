use super::action::Action;
use super::state::{AppMode, Panel};
use crate::domain::combobox::NavKey;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    /// `emacs` (Ctrl+N/P), `vim` (adds Ctrl+J/K) or `plain` (arrows only).
    pub profile: String,
    /// Extra bindings, e.g. `"ctrl+d" = "select"`.
    pub custom: Option<HashMap<String, String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            profile: "vim".to_string(),
            custom: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    pub search: HashMap<KeyEvent, Action>,
    pub details: HashMap<KeyEvent, Action>,
    pub error: HashMap<KeyEvent, Action>,
}

impl KeyMap {
    pub fn from_config(config: &KeyConfig) -> Self {
        let mut search = HashMap::new();
        let mut details = HashMap::new();
        let mut error = HashMap::new();

        // --- Search Panel ---
        search.insert(key(KeyCode::Down), Action::ComboKey(NavKey::ArrowDown));
        search.insert(key(KeyCode::Up), Action::ComboKey(NavKey::ArrowUp));
        search.insert(key(KeyCode::Enter), Action::ComboKey(NavKey::Enter));
        search.insert(key(KeyCode::Esc), Action::ComboKey(NavKey::Escape));
        search.insert(key(KeyCode::Tab), Action::FocusDetails);
        search.insert(ctrl('c'), Action::Quit);
        if config.profile != "plain" {
            search.insert(ctrl('n'), Action::ComboKey(NavKey::ArrowDown));
            search.insert(ctrl('p'), Action::ComboKey(NavKey::ArrowUp));
        }
        if config.profile == "vim" {
            search.insert(ctrl('j'), Action::ComboKey(NavKey::ArrowDown));
            search.insert(ctrl('k'), Action::ComboKey(NavKey::ArrowUp));
        }

        // --- Details Panel ---
        details.insert(key(KeyCode::Tab), Action::FocusSearch);
        details.insert(key(KeyCode::BackTab), Action::FocusSearch);
        details.insert(key(KeyCode::Esc), Action::FocusSearch);
        details.insert(key(KeyCode::Char('/')), Action::FocusSearch);
        details.insert(key(KeyCode::Char('i')), Action::FocusSearch);
        details.insert(key(KeyCode::Char('j')), Action::ScrollDetailsDown(1));
        details.insert(key(KeyCode::Down), Action::ScrollDetailsDown(1));
        details.insert(key(KeyCode::Char('k')), Action::ScrollDetailsUp(1));
        details.insert(key(KeyCode::Up), Action::ScrollDetailsUp(1));
        details.insert(key(KeyCode::PageDown), Action::ScrollDetailsDown(10));
        details.insert(key(KeyCode::PageUp), Action::ScrollDetailsUp(10));
        details.insert(key(KeyCode::Char('q')), Action::Quit);
        details.insert(ctrl('c'), Action::Quit);

        // --- Error Overlay ---
        error.insert(key(KeyCode::Esc), Action::DismissError);
        error.insert(key(KeyCode::Enter), Action::DismissError);
        error.insert(key(KeyCode::Char('q')), Action::DismissError);
        error.insert(ctrl('c'), Action::Quit);

        let mut keymap = Self {
            search,
            details,
            error,
        };
        if let Some(custom) = &config.custom {
            keymap.apply_custom(custom);
        }
        keymap
    }

    fn apply_custom(&mut self, custom: &HashMap<String, String>) {
        for (spec, name) in custom {
            let (Some(event), Some(action)) = (parse_key(spec), parse_action(name)) else {
                log::warn!("ignoring key binding {spec} = {name}");
                continue;
            };
            match action {
                Action::ComboKey(_) | Action::FocusDetails => {
                    self.search.insert(event, action);
                }
                Action::ScrollDetailsUp(_) | Action::ScrollDetailsDown(_) | Action::FocusSearch => {
                    self.details.insert(event, action);
                }
                _ => {
                    self.search.insert(event, action.clone());
                    self.details.insert(event, action);
                }
            }
        }
    }

    pub fn get_action(&self, event: KeyEvent, mode: AppMode, panel: Panel) -> Option<Action> {
        let map = match (mode, panel) {
            (AppMode::Error, _) => &self.error,
            (AppMode::Normal, Panel::Search) => &self.search,
            (AppMode::Normal, Panel::Details) => &self.details,
        };
        map.get(&normalize(event)).cloned()
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Drops the key kind/state so presses compare equal to the map entries.
/// Shift is implied by uppercase characters.
fn normalize(event: KeyEvent) -> KeyEvent {
    let mut modifiers = event.modifiers;
    if matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(event.code, modifiers)
}

/// Parses `ctrl+n`, `alt+enter`, `pagedown`, `x`.
fn parse_key(spec: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let mut parts = spec.split('+').map(str::trim).peekable();
    let mut code = None;
    while let Some(part) = parts.next() {
        if parts.peek().is_some() {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.insert(KeyModifiers::CONTROL),
                "alt" => modifiers.insert(KeyModifiers::ALT),
                "shift" => modifiers.insert(KeyModifiers::SHIFT),
                _ => return None,
            }
            continue;
        }
        code = Some(match part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            _ => {
                let mut chars = part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        });
    }
    code.map(|code| KeyEvent::new(code, modifiers))
}

fn parse_action(name: &str) -> Option<Action> {
    Some(match name {
        "next" | "down" => Action::ComboKey(NavKey::ArrowDown),
        "prev" | "up" => Action::ComboKey(NavKey::ArrowUp),
        "select" => Action::ComboKey(NavKey::Enter),
        "close" => Action::ComboKey(NavKey::Escape),
        "focus-details" => Action::FocusDetails,
        "focus-search" => Action::FocusSearch,
        "scroll-down" => Action::ScrollDetailsDown(1),
        "scroll-up" => Action::ScrollDetailsUp(1),
        "quit" => Action::Quit,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_panel_bindings() {
        let keymap = KeyMap::from_config(&KeyConfig::default());
        assert_eq!(
            keymap.get_action(key(KeyCode::Down), AppMode::Normal, Panel::Search),
            Some(Action::ComboKey(NavKey::ArrowDown))
        );
        assert_eq!(
            keymap.get_action(ctrl('k'), AppMode::Normal, Panel::Search),
            Some(Action::ComboKey(NavKey::ArrowUp))
        );
        // Plain characters go to the input.
        assert_eq!(
            keymap.get_action(key(KeyCode::Char('q')), AppMode::Normal, Panel::Search),
            None
        );
    }

    #[test]
    fn test_details_and_error_bindings() {
        let keymap = KeyMap::from_config(&KeyConfig::default());
        assert_eq!(
            keymap.get_action(key(KeyCode::Char('q')), AppMode::Normal, Panel::Details),
            Some(Action::Quit)
        );
        assert_eq!(
            keymap.get_action(key(KeyCode::Esc), AppMode::Error, Panel::Search),
            Some(Action::DismissError)
        );
    }

    #[test]
    fn test_plain_profile_has_no_control_navigation() {
        let keymap = KeyMap::from_config(&KeyConfig {
            profile: "plain".to_string(),
            custom: None,
        });
        assert_eq!(keymap.get_action(ctrl('n'), AppMode::Normal, Panel::Search), None);
    }

    #[test]
    fn test_custom_bindings() {
        let custom = HashMap::from([
            ("ctrl+d".to_string(), "select".to_string()),
            ("alt+x".to_string(), "quit".to_string()),
            ("hyper+z".to_string(), "quit".to_string()),
            ("x".to_string(), "launch".to_string()),
        ]);
        let keymap = KeyMap::from_config(&KeyConfig {
            profile: "vim".to_string(),
            custom: Some(custom),
        });
        assert_eq!(
            keymap.get_action(ctrl('d'), AppMode::Normal, Panel::Search),
            Some(Action::ComboKey(NavKey::Enter))
        );
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(
            keymap.get_action(alt_x, AppMode::Normal, Panel::Details),
            Some(Action::Quit)
        );
        assert_eq!(
            keymap.get_action(key(KeyCode::Char('x')), AppMode::Normal, Panel::Search),
            None
        );
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("ctrl+n"), Some(ctrl('n')));
        assert_eq!(parse_key("PageDown"), Some(key(KeyCode::PageDown)));
        assert_eq!(parse_key("ctrl+"), None);
        assert_eq!(parse_key("nope"), None);
    }
}
