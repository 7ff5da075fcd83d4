//! Headless combobox: a text input paired with a keyboard-navigable option
//! list.
//!
//! The engine never calls back into the application. Every handler returns an
//! [`Outcome`] describing what the owner should do: forward the new input
//! value, run a selection, or arm/cancel the blur-close timer. Timers are run
//! by the owner and reported back through [`Combobox::on_blur_elapsed`] with
//! the token the engine handed out.

use super::options::ComboOption;
use super::scroll::{self, ItemBox, ScrollStrategy, Viewport};
use std::time::Duration;

pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(300);

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Side effects requested by a handler, in the order they must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboEvent {
    /// The input value changed (`onChange`).
    Changed(String),
    /// An option was picked (`onSelect`).
    Selected(String),
    /// Arm the blur-close timer.
    ScheduleClose { token: u64, delay: Duration },
    /// Disarm a previously armed timer.
    CancelClose { token: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The key press was consumed and must not reach the input.
    pub prevent_default: bool,
    pub events: Vec<ComboEvent>,
}

impl Outcome {
    fn prevented() -> Self {
        Self {
            prevent_default: true,
            events: Vec::new(),
        }
    }

    fn push(&mut self, event: ComboEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboConfig {
    pub blur_grace: Duration,
    pub scroll_strategy: ScrollStrategy,
    /// Rows occupied by one option.
    pub item_height: u16,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            blur_grace: DEFAULT_BLUR_GRACE,
            scroll_strategy: ScrollStrategy::Precise,
            item_height: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Combobox {
    label: String,
    value: String,
    options: Vec<ComboOption>,
    is_open: bool,
    is_focused: bool,
    active_index: Option<usize>,
    pending_close: Option<u64>,
    next_token: u64,
    config: ComboConfig,
    viewport_height: u16,
    scroll_offset: i32,
}

impl Default for Combobox {
    fn default() -> Self {
        Self::new("", ComboConfig::default())
    }
}

impl Combobox {
    pub fn new(label: impl Into<String>, config: ComboConfig) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            options: Vec::new(),
            is_open: false,
            is_focused: false,
            active_index: None,
            pending_close: None,
            next_token: 0,
            config,
            viewport_height: 0,
            scroll_offset: 0,
        }
    }

    // --- Derived view state ---

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn options(&self) -> &[ComboOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn has_value(&self) -> bool {
        !self.value.trim().is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_option_id(&self) -> Option<&str> {
        self.active_index
            .and_then(|i| self.options.get(i))
            .map(|o| o.id.as_str())
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Identifier tying the label to the input: lowercased, spaces as hyphens.
    pub fn input_id(&self) -> String {
        self.label.split(' ').collect::<Vec<_>>().join("-").to_lowercase()
    }

    pub fn is_close_pending(&self) -> bool {
        self.pending_close.is_some()
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    pub fn item_height(&self) -> u16 {
        self.config.item_height
    }

    /// Index of the option drawn at `row` of the list viewport.
    pub fn option_at_row(&self, row: u16) -> Option<usize> {
        let height = i32::from(self.config.item_height.max(1));
        let index = (i32::from(row) + self.scroll_offset) / height;
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.options.len())
    }

    // --- Layout input ---

    /// Records the visible height of the list, in rows.
    pub fn set_viewport_height(&mut self, rows: u16) {
        if self.viewport_height != rows {
            self.viewport_height = rows;
            self.clamp_scroll();
            self.reveal_active();
        }
    }

    /// Replaces the option list. The active index survives only while it
    /// still points inside the new list.
    pub fn set_options(&mut self, options: Vec<ComboOption>) {
        self.options = options;
        if self.active_index.is_some_and(|i| i >= self.options.len()) {
            log::debug!(
                "active option dropped, list shrank to {}",
                self.options.len()
            );
            self.active_index = None;
        }
        self.clamp_scroll();
        self.reveal_active();
    }

    // --- Handlers ---

    pub fn on_input_change(&mut self, text: &str) -> Outcome {
        if !self.is_open {
            self.open();
        }
        self.value = text.to_string();
        let mut outcome = Outcome::default();
        outcome.push(ComboEvent::Changed(text.to_string()));
        outcome
    }

    pub fn on_focus(&mut self) -> Outcome {
        self.is_focused = true;
        let mut outcome = Outcome::default();
        if let Some(token) = self.pending_close.take() {
            log::debug!("focus regained, cancelling close #{token}");
            outcome.push(ComboEvent::CancelClose { token });
        }
        outcome
    }

    pub fn on_blur(&mut self) -> Outcome {
        let mut outcome = Outcome::default();
        if self.pending_close.is_some() {
            return outcome;
        }
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        self.pending_close = Some(token);
        outcome.push(ComboEvent::ScheduleClose {
            token,
            delay: self.config.blur_grace,
        });
        outcome
    }

    /// Runs the deferred close armed by `on_blur`. Returns `false` when the
    /// token is stale (the close was cancelled or superseded).
    pub fn on_blur_elapsed(&mut self, token: u64) -> bool {
        if self.pending_close != Some(token) {
            return false;
        }
        self.pending_close = None;
        self.close();
        self.is_focused = false;
        self.active_index = None;
        true
    }

    pub fn on_key_down(&mut self, key: NavKey) -> Outcome {
        match key {
            NavKey::ArrowDown => {
                if !self.is_open {
                    self.open();
                }
                let count = self.options.len();
                if count > 0 {
                    let next = match self.active_index {
                        Some(i) => (i + 1) % count,
                        None => 0,
                    };
                    self.activate(next);
                }
                Outcome::prevented()
            }
            NavKey::ArrowUp => {
                let count = self.options.len();
                if count > 0 {
                    let next = match self.active_index {
                        Some(i) if i > 0 => i - 1,
                        _ => count - 1,
                    };
                    self.activate(next);
                }
                Outcome::prevented()
            }
            NavKey::Enter => {
                let active = self.active_option_id().map(str::to_string);
                let mut outcome = match active {
                    Some(id) => self.on_select(&id),
                    None => Outcome::default(),
                };
                outcome.prevent_default = true;
                outcome
            }
            NavKey::Escape => {
                self.close();
                self.active_index = None;
                self.value.clear();
                let mut outcome = Outcome::default();
                outcome.push(ComboEvent::Changed(String::new()));
                outcome
            }
        }
    }

    /// Picks `id`, typically from a click or `Enter`. Empty ids only close
    /// the list.
    pub fn on_select(&mut self, id: &str) -> Outcome {
        let mut outcome = Outcome::default();
        if !id.is_empty() {
            self.value = id.to_string();
            outcome.push(ComboEvent::Changed(id.to_string()));
            outcome.push(ComboEvent::Selected(id.to_string()));
        }
        self.close();
        // A stale index would re-activate an unrelated option on reopen.
        self.active_index = None;
        outcome
    }

    // --- Internals ---

    fn open(&mut self) {
        log::debug!("combobox '{}' opened", self.input_id());
        self.is_open = true;
        self.reveal_active();
    }

    fn close(&mut self) {
        self.is_open = false;
        // The list is rebuilt from the top when it reopens.
        self.scroll_offset = 0;
    }

    fn activate(&mut self, index: usize) {
        self.active_index = Some(index);
        self.reveal_active();
    }

    fn viewport(&self) -> Viewport {
        let item_height = i32::from(self.config.item_height);
        Viewport {
            top: 0,
            height: i32::from(self.viewport_height),
            scroll_top: self.scroll_offset,
            scroll_height: item_height * self.options.len() as i32,
        }
    }

    fn reveal_active(&mut self) {
        let Some(index) = self.active_index else {
            return;
        };
        if self.viewport_height == 0 || !self.is_open {
            return;
        }
        let item_height = i32::from(self.config.item_height);
        let target = ItemBox {
            offset_top: index as i32 * item_height,
            height: item_height,
        };
        let mut viewport = self.viewport();
        if scroll::scroll_into_view(&mut viewport, &target, self.config.scroll_strategy) {
            self.scroll_offset = viewport.scroll_top;
        }
    }

    fn clamp_scroll(&mut self) {
        let viewport = self.viewport();
        let max = (viewport.scroll_height - viewport.height).max(0);
        self.scroll_offset = self.scroll_offset.clamp(0, max);
    }
}
