use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::ops::{Deref, DerefMut};
use tui_textarea::{CursorMove, TextArea};

/// Single-line text input backing the combobox.
#[derive(Default)]
pub struct AppTextArea<'a>(pub TextArea<'a>);

impl AppTextArea<'_> {
    /// Current text. Multiple lines (pasted newlines) are joined.
    #[must_use]
    pub fn text(&self) -> String {
        self.0.lines().join("")
    }

    /// Replaces the text and moves the cursor to its end. No-op when the
    /// text is unchanged so the cursor stays where the user left it.
    pub fn set_text(&mut self, text: &str) {
        if self.text() == text {
            return;
        }
        let style = self.0.style();
        let cursor_style = self.0.cursor_style();
        let placeholder = self.0.placeholder_text().to_string();
        let placeholder_style = self.0.placeholder_style();

        let mut area = TextArea::new(vec![text.to_string()]);
        area.set_style(style);
        area.set_cursor_style(cursor_style);
        area.set_cursor_line_style(ratatui::style::Style::default());
        area.set_placeholder_text(placeholder);
        if let Some(placeholder_style) = placeholder_style {
            area.set_placeholder_style(placeholder_style);
        }
        area.move_cursor(CursorMove::End);
        self.0 = area;
    }

    /// Folds any line breaks back into one line.
    pub fn flatten(&mut self) {
        if self.0.lines().len() > 1 {
            let text = self.text();
            self.set_text(&text);
        }
    }
}

impl Clone for AppTextArea<'_> {
    fn clone(&self) -> Self {
        let mut area = TextArea::new(self.0.lines().to_vec());
        let (row, col) = self.0.cursor();
        area.move_cursor(CursorMove::Jump(row as u16, col as u16));
        Self(area)
    }
}

impl std::fmt::Debug for AppTextArea<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTextArea")
            .field("lines", &self.0.lines())
            .field("cursor", &self.0.cursor())
            .finish()
    }
}

impl PartialEq for AppTextArea<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.lines() == other.0.lines() && self.0.cursor() == other.0.cursor()
    }
}

impl<'a> Deref for AppTextArea<'a> {
    type Target = TextArea<'a>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AppTextArea<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Widget for &AppTextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.0, area, buf);
    }
}
