use crate::app::state::{ErrorSeverity, ErrorState};
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::helpers::{dim_background, draw_drop_shadow, popup_rect};

pub struct ErrorModal<'a> {
    pub theme: &'a Theme,
    pub error: &'a ErrorState,
}

impl Widget for ErrorModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title_text, title_style) = match self.error.severity {
            ErrorSeverity::Info => (" INFO ", self.theme.status_info),
            ErrorSeverity::Warning => (" WARNING ", self.theme.status_warn),
            ErrorSeverity::Error => (" ERROR ", self.theme.status_error),
            ErrorSeverity::Critical => (" CRITICAL ", self.theme.status_error),
        };

        let timestamp = self.error.timestamp.format("%H:%M:%S").to_string();
        let mut text_lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{} ", glyphs::ERROR), title_style),
                Span::styled(&self.error.message, self.theme.option_item),
            ]),
            Line::from(Span::styled(
                format!("at {timestamp}"),
                self.theme.dimmed,
            )),
            Line::from(""),
        ];

        if !self.error.suggestions.is_empty() {
            text_lines.push(Line::from(Span::styled("Try:", self.theme.label)));
            for suggestion in &self.error.suggestions {
                text_lines.push(Line::from(vec![
                    Span::styled("  • ", self.theme.label),
                    Span::styled(suggestion, self.theme.footer_segment_key),
                ]));
            }
            text_lines.push(Line::from(""));
        }

        text_lines.push(Line::from(vec![
            Span::raw(" Press "),
            Span::styled("Esc", self.theme.footer_segment_key),
            Span::raw(" to dismiss "),
        ]));

        // Borders plus a little room for wrapped lines.
        let height = text_lines.len() as u16 + 4;
        let modal_area = popup_rect(area, 70, height);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        dim_background(buf, area);
        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title_text, title_style),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(title_style);

        Paragraph::new(text_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(modal_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SearchError;

    #[test]
    fn test_renders_message_and_suggestions() {
        let theme = Theme::default();
        let error = ErrorState::from_search_error(
            "Search failed",
            &SearchError::Transport("connection refused".to_string()),
        );
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        ErrorModal {
            theme: &theme,
            error: &error,
        }
        .render(area, &mut buf);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("ERROR"));
        assert!(screen.contains("connection refused"));
        assert!(screen.contains("network connection"));
    }
}
