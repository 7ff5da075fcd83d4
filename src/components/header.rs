use crate::app::state::Panel;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub origin: &'a str,
    pub focused_panel: Panel,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Segment background colors for separator transitions
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let origin_bg = self.theme.header_item.bg.unwrap_or(Color::Reset);
        let panel_bg = self.theme.header_active.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);

        let panel_text = match self.focused_panel {
            Panel::Search => format!(" {} SEARCH ", glyphs::SEARCH),
            Panel::Details => format!(" {} DETAILS ", glyphs::USER),
        };

        let spans = vec![
            Span::styled(" TYPEAHEAD ", self.theme.header_logo),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(logo_bg).bg(origin_bg)),
            Span::styled(format!(" {} ", self.origin), self.theme.header_item),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(origin_bg).bg(panel_bg)),
            Span::styled(panel_text, self.theme.header_active),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(panel_bg).bg(base_bg)),
        ];

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
