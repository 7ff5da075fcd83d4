//! Option list of the search combobox.
//!
//! The widget receives everything it needs as parameters: the options, the
//! term to highlight, and the id of the active option. Each option occupies
//! `item_height` rows: the label, then its detail line.

use crate::domain::{highlight::highlight, options::ComboOption};
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub const EMPTY_TEXT: &str = "no options";

pub struct OptionList<'a> {
    pub options: &'a [ComboOption],
    pub term: &'a str,
    pub active_id: Option<&'a str>,
    pub scroll_offset: i32,
    pub item_height: u16,
    pub theme: &'a Theme,
}

impl OptionList<'_> {
    fn option_lines<'b>(&self, option: &'b ComboOption, is_active: bool) -> Vec<Line<'b>> {
        let theme = self.theme;
        let (base, matched, detail) = if is_active {
            (
                theme.option_active,
                theme.option_active.add_modifier(Modifier::UNDERLINED),
                theme.option_active.remove_modifier(Modifier::BOLD),
            )
        } else {
            (theme.option_item, theme.option_match, theme.option_detail)
        };

        let marker = if is_active {
            format!(" {} ", glyphs::ACTIVE)
        } else {
            "   ".to_string()
        };

        let parts = highlight(&option.label, self.term);
        let label = Line::from(vec![
            Span::styled(marker, base),
            Span::styled(parts.prefix, base),
            Span::styled(parts.matched, matched),
            Span::styled(parts.suffix, base),
        ]);

        let mut lines = vec![label];
        if let Some(text) = &option.detail {
            lines.push(Line::from(vec![
                Span::styled("   ", base),
                Span::styled(text.as_str(), detail),
            ]));
        }
        lines
    }
}

impl Widget for OptionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.options.is_empty() {
            let line = Line::from(vec![
                Span::raw("   "),
                Span::styled(EMPTY_TEXT, self.theme.option_empty),
            ]);
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let item_height = i32::from(self.item_height.max(1));
        let height = i32::from(area.height);
        for (i, option) in self.options.iter().enumerate() {
            let top = i as i32 * item_height - self.scroll_offset;
            if top + item_height <= 0 {
                continue;
            }
            if top >= height {
                break;
            }

            let is_active = self.active_id == Some(option.id.as_str());
            for row in 0..item_height {
                let y = top + row;
                if !(0..height).contains(&y) {
                    continue;
                }
                let y = area.y + y as u16;
                let style = if is_active {
                    self.theme.option_active
                } else {
                    Style::default()
                };
                buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            }

            for (row, line) in self.option_lines(option, is_active).iter().enumerate() {
                let y = top + row as i32;
                if row as i32 >= item_height || !(0..height).contains(&y) {
                    continue;
                }
                buf.set_line(area.x, area.y + y as u16, line, area.width);
            }
        }
    }
}
