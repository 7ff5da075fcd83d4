use crate::domain::models::GithubUser;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Details<'a> {
    pub user: Option<&'a GithubUser>,
    pub pending_login: Option<&'a str>,
    pub scroll: u16,
    pub frame_count: u64,
    pub theme: &'a Theme,
}

impl Widget for Details<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if let Some(login) = self.pending_login {
            let line = Line::from(vec![
                Span::styled(glyphs::spinner(self.frame_count), self.theme.json_key),
                Span::raw(format!(" Loading {login}...")),
            ]);
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(center_row(area), buf);
            return;
        }

        let Some(user) = self.user else {
            Paragraph::new(Line::from(Span::styled(
                "Select a user to see the full record",
                self.theme.dimmed,
            )))
            .alignment(Alignment::Center)
            .render(center_row(area), buf);
            return;
        };

        let json = match user.to_pretty_json() {
            Ok(json) => json,
            Err(e) => format!("Failed to format {}: {e}", user.login),
        };
        let lines: Vec<Line> = json.lines().map(|l| json_line(l, self.theme)).collect();
        Paragraph::new(lines)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

fn center_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    }
}

/// Styles one line of pretty-printed JSON: `<indent>"key": value,`.
fn json_line<'a>(line: &'a str, theme: &Theme) -> Line<'a> {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let mut spans = vec![Span::raw(indent)];

    let value = match split_key(body) {
        Some((key, rest)) => {
            spans.push(Span::styled(key, theme.json_key));
            spans.push(Span::styled(": ", theme.json_punct));
            rest
        }
        None => body,
    };

    let (value, comma) = match value.strip_suffix(',') {
        Some(v) => (v, ","),
        None => (value, ""),
    };
    spans.push(Span::styled(value, value_style(value, theme)));
    if !comma.is_empty() {
        spans.push(Span::styled(comma, theme.json_punct));
    }
    Line::from(spans)
}

fn split_key(body: &str) -> Option<(&str, &str)> {
    if !body.starts_with('"') {
        return None;
    }
    // Keys are plain identifiers, so the first `": ` ends the key.
    let end = body.find("\": ")?;
    Some((&body[..=end], &body[end + 3..]))
}

fn value_style(value: &str, theme: &Theme) -> Style {
    match value.chars().next() {
        Some('"') => theme.json_string,
        Some('{' | '}' | '[' | ']') => theme.json_punct,
        Some(c) if c == '-' || c.is_ascii_digit() => theme.json_number,
        Some(_) => theme.json_literal,
        None => Style::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_json_line_spans() {
        let theme = Theme::default();
        let line = json_line("    \"login\": \"octocat\",", &theme);
        assert_eq!(text(&line), "    \"login\": \"octocat\",");
        assert_eq!(line.spans[1].content, "\"login\"");
        assert_eq!(line.spans[1].style, theme.json_key);
        assert_eq!(line.spans[3].style, theme.json_string);

        let line = json_line("    \"followers\": 42", &theme);
        assert_eq!(line.spans[3].style, theme.json_number);

        let line = json_line("    \"site_admin\": false", &theme);
        assert_eq!(line.spans[3].style, theme.json_literal);

        let line = json_line("}", &theme);
        assert_eq!(line.spans[1].style, theme.json_punct);
    }

    #[test]
    fn test_renders_record() {
        let theme = Theme::default();
        let user = GithubUser {
            login: "octocat".to_string(),
            id: 583231,
            ..GithubUser::default()
        };
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        Details {
            user: Some(&user),
            pending_login: None,
            scroll: 1,
            frame_count: 0,
            theme: &theme,
        }
        .render(area, &mut buf);

        let first: String = (0..40).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(first.contains("\"login\": \"octocat\""));
    }
}
