use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
};

/// A rect `percent_x` wide and `height` rows tall (both capped to `area`),
/// centered in `area`.
pub fn popup_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x.min(100))])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// Fades everything already drawn in `area`.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = &mut buf[(x, y)];
            cell.set_style(cell.style().add_modifier(Modifier::DIM));
        }
    }
}

/// One-cell shadow below and right of `popup`, clipped to `bounds`.
pub fn draw_drop_shadow(buf: &mut Buffer, popup: Rect, bounds: Rect) {
    let shadow = Rect {
        x: popup.x.saturating_add(1),
        y: popup.y.saturating_add(1),
        ..popup
    }
    .intersection(bounds);

    for y in shadow.top()..shadow.bottom() {
        for x in shadow.left()..shadow.right() {
            buf[(x, y)]
                .set_style(Style::default().bg(Color::Black))
                .set_symbol(" ");
        }
    }
}
