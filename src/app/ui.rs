use crate::app::state::{AppMode, AppState, Panel};
use crate::components::{
    combobox::OptionList, details::Details, footer::Footer, header::Header, modals::ErrorModal,
};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Screen regions. `label`, `input` and `list` sit inside the search panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub search: Rect,
    pub details: Rect,
    pub footer: Rect,
    pub label: Rect,
    pub input: Rect,
    pub list: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(0),    // Body
        Constraint::Length(1), // Footer
    ])
    .areas(area);

    let [search, details] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);

    let inner = panel_block().inner(search);
    let [label, input, _divider, list] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    AppLayout {
        header,
        search,
        details,
        footer,
        label,
        input,
        list,
    }
}

fn panel_block<'a>() -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }
    let theme = app_state.theme.clone();
    let layout = get_layout(f.area());

    // The list viewport drives scroll reconciliation.
    app_state.combobox.set_viewport_height(layout.list.height);

    // --- Header ---
    f.render_widget(
        Header {
            origin: &app_state.api_origin,
            focused_panel: app_state.focused_panel,
            theme: &theme,
        },
        layout.header,
    );

    // --- Search Panel ---
    let search_focused = app_state.focused_panel == Panel::Search;
    let (border, title_style) = if search_focused {
        (theme.border_focus, theme.header_active)
    } else {
        (theme.border, theme.header_item)
    };
    let search_block = panel_block()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(" USERS ", title_style),
            Span::raw(" "),
        ]))
        .border_style(border);
    f.render_widget(search_block, layout.search);

    // Muted until the input is focused or holds text.
    let label_style = if app_state.combobox.is_focused() || app_state.combobox.has_value() {
        theme.label
    } else {
        theme.dimmed
    };
    let label = Line::from(vec![
        Span::styled(app_state.combobox.label().to_string(), label_style),
        Span::styled(format!("  #{}", app_state.combobox.input_id()), theme.dimmed),
    ]);
    f.render_widget(Paragraph::new(label), layout.label);

    app_state.input.set_style(theme.input);
    app_state.input.set_placeholder_style(theme.input_placeholder);
    app_state.input.set_cursor_style(if search_focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });
    f.render_widget(&app_state.input, layout.input);

    if app_state.combobox.is_open() {
        let list = OptionList {
            options: app_state.combobox.options(),
            term: app_state.combobox.value(),
            active_id: app_state.combobox.active_option_id(),
            scroll_offset: app_state.combobox.scroll_offset(),
            item_height: app_state.combobox.item_height(),
            theme: &theme,
        };
        f.render_widget(list, layout.list);
    } else if app_state.combobox.option_count() > 0 {
        let hint = Line::from(vec![
            Span::raw("   "),
            Span::styled(
                format!("{} results, ↓ to browse", app_state.combobox.option_count()),
                theme.dimmed,
            ),
        ]);
        f.render_widget(Paragraph::new(hint), layout.list);
    }

    // --- Details Panel ---
    let (border, title_style) = if search_focused {
        (theme.border, theme.header_item)
    } else {
        (theme.border_focus, theme.header_active)
    };
    let title = app_state
        .selected_user
        .as_ref()
        .map_or_else(|| " DETAILS ".to_string(), |u| format!(" {} ", u.login));
    let details_block = panel_block()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title, title_style),
            Span::raw(" "),
        ]))
        .border_style(border);
    let details_inner = details_block.inner(layout.details);
    f.render_widget(details_block, layout.details);
    f.render_widget(
        Details {
            user: app_state.selected_user.as_ref(),
            pending_login: app_state.pending_login.as_deref(),
            scroll: app_state.details_scroll,
            frame_count: app_state.frame_count,
            theme: &theme,
        },
        details_inner,
    );

    // --- Footer ---
    f.render_widget(
        Footer {
            state: app_state,
            theme: &theme,
        },
        layout.footer,
    );

    // --- Modals ---
    if let (AppMode::Error, Some(error)) = (app_state.mode, &app_state.last_error) {
        f.render_widget(
            ErrorModal {
                theme: &theme,
                error,
            },
            f.area(),
        );
    }
}
