use super::types::{FooterGroup, FooterItem};
use crate::app::state::{AppMode, AppState, Panel};

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.mode == AppMode::Error {
        return vec![FooterGroup {
            name: "ERROR",
            items: vec![FooterItem::new("Esc", "dismiss")],
        }];
    }

    match state.focused_panel {
        Panel::Search => {
            let is_open = state.combobox.is_open();
            let has_active = state.combobox.active_option_id().is_some();
            vec![
                FooterGroup {
                    name: "LIST",
                    items: vec![
                        FooterItem::new("↑/↓", "move").highlighted(is_open),
                        FooterItem::new("Enter", "select").highlighted(has_active),
                        FooterItem::new("Esc", "clear"),
                    ],
                },
                FooterGroup {
                    name: "APP",
                    items: vec![
                        FooterItem::new("Tab", "details"),
                        FooterItem::new("^C", "quit"),
                    ],
                },
            ]
        }
        Panel::Details => vec![
            FooterGroup {
                name: "VIEW",
                items: vec![
                    FooterItem::new("j/k", "scroll"),
                    FooterItem::new("PgUp/Dn", "page"),
                ],
            },
            FooterGroup {
                name: "APP",
                items: vec![
                    FooterItem::new("Tab", "search"),
                    FooterItem::new("q", "quit"),
                ],
            },
        ],
    }
}
