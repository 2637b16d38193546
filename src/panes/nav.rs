use anyhow::Result;
use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

use crate::controller::View;
use crate::panes::{Pane, PaneState};
use crate::theme::tui_palette as tp;
use crate::tui::Frame;

/// Width of the navigation column, in cells.
pub const NAV_WIDTH: u16 = 16;

const ITEMS: &[(View, &str, &str)] = &[(View::Chat, "Chat", "F1"), (View::Config, "Config", "F2")];

/// Left-hand navigation: one entry per view, the active one highlighted.
#[derive(Default)]
pub struct NavPane {}

impl NavPane {
    pub fn new() -> Self {
        Self {}
    }
}

impl Pane for NavPane {
    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()> {
        let active = state.controller.view();
        let items: Vec<ListItem> = ITEMS
            .iter()
            .flat_map(|(view, label, key)| {
                let style = if *view == active {
                    tp::selected()
                } else {
                    Style::default().fg(tp::TEXT)
                };
                [
                    ListItem::new(Line::from(vec![
                        Span::styled(format!(" {label:<8}"), style),
                        Span::styled(format!(" {key}"), Style::default().fg(tp::MUTED)),
                    ])),
                    ListItem::new(""),
                ]
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::RIGHT));
        frame.render_widget(list, area);
        Ok(())
    }
}
