use anyhow::Result;
use ratatui::{
    layout::{Constraint, Rect},
    prelude::*,
};

use crate::panes::{Pane, PaneState};
use crate::theme::tui_palette as tp;
use crate::tui::Frame;

#[derive(Default)]
pub struct HeaderPane {}

impl HeaderPane {
    pub fn new() -> Self {
        Self {}
    }
}

impl Pane for HeaderPane {
    fn height_constraint(&self) -> Constraint {
        Constraint::Max(1)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()> {
        let mut spans = vec![
            Span::styled("[ AI Assistant ", Style::default().fg(tp::ACCENT)),
            Span::styled(format!("{} ", symbols::DOT), Style::default().fg(tp::MUTED)),
        ];
        if let Some(session) = state.session {
            spans.push(Span::styled(
                format!("{} / {} ", session.platform, session.model),
                Style::default().fg(tp::TEXT),
            ));
            spans.push(Span::styled(
                format!("{} ", symbols::DOT),
                Style::default().fg(tp::MUTED),
            ));
        }
        spans.push(Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(tp::ACCENT_BRIGHT),
        ));
        spans.push(Span::styled("]", Style::default().fg(tp::ACCENT)));

        frame.render_widget(Line::from(spans).right_aligned(), area);
        Ok(())
    }
}
