use anyhow::Result;
use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::pages::Page;
use crate::panes::PaneState;
use crate::theme::tui_palette as tp;
use crate::tui::Frame;

/// The chat screen.  Holds no conversation yet: it shows the session the
/// user started and a disabled input line.
pub struct ChatPage {
    focused_border_style: Style,
}

impl ChatPage {
    pub fn new(focused_border_style: Style) -> Self {
        Self {
            focused_border_style,
        }
    }
}

impl Page for ChatPage {
    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let body = match state.session {
            Some(session) => vec![
                Line::from(vec![
                    Span::styled(" Platform: ", Style::default().fg(tp::MUTED)),
                    Span::styled(session.platform.as_str(), Style::default().fg(tp::TEXT)),
                ]),
                Line::from(vec![
                    Span::styled(" Model:    ", Style::default().fg(tp::MUTED)),
                    Span::styled(session.model.as_str(), Style::default().fg(tp::TEXT)),
                ]),
                Line::from(vec![
                    Span::styled(" Endpoint: ", Style::default().fg(tp::MUTED)),
                    Span::styled(
                        session.client.base_url().as_str(),
                        Style::default().fg(tp::TEXT_DIM),
                    ),
                ]),
            ],
            None => vec![Line::from(Span::styled(
                " No session. Open Config (F2), fill in the form and press Start.",
                Style::default().fg(tp::TEXT_DIM),
            ))],
        };

        frame.render_widget(
            Paragraph::new(body).wrap(Wrap { trim: false }).block(
                Block::default()
                    .title(Span::styled(" Chat ", tp::title_focused()))
                    .borders(Borders::ALL)
                    .border_style(self.focused_border_style)
                    .border_type(BorderType::Thick),
            ),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(Span::styled(
                " Sending messages is not available yet.",
                Style::default().fg(tp::MUTED),
            ))
            .block(
                Block::default()
                    .title(Span::styled(" Send ", tp::title_unfocused()))
                    .borders(Borders::ALL),
            ),
            chunks[1],
        );
        Ok(())
    }
}
