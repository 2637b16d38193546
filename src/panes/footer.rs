use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::{
    layout::{Constraint, Rect},
    prelude::*,
};

use crate::action::Action;
use crate::controller::View;
use crate::panes::{InputMode, Pane, PaneState};
use crate::theme::tui_palette as tp;
use crate::tui::Frame;

/// Bottom bar: an expiring status message above the key hints.
#[derive(Default)]
pub struct FooterPane {
    status: Option<String>,
    expires_at: Option<Instant>,
}

impl FooterPane {
    pub fn new() -> Self {
        Self::default()
    }

    fn hints(state: &PaneState<'_>) -> &'static str {
        match (state.input_mode, state.controller.view()) {
            (InputMode::Input, _) => "[Enter/Esc → done editing]",
            (InputMode::Normal, View::Chat) => "[F1 chat] [F2 config] [q quit]",
            (InputMode::Normal, View::Config) => {
                "[Tab/↑↓ field] [←→ choose] [Enter select] [F1 chat] [q quit]"
            }
        }
    }
}

impl Pane for FooterPane {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(2)
    }

    fn update(&mut self, action: Action, _state: &PaneState<'_>) -> Result<Option<Action>> {
        match action {
            Action::TimedStatusLine(text, secs) => {
                self.status = Some(text);
                self.expires_at = Some(Instant::now() + Duration::from_secs(secs));
            }
            Action::Tick => {
                if self.expires_at.is_some_and(|at| Instant::now() >= at) {
                    self.status = None;
                    self.expires_at = None;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()> {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        if let Some(status) = &self.status {
            frame.render_widget(
                Line::from(Span::styled(status.as_str(), Style::default().fg(tp::ACCENT_BRIGHT))),
                rows[0],
            );
        }
        frame.render_widget(
            Line::from(Span::styled(Self::hints(state), Style::default().fg(tp::MUTED))),
            rows[1],
        );
        Ok(())
    }
}
