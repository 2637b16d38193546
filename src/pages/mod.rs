use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::action::Action;
use crate::panes::PaneState;
use crate::tui::{Event, EventResponse, Frame};

pub mod chat;
pub mod config;

/// A full-screen view shown in the content area.
pub trait Page {
    fn init(&mut self, _state: &PaneState<'_>) -> Result<()> {
        Ok(())
    }

    /// Called each time the page becomes the visible one.
    fn focus(&mut self, _state: &PaneState<'_>) -> Result<()> {
        Ok(())
    }

    fn handle_events(
        &mut self,
        event: Event,
        state: &PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        match event {
            Event::Key(key) => self.handle_key_events(key, state),
            Event::Paste(text) => self.handle_paste(&text, state),
            _ => Ok(None),
        }
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _state: &PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_paste(
        &mut self,
        _text: &str,
        _state: &PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn update(&mut self, _action: Action, _state: &PaneState<'_>) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()>;
}
