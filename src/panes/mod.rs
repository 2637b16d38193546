use anyhow::Result;
use ratatui::layout::{Constraint, Rect};

use crate::action::Action;
use crate::app::ChatSession;
use crate::controller::Controller;
use crate::tui::Frame;

pub mod footer;
pub mod header;
pub mod nav;

/// Whether key presses go to a text field or to the global bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Input,
}

/// Read-only view of application state handed to panes and pages.
pub struct PaneState<'a> {
    pub controller: &'a Controller,
    pub input_mode: InputMode,
    pub session: Option<&'a ChatSession>,
}

pub trait Pane {
    fn height_constraint(&self) -> Constraint {
        Constraint::Fill(1)
    }

    fn update(&mut self, _action: Action, _state: &PaneState<'_>) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()>;
}
