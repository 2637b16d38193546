use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_input::{Input, InputRequest, StateChanged};

use crate::action::Action;
use crate::pages::Page;
use crate::panes::PaneState;
use crate::theme::tui_palette as tp;
use crate::tui::{EventResponse, Frame};

/// Width of the label column; values start right after it.
const LABEL_WIDTH: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Platform,
    ApiKey,
    Model,
    Copy,
    Confirm,
    Cancel,
    Start,
}

const FIELDS: [FormField; 7] = [
    FormField::Platform,
    FormField::ApiKey,
    FormField::Model,
    FormField::Copy,
    FormField::Confirm,
    FormField::Cancel,
    FormField::Start,
];

const BUTTONS: [(FormField, &str); 4] = [
    (FormField::Copy, "Copy"),
    (FormField::Confirm, "Confirm"),
    (FormField::Cancel, "Cancel"),
    (FormField::Start, "Start"),
];

/// The config form: platform and model choosers, the masked API-key field,
/// and the action buttons.
pub struct ConfigPage {
    focused_border_style: Style,
    focused_field: usize,
    api_key: Input,
    editing: bool,
}

impl ConfigPage {
    pub fn new(focused_border_style: Style) -> Self {
        Self {
            focused_border_style,
            focused_field: 0,
            api_key: Input::default(),
            editing: false,
        }
    }

    fn field(&self) -> FormField {
        FIELDS[self.focused_field]
    }

    fn is_button(field: FormField) -> bool {
        BUTTONS.iter().any(|(f, _)| *f == field)
    }

    /// Keys while the API-key field captures text.
    fn edit_key(&mut self, key: KeyEvent) -> Action {
        let request = match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing = false;
                return Action::ExitInput;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputRequest::DeleteLine
            }
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Noop;
            }
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return Action::Noop,
        };
        match self.api_key.handle(request) {
            Some(StateChanged { value: true, .. }) => {
                Action::EditApiKey(self.api_key.value().to_string())
            }
            _ => Action::Noop,
        }
    }

    fn label_style(&self, field: FormField) -> Style {
        if self.field() == field {
            tp::title_focused()
        } else {
            Style::default().fg(tp::TEXT_DIM)
        }
    }

    fn chooser_line(
        &self,
        field: FormField,
        label: &str,
        value: &str,
        empty: &str,
    ) -> Line<'static> {
        let value = if value.is_empty() {
            Span::styled(empty.to_string(), Style::default().fg(tp::MUTED))
        } else {
            Span::styled(value.to_string(), Style::default().fg(tp::TEXT))
        };
        let arrow = if self.field() == field {
            Style::default().fg(tp::ACCENT)
        } else {
            Style::default().fg(tp::MUTED)
        };
        Line::from(vec![
            Span::styled(
                format!(" {label:<width$}", width = LABEL_WIDTH as usize - 1),
                self.label_style(field),
            ),
            Span::styled("◀ ", arrow),
            value,
            Span::styled(" ▶", arrow),
        ])
    }
}

impl Page for ConfigPage {
    fn focus(&mut self, state: &PaneState<'_>) -> Result<()> {
        self.api_key = Input::new(state.controller.form().values.api_key.clone());
        self.editing = false;
        self.focused_field = 0;
        Ok(())
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        if self.editing {
            return Ok(Some(EventResponse::Stop(self.edit_key(key))));
        }

        let field = self.field();
        let action = match key.code {
            KeyCode::Tab | KeyCode::Down => Action::FocusNext,
            KeyCode::BackTab | KeyCode::Up => Action::FocusPrev,
            KeyCode::Left => match field {
                FormField::Platform => Action::PrevPlatform,
                FormField::Model => Action::PrevModel,
                f if Self::is_button(f) => Action::FocusPrev,
                _ => return Ok(None),
            },
            KeyCode::Right => match field {
                FormField::Platform => Action::NextPlatform,
                FormField::Model => Action::NextModel,
                f if Self::is_button(f) => Action::FocusNext,
                _ => return Ok(None),
            },
            KeyCode::Enter => match field {
                FormField::Platform => Action::NextPlatform,
                FormField::ApiKey => {
                    self.editing = true;
                    Action::EnterInput
                }
                FormField::Model => Action::NextModel,
                FormField::Copy => Action::CopyApiKey,
                FormField::Confirm => Action::Confirm,
                FormField::Cancel => Action::Quit,
                FormField::Start => Action::Start,
            },
            _ => return Ok(None),
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn handle_paste(
        &mut self,
        text: &str,
        _state: &PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        if !self.editing {
            return Ok(None);
        }
        for c in text.chars().filter(|c| !c.is_control()) {
            self.api_key.handle(InputRequest::InsertChar(c));
        }
        Ok(Some(EventResponse::Stop(Action::EditApiKey(
            self.api_key.value().to_string(),
        ))))
    }

    fn update(&mut self, action: Action, _state: &PaneState<'_>) -> Result<Option<Action>> {
        match action {
            Action::FocusNext => {
                self.focused_field = (self.focused_field + 1) % FIELDS.len();
            }
            Action::FocusPrev => {
                self.focused_field = self
                    .focused_field
                    .checked_sub(1)
                    .unwrap_or(FIELDS.len() - 1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()> {
        let form = state.controller.form();

        let block = Block::default()
            .title(Span::styled(" Config ", tp::title_focused()))
            .borders(Borders::ALL)
            .border_style(self.focused_border_style)
            .border_type(BorderType::Thick);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let masked = "•".repeat(self.api_key.value().chars().count());
        let key_style = if self.editing {
            Style::default().fg(tp::ACCENT_BRIGHT)
        } else {
            Style::default().fg(tp::TEXT)
        };
        let key_value = if masked.is_empty() && !self.editing {
            Span::styled("(empty, press Enter to edit)", Style::default().fg(tp::MUTED))
        } else {
            Span::styled(masked, key_style)
        };

        let mut buttons: Vec<Span> = vec![Span::raw(" ")];
        for (field, label) in BUTTONS {
            let style = if self.field() == field {
                tp::selected()
            } else {
                Style::default().fg(tp::TEXT)
            };
            buttons.push(Span::styled(format!("[ {label} ]"), style));
            buttons.push(Span::raw(" "));
        }

        let available = if form.models.is_empty() {
            "No models: choose a platform first.".to_string()
        } else {
            format!("Available: {}", form.models.join(", "))
        };

        let lines = vec![
            Line::default(),
            self.chooser_line(FormField::Platform, "Platform", &form.values.platform, "(none)"),
            Line::from(vec![
                Span::styled(
                    format!(" {:<width$}", "API Key", width = LABEL_WIDTH as usize - 1),
                    self.label_style(FormField::ApiKey),
                ),
                key_value,
            ]),
            self.chooser_line(FormField::Model, "Model", &form.values.model, "(none)"),
            Line::from(Span::styled(
                format!(" {:<width$}{available}", "", width = LABEL_WIDTH as usize - 1),
                Style::default().fg(tp::MUTED),
            )),
            Line::default(),
            Line::from(buttons),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        if self.editing {
            // Row 2 of the paragraph is the API-key line.
            let x = inner.x + LABEL_WIDTH + self.api_key.cursor() as u16;
            let y = inner.y + 2;
            if x < inner.right() && y < inner.bottom() {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
        Ok(())
    }
}
