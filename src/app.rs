use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use tracing::{info, warn};

use crate::action::Action;
use crate::client::ProviderClient;
use crate::clipboard::Clipboard;
use crate::config::ConfigStore;
use crate::controller::{Controller, Notice, NoticeLevel, View};
use crate::pages::chat::ChatPage;
use crate::pages::config::ConfigPage;
use crate::pages::Page;
use crate::panes::footer::FooterPane;
use crate::panes::header::HeaderPane;
use crate::panes::nav::{NavPane, NAV_WIDTH};
use crate::panes::{InputMode, Pane, PaneState};
use crate::providers;
use crate::theme::tui_palette as tp;
use crate::tui::{Event, EventResponse, Tui};

/// The chat the user started: what was chosen and a client bound to it.
pub struct ChatSession {
    pub platform: String,
    pub model: String,
    pub client: ProviderClient,
}

/// Shared state that is separate from the UI components so we can borrow both
/// independently.
struct SharedState {
    controller: Controller,
    input_mode: InputMode,
    session: Option<ChatSession>,
    /// Blocking notice; all other input waits until it is dismissed.
    notice: Option<Notice>,
}

impl SharedState {
    fn pane_state(&self) -> PaneState<'_> {
        PaneState {
            controller: &self.controller,
            input_mode: self.input_mode,
            session: self.session.as_ref(),
        }
    }
}

/// Index into `App::pages` for each view.
fn page_index(view: View) -> usize {
    match view {
        View::Chat => 0,
        View::Config => 1,
    }
}

pub struct App {
    state: SharedState,
    pages: Vec<Box<dyn Page>>,
    header: HeaderPane,
    nav: NavPane,
    footer: FooterPane,
    should_quit: bool,
}

impl App {
    pub fn new(store: ConfigStore, clipboard: Box<dyn Clipboard>) -> Self {
        let focused_border_style = tp::border_focused();
        let pages: Vec<Box<dyn Page>> = vec![
            Box::new(ChatPage::new(focused_border_style)),
            Box::new(ConfigPage::new(focused_border_style)),
        ];

        Self {
            state: SharedState {
                controller: Controller::new(store, clipboard),
                input_mode: InputMode::Normal,
                session: None,
                notice: None,
            },
            pages,
            header: HeaderPane::new(),
            nav: NavPane::new(),
            footer: FooterPane::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        {
            let ps = self.state.pane_state();
            for page in &mut self.pages {
                page.init(&ps)?;
            }
            self.pages[page_index(self.state.controller.view())].focus(&ps)?;
        }

        while let Some(event) = tui.next().await {
            let mut action = match &event {
                Event::Render | Event::Init => None,
                Event::Tick => Some(Action::Tick),
                Event::Quit => Some(Action::Quit),
                Event::Key(key) => self.handle_key(*key)?,
                Event::Paste(_) if self.state.notice.is_none() => {
                    let ps = self.state.pane_state();
                    let idx = page_index(self.state.controller.view());
                    match self.pages[idx].handle_events(event.clone(), &ps)? {
                        Some(EventResponse::Stop(a)) => Some(a),
                        _ => None,
                    }
                }
                _ => None,
            };

            // Process the action (and any chained follow-up actions)
            while let Some(act) = action {
                action = self.dispatch_action(act)?;
            }

            if matches!(event, Event::Render | Event::Resize(..)) {
                self.draw(&mut tui)?;
            }

            if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    /// Route a key press: the open notice first, then the active page, then
    /// the global bindings.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::Quit));
        }

        if self.state.notice.is_some() {
            return Ok(match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::DismissNotice),
                _ => None,
            });
        }

        let ps = self.state.pane_state();
        let idx = page_index(self.state.controller.view());
        if let Some(EventResponse::Stop(action)) =
            self.pages[idx].handle_events(Event::Key(key), &ps)?
        {
            return Ok(Some(action));
        }

        if self.state.input_mode == InputMode::Input {
            return Ok(None);
        }

        Ok(match key.code {
            KeyCode::F(1) | KeyCode::Char('1') => Some(Action::ShowChat),
            KeyCode::F(2) | KeyCode::Char('2') => Some(Action::ShowConfig),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        })
    }

    /// Dispatch a single action.  Returns an optional follow-up action.
    fn dispatch_action(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick | Action::TimedStatusLine(..) => {
                let ps = self.state.pane_state();
                return self.footer.update(action, &ps);
            }
            Action::FocusNext | Action::FocusPrev => {
                let ps = self.state.pane_state();
                let idx = page_index(self.state.controller.view());
                return self.pages[idx].update(action, &ps);
            }
            Action::ShowChat | Action::Start => return self.navigate(View::Chat),
            Action::ShowConfig => return self.navigate(View::Config),
            Action::EnterInput => self.state.input_mode = InputMode::Input,
            Action::ExitInput => self.state.input_mode = InputMode::Normal,
            Action::NextPlatform => self.state.controller.select_next_platform(),
            Action::PrevPlatform => self.state.controller.select_prev_platform(),
            Action::NextModel => self.state.controller.select_next_model(),
            Action::PrevModel => self.state.controller.select_prev_model(),
            Action::EditApiKey(key) => self.state.controller.set_api_key(key),
            Action::CopyApiKey => {
                return Ok(Some(Action::Notify(self.state.controller.copy_api_key())));
            }
            Action::Confirm => return Ok(Some(Action::Notify(self.state.controller.confirm()))),
            Action::Notify(notice) => self.state.notice = Some(notice),
            Action::DismissNotice => self.state.notice = None,
            Action::Noop => {}
        }
        Ok(None)
    }

    fn navigate(&mut self, target: View) -> Result<Option<Action>> {
        let before = self.state.controller.view();
        let mut notice = self.state.controller.navigate(target);
        let after = self.state.controller.view();
        if before == after {
            return Ok(notice.map(Action::Notify));
        }

        info!(from = %before, to = %after, "Switched view");
        let mut follow_up = None;
        if after == View::Chat {
            match self.open_session() {
                Ok(status) => follow_up = Some(Action::TimedStatusLine(status, 3)),
                Err(err) => notice = Some(err),
            }
        }

        let ps = self.state.pane_state();
        self.pages[page_index(after)].focus(&ps)?;
        Ok(notice.map(Action::Notify).or(follow_up))
    }

    /// Bind a client to the platform and key in the form.
    fn open_session(&mut self) -> Result<String, Notice> {
        let values = &self.state.controller.form().values;
        let Some(base_url) = providers::base_url_for(&values.platform) else {
            self.state.session = None;
            return Err(Notice::error(format!(
                "Unknown platform \"{}\".",
                values.platform
            )));
        };

        match ProviderClient::new(&values.api_key, base_url) {
            Ok(client) => {
                let status = format!("Chat ready: {} / {}", values.platform, values.model);
                self.state.session = Some(ChatSession {
                    platform: values.platform.clone(),
                    model: values.model.clone(),
                    client,
                });
                Ok(status)
            }
            Err(err) => {
                warn!("Failed to build provider client: {err}");
                self.state.session = None;
                Err(Notice::error(format!("Could not set up the {} client: {err}", values.platform)))
            }
        }
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            let area = frame.area();

            // Layout: header (1 row), body (fill), footer (status + hints)
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    self.header.height_constraint(),
                    Constraint::Min(1),
                    self.footer.height_constraint(),
                ])
                .split(area);
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Length(NAV_WIDTH), Constraint::Min(1)])
                .split(rows[1]);

            let ps = self.state.pane_state();
            let idx = page_index(self.state.controller.view());

            let results = [
                self.header.draw(frame, rows[0], &ps),
                self.nav.draw(frame, body[0], &ps),
                self.pages[idx].draw(frame, body[1], &ps),
                self.footer.draw(frame, rows[2], &ps),
            ];
            for err in results.into_iter().filter_map(Result::err) {
                warn!("Draw failed: {err:#}");
            }

            if let Some(notice) = &self.state.notice {
                Self::draw_notice(frame, area, notice);
            }
        })?;
        Ok(())
    }

    /// Draw a centered notice dialog.
    fn draw_notice(frame: &mut ratatui::Frame<'_>, area: Rect, notice: &Notice) {
        use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

        let colour = match notice.level {
            NoticeLevel::Info => tp::SUCCESS,
            NoticeLevel::Warning => tp::WARN,
            NoticeLevel::Error => tp::ERROR,
        };

        let dialog_w = 56.min(area.width.saturating_sub(4));
        let text_w = dialog_w.saturating_sub(4).max(1) as usize;
        let text_h = notice.message.chars().count().div_ceil(text_w) as u16;
        let dialog_h = (text_h + 5).min(area.height.saturating_sub(2)).max(5);
        let x = area.x + (area.width.saturating_sub(dialog_w)) / 2;
        let y = area.y + (area.height.saturating_sub(dialog_h)) / 2;
        let dialog_area = Rect::new(x, y, dialog_w, dialog_h);

        // Clear the background behind the dialog
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", notice.title),
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colour));

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(notice.message.as_str(), Style::default().fg(tp::TEXT))),
            Line::default(),
            Line::from(Span::styled("[Enter] OK", Style::default().fg(tp::MUTED))).alignment(Alignment::Right),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(block),
            dialog_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::config::ModelConfig;
    use tempfile::TempDir;

    struct NoClipboard;

    impl Clipboard for NoClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    fn app(dir: &TempDir) -> App {
        App::new(
            ConfigStore::new(dir.path().join("config.ini")),
            Box::new(NoClipboard),
        )
    }

    /// Dispatch an action and everything it chains to.
    fn run(app: &mut App, action: Action) {
        let mut next = Some(action);
        while let Some(act) = next {
            next = app.dispatch_action(act).unwrap();
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_start_with_empty_form_shows_warning() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::ShowConfig);
        run(&mut app, Action::Start);

        let notice = app.state.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(app.state.controller.view(), View::Config);
        assert!(app.state.session.is_none());
    }

    #[test]
    fn test_start_opens_session() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::ShowConfig);
        run(&mut app, Action::NextPlatform);
        run(&mut app, Action::EditApiKey("sk-1".into()));
        run(&mut app, Action::Start);

        assert!(app.state.notice.is_none());
        assert_eq!(app.state.controller.view(), View::Chat);
        let session = app.state.session.as_ref().unwrap();
        assert_eq!(session.platform, "DeepSeek");
        assert_eq!(session.model, "deepseek-model-1");
        assert_eq!(session.client.base_url().host_str(), Some("api.deepseek.com"));
    }

    #[test]
    fn test_confirm_saves_and_stays() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::ShowConfig);
        run(&mut app, Action::NextPlatform);
        run(&mut app, Action::NextPlatform);
        run(&mut app, Action::EditApiKey("zk".into()));
        run(&mut app, Action::Confirm);

        assert_eq!(app.state.notice.as_ref().unwrap().level, NoticeLevel::Info);
        assert_eq!(app.state.controller.view(), View::Config);
        assert_eq!(
            app.state.controller.store().load().unwrap(),
            Some(ModelConfig::new("ZhiPuAI", "zk", "zhipuai-model-1"))
        );

        run(&mut app, Action::DismissNotice);
        assert!(app.state.notice.is_none());
    }

    #[test]
    fn test_notice_blocks_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::CopyApiKey);
        assert_eq!(app.state.notice.as_ref().unwrap().level, NoticeLevel::Warning);

        assert_eq!(app.handle_key(key(KeyCode::Char('q'))).unwrap(), None);
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)).unwrap(),
            Some(Action::DismissNotice)
        );
    }

    #[test]
    fn test_global_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert_eq!(app.handle_key(key(KeyCode::F(2))).unwrap(), Some(Action::ShowConfig));
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))).unwrap(), Some(Action::Quit));
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_typing_in_key_field_bypasses_global_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::ShowConfig);

        // Platform -> API key, then start editing.
        let a = app.handle_key(key(KeyCode::Tab)).unwrap().unwrap();
        run(&mut app, a);
        let a = app.handle_key(key(KeyCode::Enter)).unwrap().unwrap();
        run(&mut app, a);
        assert_eq!(app.state.input_mode, InputMode::Input);

        let a = app.handle_key(key(KeyCode::Char('q'))).unwrap().unwrap();
        run(&mut app, a);
        assert!(!app.should_quit);
        assert_eq!(app.state.controller.form().values.api_key, "q");

        let a = app.handle_key(key(KeyCode::Esc)).unwrap().unwrap();
        run(&mut app, a);
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }
}
