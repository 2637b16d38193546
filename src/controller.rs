//! View navigation and form handling, independent of any terminal toolkit.
//!
//! [`Controller`] owns the two views, the config form, the [`ConfigStore`]
//! and a [`Clipboard`].  Every user-facing operation is a method that either
//! succeeds silently or returns a [`Notice`] for the front end to show as a
//! blocking message.

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, error, warn};

use crate::clipboard::Clipboard;
use crate::config::{ConfigStore, ModelConfig};
use crate::providers::{self, PROVIDERS};
use crate::validation::{self, START_RULES};

/// The two mutually exclusive screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum View {
    #[default]
    Chat,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: "Success".into(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: "Warning".into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".into(),
            message: message.into(),
        }
    }
}

/// The config form: the values being edited plus the models offered for the
/// selected platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigForm {
    pub values: ModelConfig,
    pub models: Vec<String>,
}

pub struct Controller {
    store: ConfigStore,
    clipboard: Box<dyn Clipboard>,
    view: View,
    form: ConfigForm,
}

impl Controller {
    pub fn new(store: ConfigStore, clipboard: Box<dyn Clipboard>) -> Self {
        let mut controller = Self {
            store,
            clipboard,
            view: View::Chat,
            form: ConfigForm::default(),
        };
        controller.refresh_models();
        controller
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn form(&self) -> &ConfigForm {
        &self.form
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    /// Switch to `target`.  Selecting the active view does nothing; entering
    /// chat from config goes through [`Controller::start`].
    pub fn navigate(&mut self, target: View) -> Option<Notice> {
        match (self.view, target) {
            (View::Chat, View::Chat) | (View::Config, View::Config) => None,
            (View::Config, View::Chat) => self.start(),
            (View::Chat, View::Config) => self.show_config(),
        }
    }

    /// Enter the config view and fill the form from the saved record.
    fn show_config(&mut self) -> Option<Notice> {
        self.view = View::Config;
        debug!("Showing config view");

        match self.store.load() {
            Ok(Some(saved)) => {
                self.restore(saved);
                None
            }
            Ok(None) => None,
            Err(err) => {
                error!("Failed to load config: {err}");
                self.form.values = ModelConfig::default();
                self.refresh_models();
                Some(Notice::error(format!("Could not load the saved configuration: {err}")))
            }
        }
    }

    fn restore(&mut self, saved: ModelConfig) {
        self.form.values.platform = saved.platform;
        self.form.values.api_key = saved.api_key;
        self.refresh_models();
        // The saved model survives only if the platform still offers it.
        if self.form.models.contains(&saved.model) {
            self.form.values.model = saved.model;
        }
    }

    /// Check the form and, if complete, enter the chat view.  Nothing is
    /// saved.
    pub fn start(&mut self) -> Option<Notice> {
        if let Err(err) = validation::validate(&self.form.values, START_RULES) {
            warn!(field = %err.field, "Start rejected");
            return Some(Notice::warning(err.message));
        }
        self.view = View::Chat;
        debug!(platform = %self.form.values.platform, model = %self.form.values.model, "Entering chat view");
        None
    }

    /// Save the form.  The view does not change.
    pub fn confirm(&mut self) -> Notice {
        match self.store.save(&self.form.values) {
            Ok(()) => Notice::info("Configuration saved."),
            Err(err) => {
                error!("Failed to save config: {err}");
                Notice::error(format!("Could not save the configuration: {err}"))
            }
        }
    }

    /// Put the unsaved API key on the clipboard.
    pub fn copy_api_key(&mut self) -> Notice {
        let key = &self.form.values.api_key;
        if key.is_empty() {
            warn!("Nothing to copy: API key is empty");
            return Notice::warning("The API key is empty; nothing to copy.");
        }
        match self.clipboard.set_text(key) {
            Ok(()) => Notice::info("API key copied to the clipboard."),
            Err(err) => {
                warn!("Clipboard copy failed: {err}");
                Notice::error(format!("Could not copy the API key: {err}"))
            }
        }
    }

    // ── Form editing ────────────────────────────────────────────────────────

    /// Select a platform.  When the value changes the model list is rebuilt
    /// and the model reset to the first entry, or cleared.
    pub fn select_platform(&mut self, platform: &str) {
        if self.form.values.platform == platform {
            return;
        }
        self.form.values.platform = platform.to_string();
        self.refresh_models();
    }

    pub fn select_next_platform(&mut self) {
        self.step_platform(1);
    }

    pub fn select_prev_platform(&mut self) {
        self.step_platform(PROVIDERS.len() - 1);
    }

    fn step_platform(&mut self, step: usize) {
        let names = providers::platform_names();
        let next = match names.iter().position(|n| *n == self.form.values.platform) {
            Some(i) => names[(i + step) % names.len()],
            // Nothing (or something unknown) selected: start at the first.
            None => names[0],
        };
        self.select_platform(next);
    }

    /// Select a model offered for the current platform.  Returns `false` and
    /// leaves the form alone for anything else.
    pub fn select_model(&mut self, model: &str) -> bool {
        if !self.form.models.iter().any(|m| m == model) {
            return false;
        }
        self.form.values.model = model.to_string();
        true
    }

    pub fn select_next_model(&mut self) {
        self.step_model(1);
    }

    pub fn select_prev_model(&mut self) {
        let len = self.form.models.len();
        if len > 0 {
            self.step_model(len - 1);
        }
    }

    fn step_model(&mut self, step: usize) {
        let models = &self.form.models;
        if models.is_empty() {
            return;
        }
        let next = match models.iter().position(|m| *m == self.form.values.model) {
            Some(i) => (i + step) % models.len(),
            None => 0,
        };
        self.form.values.model = models[next].clone();
    }

    /// Replace the unsaved key.  Surrounding whitespace is dropped, as it
    /// would be on the next load.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        let api_key = api_key.into();
        self.form.values.api_key = api_key.trim().to_string();
    }

    fn refresh_models(&mut self) {
        let models = providers::models_for(&self.form.values.platform);
        self.form.models = models.iter().map(|m| (*m).to_string()).collect();
        self.form.values.model = self.form.models.first().cloned().unwrap_or_default();
        debug!(
            platform = %self.form.values.platform,
            count = self.form.models.len(),
            "Refreshed model list"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Records every copy; `None` means nothing was ever copied.
    #[derive(Clone, Default)]
    struct FakeClipboard(Rc<RefCell<Option<String>>>);

    impl Clipboard for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            *self.0.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(arboard::Error::ClipboardNotSupported.into())
        }
    }

    fn controller(dir: &TempDir) -> (Controller, FakeClipboard) {
        let clipboard = FakeClipboard::default();
        let store = ConfigStore::new(dir.path().join("config.ini"));
        (Controller::new(store, Box::new(clipboard.clone())), clipboard)
    }

    fn fill(c: &mut Controller, platform: &str, key: &str, model: &str) {
        c.select_platform(platform);
        c.set_api_key(key);
        assert!(c.select_model(model));
    }

    #[test]
    fn test_initial_state() {
        let dir = TempDir::new().unwrap();
        let (c, _) = controller(&dir);
        assert_eq!(c.view(), View::Chat);
        assert_eq!(c.form().values, ModelConfig::default());
        assert!(c.form().models.is_empty());
    }

    #[test]
    fn test_platform_change_resets_model() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);

        c.select_platform("DeepSeek");
        assert_eq!(c.form().values.model, "deepseek-model-1");
        assert!(c.select_model("deepseek-model-2"));

        c.select_platform("OpenAI");
        assert_eq!(c.form().models, vec!["gpt-3.5-turbo", "gpt-4"]);
        assert_eq!(c.form().values.model, "gpt-3.5-turbo");

        c.select_platform("Unknown");
        assert!(c.form().models.is_empty());
        assert_eq!(c.form().values.model, "");
    }

    #[test]
    fn test_reselecting_same_platform_keeps_model() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        c.select_platform("ZhiPuAI");
        assert!(c.select_model("zhipuai-model-2"));
        c.select_platform("ZhiPuAI");
        assert_eq!(c.form().values.model, "zhipuai-model-2");
    }

    #[test]
    fn test_select_model_outside_catalogue() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        c.select_platform("DeepSeek");
        assert!(!c.select_model("gpt-4"));
        assert_eq!(c.form().values.model, "deepseek-model-1");
    }

    #[test]
    fn test_platform_cycling() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        c.select_next_platform();
        assert_eq!(c.form().values.platform, "DeepSeek");
        c.select_next_platform();
        assert_eq!(c.form().values.platform, "ZhiPuAI");
        c.select_prev_platform();
        c.select_prev_platform();
        assert_eq!(c.form().values.platform, "OpenAI");
        assert_eq!(c.form().values.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_model_cycling() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        c.select_next_model();
        assert_eq!(c.form().values.model, "");

        c.select_platform("OpenAI");
        c.select_next_model();
        assert_eq!(c.form().values.model, "gpt-4");
        c.select_next_model();
        assert_eq!(c.form().values.model, "gpt-3.5-turbo");
        c.select_prev_model();
        assert_eq!(c.form().values.model, "gpt-4");
    }

    #[test]
    fn test_start_with_empty_form_warns_about_platform() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        assert_eq!(c.navigate(View::Config), None);

        let notice = c.start().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Please select a model platform.");
        assert_eq!(c.view(), View::Config);
        assert!(!c.store().path().exists());
    }

    #[test]
    fn test_start_missing_key() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        c.navigate(View::Config);
        c.select_platform("DeepSeek");

        let notice = c.start().unwrap();
        assert_eq!(notice.message, "Please enter an API key.");
        assert_eq!(c.view(), View::Config);
    }

    #[test]
    fn test_start_success_enters_chat_without_saving() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        c.navigate(View::Config);
        fill(&mut c, "DeepSeek", "x", "deepseek-model-1");

        assert_eq!(c.start(), None);
        assert_eq!(c.view(), View::Chat);
        assert!(!c.store().path().exists());
    }

    #[test]
    fn test_chat_nav_from_config_is_gated() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        c.navigate(View::Config);

        assert!(c.navigate(View::Chat).is_some());
        assert_eq!(c.view(), View::Config);

        fill(&mut c, "OpenAI", "k", "gpt-4");
        assert_eq!(c.navigate(View::Chat), None);
        assert_eq!(c.view(), View::Chat);
    }

    #[test]
    fn test_reselecting_active_view_is_noop() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        assert_eq!(c.navigate(View::Chat), None);
        assert_eq!(c.view(), View::Chat);

        c.navigate(View::Config);
        c.set_api_key("unsaved");
        assert_eq!(c.navigate(View::Config), None);
        // Not reloaded from disk.
        assert_eq!(c.form().values.api_key, "unsaved");
    }

    #[test]
    fn test_confirm_twice_same_file_same_view() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        c.navigate(View::Config);
        fill(&mut c, "ZhiPuAI", "secret", "zhipuai-model-2");

        assert_eq!(c.confirm().level, NoticeLevel::Info);
        let first = fs::read(c.store().path()).unwrap();
        assert_eq!(c.view(), View::Config);

        assert_eq!(c.confirm().level, NoticeLevel::Info);
        let second = fs::read(c.store().path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(c.view(), View::Config);
    }

    #[test]
    fn test_confirm_failure_keeps_form() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let store = ConfigStore::new(blocker.join("config.ini"));
        let mut c = Controller::new(store, Box::new(FakeClipboard::default()));
        c.navigate(View::Config);
        fill(&mut c, "OpenAI", "k", "gpt-4");

        let notice = c.confirm();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(c.form().values, ModelConfig::new("OpenAI", "k", "gpt-4"));
        assert_eq!(c.view(), View::Config);
    }

    #[test]
    fn test_show_config_restores_saved_record() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.ini"));
        store
            .save(&ModelConfig::new("DeepSeek", "sk-1", "deepseek-model-2"))
            .unwrap();

        let (mut c, _) = controller(&dir);
        assert_eq!(c.navigate(View::Config), None);
        assert_eq!(
            c.form().values,
            ModelConfig::new("DeepSeek", "sk-1", "deepseek-model-2")
        );
        assert_eq!(c.form().models, vec!["deepseek-model-1", "deepseek-model-2"]);
    }

    #[test]
    fn test_show_config_replaces_unknown_model() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.ini"));
        store
            .save(&ModelConfig::new("OpenAI", "sk-1", "gpt-2"))
            .unwrap();

        let (mut c, _) = controller(&dir);
        c.navigate(View::Config);
        assert_eq!(c.form().values.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_show_config_without_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        assert_eq!(c.navigate(View::Config), None);
        assert_eq!(c.view(), View::Config);
        assert_eq!(c.form().values, ModelConfig::default());
    }

    #[test]
    fn test_show_config_reports_unreadable_file() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read.
        fs::create_dir(dir.path().join("config.ini")).unwrap();

        let (mut c, _) = controller(&dir);
        c.set_api_key("stale");
        let notice = c.navigate(View::Config).unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(c.view(), View::Config);
        assert_eq!(c.form().values, ModelConfig::default());
    }

    #[test]
    fn test_copy_empty_key_leaves_clipboard_alone() {
        let dir = TempDir::new().unwrap();
        let (mut c, clipboard) = controller(&dir);

        let notice = c.copy_api_key();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(*clipboard.0.borrow(), None);
    }

    #[test]
    fn test_copy_places_unsaved_key() {
        let dir = TempDir::new().unwrap();
        let (mut c, clipboard) = controller(&dir);
        c.set_api_key("abc");

        let notice = c.copy_api_key();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(clipboard.0.borrow().as_deref(), Some("abc"));
        assert!(!c.store().path().exists());
    }

    #[test]
    fn test_copy_failure_is_an_error_notice() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.ini"));
        let mut c = Controller::new(store, Box::new(BrokenClipboard));
        c.set_api_key("abc");

        let notice = c.copy_api_key();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(c.form().values.api_key, "abc");
    }

    #[test]
    fn test_api_key_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let (mut c, _) = controller(&dir);
        fill(&mut c, "DeepSeek", "  padded  ", "deepseek-model-1");
        assert_eq!(c.form().values.api_key, "padded");

        c.confirm();
        assert_eq!(c.store().load().unwrap().unwrap().api_key, "padded");
    }
}
