use serde::{Deserialize, Serialize};
use strum::Display;

use crate::controller::Notice;

/// Actions that drive the application, inspired by openapi-tui.
#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Quit,
    /// Move focus to the next / previous form field
    FocusNext,
    FocusPrev,
    /// Status message and the seconds it stays visible
    TimedStatusLine(String, u64),
    /// Navigate to the chat view (gated on a complete form)
    ShowChat,
    /// Navigate to the config view, restoring the saved record
    ShowConfig,
    /// The focused form field started capturing text input
    EnterInput,
    /// Text input ended; global key bindings apply again
    ExitInput,
    /// Select the next / previous platform in the catalogue
    NextPlatform,
    PrevPlatform,
    /// Select the next / previous model offered for the platform
    NextModel,
    PrevModel,
    /// The API-key field now holds this text
    EditApiKey(String),
    /// Copy the (possibly unsaved) API key to the clipboard
    CopyApiKey,
    /// Save the form without leaving the config view
    Confirm,
    /// Validate the form and enter the chat view
    Start,
    /// Show a blocking notice
    Notify(Notice),
    /// Close the notice currently shown
    DismissNotice,
    Noop,
}
