//! System clipboard access.

use tracing::debug;

#[derive(Debug, thiserror::Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(#[from] arboard::Error);

/// Somewhere text can be copied to.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, opened on first use.
///
/// The handle is kept for the life of the process: on X11 and Wayland the
/// copied text is only served while the owning handle exists.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => {
                debug!("Opening system clipboard");
                arboard::Clipboard::new()?
            }
        };
        self.inner.insert(clipboard).set_text(text.to_owned())?;
        Ok(())
    }
}
