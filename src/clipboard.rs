//! Clipboard access.

use crate::error_handling::ClipboardError;

/// Destination for copied field values.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard, via `arboard`.
///
/// On Linux the copied text only survives as long as this process (or a
/// clipboard manager) owns the selection.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    /// Connects to the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::Unavailable`] on headless systems.
    pub fn open() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(SystemClipboard { inner })
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
