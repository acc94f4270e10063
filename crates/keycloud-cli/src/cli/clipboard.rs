//! System clipboard access for `keycloud copy`.

use arboard::Clipboard;
use keycloud_core::core::clipboard::{ClipboardError, ClipboardSink};

/// Writes to the desktop clipboard through `arboard`.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new()
            .map_err(|e| ClipboardError(format!("Failed to access clipboard: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError(format!("Failed to copy: {}", e)))
    }
}
