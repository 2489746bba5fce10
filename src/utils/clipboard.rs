//! Clipboard access for the output panel.

use arboard::Clipboard;
use tracing::{debug, warn};

/// Place converted output on the system clipboard.
///
/// A fresh `Clipboard` is opened per call; holding one open across frames
/// blocks other applications on some platforms.
pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match &result {
        Ok(()) => debug!("copied {} characters to clipboard", text.chars().count()),
        Err(e) => warn!("clipboard write failed: {}", e),
    }
    result
}
