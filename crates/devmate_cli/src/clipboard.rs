use devmate_core::{Clipboard, DevmateError};

/// The desktop clipboard.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_contents(&mut self, text: String) -> devmate_core::Result<()> {
        cli_clipboard::set_contents(text).map_err(|e| DevmateError::Clipboard(e.to_string()))
    }
}
