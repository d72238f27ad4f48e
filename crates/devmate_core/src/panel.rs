//! View/edit/copy state for an extracted code block.
//!
//! `Viewing` → `Editing` on [`CodePanel::begin_edit`], back to `Viewing` on
//! [`CodePanel::save`] (commits the draft) or [`CodePanel::cancel_edit`].
//! Copy always reads the committed text.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::extract::{CodeBlock, Extracted};

/// How long the "copied" indicator stays on after a copy.
pub const COPIED_INDICATOR_DURATION: Duration = Duration::from_secs(2);

/// Where copied code goes. The CLI backs this with the system clipboard.
pub trait Clipboard {
    fn set_contents(&mut self, text: String) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelMode {
    Viewing,
    Editing { draft: String },
}

#[derive(Debug, Clone)]
pub struct CodePanel {
    block: CodeBlock,
    mode: PanelMode,
    copied_at: Option<Instant>,
}

impl CodePanel {
    pub fn new(block: CodeBlock) -> Self {
        Self {
            block,
            mode: PanelMode::Viewing,
            copied_at: None,
        }
    }

    /// A panel for the reply's code, or `None` when there is nothing to copy or edit.
    pub fn from_extracted(extracted: &Extracted) -> Option<Self> {
        extracted.code.clone().map(Self::new)
    }

    pub fn mode(&self) -> &PanelMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, PanelMode::Editing { .. })
    }

    pub fn language(&self) -> Option<&str> {
        self.block.language.as_deref()
    }

    pub fn render_language(&self) -> String {
        self.block.render_language()
    }

    /// Committed code: the original, or the last saved edit.
    pub fn current_code(&self) -> &str {
        &self.block.code
    }

    /// Start editing from the committed text. No-op while already editing.
    pub fn begin_edit(&mut self) {
        if !self.is_editing() {
            self.mode = PanelMode::Editing {
                draft: self.block.code.clone(),
            };
        }
    }

    /// Replace the draft. Ignored outside editing.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        if let PanelMode::Editing { draft } = &mut self.mode {
            *draft = text.into();
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.mode {
            PanelMode::Editing { draft } => Some(draft),
            PanelMode::Viewing => None,
        }
    }

    /// Commit the draft and return to viewing.
    pub fn save(&mut self) {
        if let PanelMode::Editing { draft } = std::mem::replace(&mut self.mode, PanelMode::Viewing)
        {
            self.block.code = draft;
        }
    }

    /// Drop the draft and return to viewing.
    pub fn cancel_edit(&mut self) {
        self.mode = PanelMode::Viewing;
    }

    /// Copy the committed code and turn the indicator on.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> Result<()> {
        clipboard.set_contents(self.block.code.clone())?;
        self.copied_at = Some(now);
        Ok(())
    }

    /// True for [`COPIED_INDICATOR_DURATION`] after the last copy.
    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .map(|at| now.saturating_duration_since(at) < COPIED_INDICATOR_DURATION)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DevmateError;
    use crate::extract::extract;

    #[derive(Debug, Default)]
    pub struct MemoryClipboard {
        pub contents: Option<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn set_contents(&mut self, text: String) -> Result<()> {
            self.contents = Some(text);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    pub struct UnavailableClipboard;

    impl Clipboard for UnavailableClipboard {
        fn set_contents(&mut self, _text: String) -> Result<()> {
            Err(DevmateError::Clipboard("no clipboard available".to_string()))
        }
    }

    fn panel() -> CodePanel {
        CodePanel::from_extracted(&extract("```js\nconsole.log(1)\n```")).unwrap()
    }

    #[test]
    fn test_no_panel_without_code() {
        assert!(CodePanel::from_extracted(&extract("no code here")).is_none());
    }

    #[test]
    fn test_edit_save_then_copy_yields_edited_text() {
        let mut panel = panel();
        let mut clipboard = MemoryClipboard::default();

        panel.begin_edit();
        assert!(panel.is_editing());
        panel.update_draft("console.log(2)");
        assert_eq!(panel.current_code(), "console.log(1)");
        panel.save();

        assert_eq!(panel.mode(), &PanelMode::Viewing);
        assert_eq!(panel.current_code(), "console.log(2)");
        panel.copy(&mut clipboard, Instant::now()).unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("console.log(2)"));
    }

    #[test]
    fn test_copy_while_editing_uses_committed_text() {
        let mut panel = panel();
        let mut clipboard = MemoryClipboard::default();
        panel.begin_edit();
        panel.update_draft("draft only");
        panel.copy(&mut clipboard, Instant::now()).unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("console.log(1)"));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut panel = panel();
        panel.begin_edit();
        panel.update_draft("nope");
        panel.cancel_edit();
        assert_eq!(panel.current_code(), "console.log(1)");
        assert!(panel.draft().is_none());
    }

    #[test]
    fn test_update_draft_ignored_when_viewing() {
        let mut panel = panel();
        panel.update_draft("ignored");
        panel.save();
        assert_eq!(panel.current_code(), "console.log(1)");
    }

    #[test]
    fn test_copied_indicator_reverts_after_two_seconds() {
        let mut panel = panel();
        let mut clipboard = MemoryClipboard::default();
        let t0 = Instant::now();
        assert!(!panel.is_copied(t0));

        panel.copy(&mut clipboard, t0).unwrap();
        assert!(panel.is_copied(t0));
        assert!(panel.is_copied(t0 + Duration::from_millis(1999)));
        assert!(!panel.is_copied(t0 + COPIED_INDICATOR_DURATION));
    }

    #[test]
    fn test_failed_copy_leaves_indicator_off() {
        let mut panel = panel();
        let now = Instant::now();
        let err = panel.copy(&mut UnavailableClipboard, now).unwrap_err();
        assert!(matches!(err, DevmateError::Clipboard(_)));
        assert!(!panel.is_copied(now));
    }
}
