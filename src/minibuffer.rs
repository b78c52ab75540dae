//! Minibuffer: a transient single-line prompt with a protected prefix.
//!
//! While engaged it substitutes itself as the document's active line, so
//! the ordinary editing and movement operations work on it unchanged;
//! anything that would cross a line boundary is suppressed by those
//! operations. Committing hands the entered text (prefix excluded) back
//! to the dispatcher together with the prompt kind; cancelling restores
//! the saved position without invoking anything.

use crate::document::Viewport;
use crate::line::Line;

/// Maximum number of characters a prompt accepts past its margin.
/// Exceeding it makes commit fail with a recoverable error.
pub const MAX_PROMPT_LEN: usize = 256;

/// What a committed prompt should do. This is the callback id the
/// dispatcher resolves when the minibuffer commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Jump to a line number.
    GotoLine,
    /// Save the document under the entered path.
    SaveAs,
    /// Search hook. Not implemented; committing reports so.
    Search,
}

/// Normal-mode position snapshot taken at activation and restored on
/// commit or cancel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SavedPosition {
    pub(crate) current: usize,
    pub(crate) cursor: usize,
    pub(crate) viewport: Viewport,
}

/// An engaged prompt: the transient line plus the saved position.
#[derive(Debug)]
pub struct Minibuffer {
    line: Line,
    kind: PromptKind,
    saved: SavedPosition,
}

impl Minibuffer {
    pub(crate) fn new(line: Line, kind: PromptKind, saved: SavedPosition) -> Self {
        Self { line, kind, saved }
    }

    /// The transient line; its margin protects the prompt prefix.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    pub(crate) fn line_mut(&mut self) -> &mut Line {
        &mut self.line
    }

    /// Which prompt this is.
    #[must_use]
    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    /// The entered text, prefix excluded.
    #[must_use]
    pub fn text(&self) -> String {
        self.line.chars()[self.line.margin()..].iter().collect()
    }

    /// Number of characters entered past the margin.
    #[must_use]
    pub fn entered_len(&self) -> usize {
        self.line.len() - self.line.margin()
    }

    pub(crate) fn saved(&self) -> SavedPosition {
        self.saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn engaged(prefix: &str) -> Result<Minibuffer> {
        let line = Line::with_prompt(prefix)?;
        Ok(Minibuffer::new(
            line,
            PromptKind::GotoLine,
            SavedPosition {
                current: 0,
                cursor: 0,
                viewport: Viewport::default(),
            },
        ))
    }

    #[test]
    fn test_text_excludes_prefix() {
        let mut mb = engaged("Goto line: ").unwrap();
        for c in "42".chars() {
            let at = mb.line().len();
            mb.line_mut().insert(at, c).unwrap();
        }
        assert_eq!(mb.text(), "42");
        assert_eq!(mb.entered_len(), 2);
    }

    #[test]
    fn test_fresh_prompt_is_empty() {
        let mb = engaged("Search: ").unwrap();
        assert_eq!(mb.text(), "");
        assert_eq!(mb.entered_len(), 0);
    }
}
