//! Key bindings: an explicit mapping from key events to commands.
//!
//! The only state is the `C-x` prefix. The Alt modifier arrives already
//! folded into the key event by the input parser, so no arithmetic on
//! key codes is needed anywhere — every binding is one `match` arm.

use crate::input::{KeyCode, KeyEvent, KeyModifiers};

/// The operation a key event resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Insert(char),
    InsertTab,
    Newline,
    DeleteBackward,
    DeleteForward,
    KillToEnd,
    KillToBeginning,
    Yank,
    ForwardChar,
    BackwardChar,
    ForwardWord,
    BackwardWord,
    LineStart,
    LineEnd,
    NextLine,
    PreviousLine,
    PageDown,
    PageUp,
    DocumentStart,
    DocumentEnd,
    Recenter,
    Save,
    Quit,
    ShowPosition,
    PromptGotoLine,
    PromptSaveAs,
    PromptSearch,
    /// Commit the engaged prompt. Synthesized by the dispatcher from
    /// `Newline` while the minibuffer is engaged; never produced by a
    /// binding directly.
    Commit,
    /// Cancel the engaged prompt (or do nothing).
    Cancel,
    /// `C-x` was pressed; the next key completes the binding.
    Prefix,
    /// A key with no binding; reported to the user.
    Unbound,
    /// Input that is deliberately ignored.
    Nothing,
}

/// Resolves key events to commands, tracking the `C-x` prefix.
#[derive(Clone, Debug, Default)]
pub struct Keymap {
    prefix_pending: bool,
}

impl Keymap {
    /// Create a keymap with no pending prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the previous key was the `C-x` prefix.
    #[must_use]
    pub fn prefix_pending(&self) -> bool {
        self.prefix_pending
    }

    /// Resolve one key event.
    pub fn resolve(&mut self, key: KeyEvent) -> Command {
        if self.prefix_pending {
            self.prefix_pending = false;
            return Self::resolve_prefixed(key);
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return Self::resolve_meta(key);
        }
        if key.modifiers.contains(KeyModifiers::CTRL) {
            return self.resolve_control(key);
        }
        match key.code {
            KeyCode::Char(c) => Command::Insert(c),
            KeyCode::Enter => Command::Newline,
            KeyCode::Tab => Command::InsertTab,
            KeyCode::Backspace => Command::DeleteBackward,
            KeyCode::Delete => Command::DeleteForward,
            KeyCode::Left => Command::BackwardChar,
            KeyCode::Right => Command::ForwardChar,
            KeyCode::Up => Command::PreviousLine,
            KeyCode::Down => Command::NextLine,
            KeyCode::Home => Command::LineStart,
            KeyCode::End => Command::LineEnd,
            KeyCode::PageUp => Command::PageUp,
            KeyCode::PageDown => Command::PageDown,
            KeyCode::Esc => Command::Nothing,
        }
    }

    fn resolve_control(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Char('a') => Command::LineStart,
            KeyCode::Char('e') => Command::LineEnd,
            KeyCode::Char('f') => Command::ForwardChar,
            KeyCode::Char('b') => Command::BackwardChar,
            KeyCode::Char('n') => Command::NextLine,
            KeyCode::Char('p') => Command::PreviousLine,
            KeyCode::Char('d') => Command::DeleteForward,
            KeyCode::Char('v') => Command::PageDown,
            KeyCode::Char('l') => Command::Recenter,
            KeyCode::Char('k') => Command::KillToEnd,
            KeyCode::Char('u') => Command::KillToBeginning,
            KeyCode::Char('y') => Command::Yank,
            KeyCode::Char('s') => Command::PromptSearch,
            KeyCode::Char('g') => Command::Cancel,
            KeyCode::Char('x') => {
                self.prefix_pending = true;
                Command::Prefix
            }
            _ => Command::Unbound,
        }
    }

    fn resolve_meta(key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Char('f') => Command::ForwardWord,
            KeyCode::Char('b') => Command::BackwardWord,
            KeyCode::Char('v') => Command::PageUp,
            KeyCode::Char('g') => Command::PromptGotoLine,
            KeyCode::Char('<') => Command::DocumentStart,
            KeyCode::Char('>') => Command::DocumentEnd,
            _ => Command::Unbound,
        }
    }

    fn resolve_prefixed(key: KeyEvent) -> Command {
        let ctrl = key.modifiers.contains(KeyModifiers::CTRL);
        match key.code {
            KeyCode::Char('s') if ctrl => Command::Save,
            KeyCode::Char('c') if ctrl => Command::Quit,
            KeyCode::Char('w') if ctrl => Command::PromptSaveAs,
            KeyCode::Char('=') if !ctrl => Command::ShowPosition,
            _ => Command::Unbound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keys() {
        let mut km = Keymap::new();
        assert_eq!(km.resolve(KeyEvent::char('a')), Command::Insert('a'));
        assert_eq!(km.resolve(KeyEvent::key(KeyCode::Enter)), Command::Newline);
        assert_eq!(
            km.resolve(KeyEvent::key(KeyCode::Backspace)),
            Command::DeleteBackward
        );
        assert_eq!(
            km.resolve(KeyEvent::key(KeyCode::Left)),
            Command::BackwardChar
        );
    }

    #[test]
    fn test_control_bindings() {
        let mut km = Keymap::new();
        assert_eq!(km.resolve(KeyEvent::ctrl('a')), Command::LineStart);
        assert_eq!(km.resolve(KeyEvent::ctrl('k')), Command::KillToEnd);
        assert_eq!(km.resolve(KeyEvent::ctrl('y')), Command::Yank);
        assert_eq!(km.resolve(KeyEvent::ctrl('q')), Command::Unbound);
    }

    #[test]
    fn test_meta_bindings() {
        let mut km = Keymap::new();
        assert_eq!(km.resolve(KeyEvent::alt('f')), Command::ForwardWord);
        assert_eq!(km.resolve(KeyEvent::alt('<')), Command::DocumentStart);
        assert_eq!(km.resolve(KeyEvent::alt('z')), Command::Unbound);
    }

    #[test]
    fn test_prefix_resolution() {
        let mut km = Keymap::new();
        assert_eq!(km.resolve(KeyEvent::ctrl('x')), Command::Prefix);
        assert!(km.prefix_pending());
        assert_eq!(km.resolve(KeyEvent::ctrl('s')), Command::Save);
        assert!(!km.prefix_pending());

        assert_eq!(km.resolve(KeyEvent::ctrl('x')), Command::Prefix);
        assert_eq!(km.resolve(KeyEvent::ctrl('c')), Command::Quit);

        assert_eq!(km.resolve(KeyEvent::ctrl('x')), Command::Prefix);
        assert_eq!(km.resolve(KeyEvent::char('=')), Command::ShowPosition);
    }

    #[test]
    fn test_prefix_clears_after_unknown_key() {
        let mut km = Keymap::new();
        km.resolve(KeyEvent::ctrl('x'));
        assert_eq!(km.resolve(KeyEvent::char('z')), Command::Unbound);
        // Back to normal resolution.
        assert_eq!(km.resolve(KeyEvent::char('z')), Command::Insert('z'));
    }
}
