//! The editor session: document, yank register, keymap, and screen,
//! driven one command at a time.
//!
//! One input unit is fully consumed — buffer mutation plus redraw —
//! before the next is read. Recoverable failures (save errors,
//! oversized prompt input, unknown keybindings) are reported on the
//! infobar and the triggering operation is abandoned with the document
//! unchanged; only I/O loss on the render path and allocation failure
//! propagate out.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::document::{Document, Mode};
use crate::edit::{self, YankRegister};
use crate::error::{Error, Result};
use crate::input::{KeyCode, KeyEvent};
use crate::keymap::{Command, Keymap};
use crate::log::{LogLevel, emit_log};
use crate::minibuffer::PromptKind;
use crate::motion;
use crate::redraw::Redraw;
use crate::file;
use crate::screen::{Screen, Window};

/// Whether the session continues after a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// A running editing session.
pub struct Editor<W: Write> {
    doc: Document,
    yank: YankRegister,
    keymap: Keymap,
    screen: Screen<W>,
    path: PathBuf,
    confirm_quit: bool,
}

impl<W: Write> Editor<W> {
    /// Create a session around an already-loaded document.
    pub fn new(doc: Document, path: PathBuf, screen: Screen<W>) -> Self {
        Self {
            doc,
            yank: YankRegister::new(),
            keymap: Keymap::new(),
            screen,
            path,
            confirm_quit: false,
        }
    }

    /// Load `path` and create a session for it.
    pub fn open(path: &Path, out: W, win: Window) -> Result<Self> {
        let doc = file::load(path)?;
        Ok(Self::new(doc, path.to_path_buf(), Screen::new(out, win)))
    }

    /// The document being edited.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The screen renderer.
    pub fn screen_mut(&mut self) -> &mut Screen<W> {
        &mut self.screen
    }

    /// Paint the whole window and show the welcome message.
    pub fn draw_initial(&mut self) -> Result<()> {
        self.screen.refresh(&self.doc, Redraw::Whole)?;
        self.screen
            .infobar_print(&self.doc, "Welcome to ted! Press C-x C-c to quit.")?;
        Ok(())
    }

    /// Adopt a new window size and repaint, clamping the viewport so
    /// the cursor stays visible.
    pub fn handle_resize(&mut self, win: Window) -> Result<()> {
        self.screen.set_window(win);
        if self.doc.mode() == Mode::Normal {
            let cursor = self.doc.line(self.doc.current()).cursor();
            self.doc.viewport.scroll_to_col(cursor, 0, win.text_cols());
            if self.doc.current() - self.doc.viewport.v_offset >= win.text_rows().max(1) {
                self.doc.viewport.v_offset = self.doc.current().saturating_sub(win.rows / 2);
            }
        }
        emit_log(LogLevel::Debug, &format!("resize to {}x{}", win.cols, win.rows));
        self.screen.refresh(&self.doc, Redraw::Whole)?;
        Ok(())
    }

    /// Consume one key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Step> {
        if self.confirm_quit {
            return self.handle_quit_confirmation(key);
        }
        let mut command = self.keymap.resolve(key);
        if self.doc.mode() == Mode::Minibuffer && command == Command::Newline {
            command = Command::Commit;
        }
        self.execute(command)
    }

    fn handle_quit_confirmation(&mut self, key: KeyEvent) -> Result<Step> {
        match key.code {
            KeyCode::Char('y') => Ok(Step::Quit),
            KeyCode::Char('n') => {
                self.confirm_quit = false;
                self.screen.infobar_erase(&self.doc)?;
                Ok(Step::Continue)
            }
            _ => Ok(Step::Continue),
        }
    }

    fn execute(&mut self, command: Command) -> Result<Step> {
        // Status messages are transient: any ordinary key clears them.
        // The prompt owns the last row while engaged, so leave it alone.
        if self.doc.mode() == Mode::Normal
            && !matches!(command, Command::Prefix | Command::Nothing)
        {
            self.screen.infobar_erase(&self.doc)?;
        }

        let win = self.screen.window();
        let directive = match command {
            Command::Insert(c) => edit::insert_char(&mut self.doc, win, c)?,
            Command::InsertTab => edit::insert_tab(&mut self.doc, win)?,
            Command::Newline => edit::newline(&mut self.doc, win)?,
            Command::DeleteBackward => edit::delete_backward(&mut self.doc, win)?,
            Command::DeleteForward => edit::delete_forward(&mut self.doc),
            Command::KillToEnd => edit::kill_to_end_of_line(&mut self.doc, &mut self.yank)?,
            Command::KillToBeginning => {
                edit::kill_to_beginning_of_line(&mut self.doc, win, &mut self.yank)?
            }
            Command::Yank => edit::yank(&mut self.doc, win, &self.yank)?,

            Command::ForwardChar => motion::forward_char(&mut self.doc, win),
            Command::BackwardChar => motion::backward_char(&mut self.doc, win),
            Command::ForwardWord => motion::forward_word(&mut self.doc, win),
            Command::BackwardWord => motion::backward_word(&mut self.doc, win),
            Command::LineStart => motion::line_start(&mut self.doc, win),
            Command::LineEnd => motion::line_end(&mut self.doc, win),
            Command::NextLine => motion::next_line(&mut self.doc, win),
            Command::PreviousLine => motion::previous_line(&mut self.doc, win),
            Command::PageDown => motion::page_down(&mut self.doc, win),
            Command::PageUp => motion::page_up(&mut self.doc, win),
            Command::DocumentStart => motion::document_start(&mut self.doc, win),
            Command::DocumentEnd => motion::document_end(&mut self.doc, win),
            Command::Recenter => motion::center_on_cursor(&mut self.doc, win),

            Command::Save => {
                self.save_to(self.path.clone())?;
                return Ok(Step::Continue);
            }
            Command::Quit => {
                self.confirm_quit = true;
                self.screen.infobar_print(&self.doc, "Really quit? (y/n)")?;
                return Ok(Step::Continue);
            }
            Command::ShowPosition => {
                self.screen.infobar_position(&self.doc)?;
                return Ok(Step::Continue);
            }
            Command::Prefix => {
                self.screen.infobar_print(&self.doc, "C-x")?;
                return Ok(Step::Continue);
            }

            Command::PromptGotoLine => return self.engage_prompt("Goto line: ", PromptKind::GotoLine),
            Command::PromptSaveAs => return self.engage_prompt("Write file: ", PromptKind::SaveAs),
            Command::PromptSearch => return self.engage_prompt("Search: ", PromptKind::Search),
            Command::Commit => return self.commit_prompt(),
            Command::Cancel => {
                if self.doc.mode() == Mode::Minibuffer {
                    self.doc.cancel_prompt();
                    self.screen.infobar_erase(&self.doc)?;
                }
                return Ok(Step::Continue);
            }

            Command::Unbound => {
                emit_log(LogLevel::Debug, "unknown keybinding");
                self.screen.infobar_print(&self.doc, "unknown keybinding")?;
                return Ok(Step::Continue);
            }
            Command::Nothing => return Ok(Step::Continue),
        };

        self.screen.refresh(&self.doc, directive)?;
        Ok(Step::Continue)
    }

    fn engage_prompt(&mut self, prefix: &str, kind: PromptKind) -> Result<Step> {
        if self.doc.mode() == Mode::Minibuffer {
            return Ok(Step::Continue);
        }
        self.doc.activate_prompt(prefix, kind)?;
        self.screen.refresh(&self.doc, Redraw::CurrentLine)?;
        Ok(Step::Continue)
    }

    fn commit_prompt(&mut self) -> Result<Step> {
        let committed = match self.doc.commit_prompt() {
            Ok(committed) => committed,
            Err(e @ Error::PromptTooLong { .. }) => {
                // Abandoned; the prompt stays engaged.
                self.screen.infobar_error(&self.doc, &e.to_string())?;
                return Ok(Step::Continue);
            }
            Err(e) => return Err(e),
        };
        let Some((kind, text)) = committed else {
            return Ok(Step::Continue);
        };
        self.screen.infobar_erase(&self.doc)?;
        match kind {
            PromptKind::GotoLine => {
                let number = text.trim().parse::<usize>().unwrap_or(0);
                let win = self.screen.window();
                let directive = motion::goto_line(&mut self.doc, win, number);
                self.screen.refresh(&self.doc, directive)?;
            }
            PromptKind::SaveAs => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    let path = PathBuf::from(trimmed);
                    self.save_to(path)?;
                }
            }
            PromptKind::Search => {
                // Stub hook; see the non-goals.
                self.screen
                    .infobar_print(&self.doc, "search is not implemented")?;
            }
        }
        Ok(Step::Continue)
    }

    /// Save to `path`, adopting it as the session path on success.
    fn save_to(&mut self, path: PathBuf) -> Result<()> {
        match file::save(&path, &self.doc) {
            Ok(()) => {
                self.path = path;
                self.screen.infobar_print(&self.doc, "document saved")?;
            }
            Err(Error::Io(e)) => {
                emit_log(LogLevel::Error, &format!("save failed: {e}"));
                self.screen
                    .infobar_error(&self.doc, &format!("could not write file: {e}"))?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_from(text: &str) -> Editor<Vec<u8>> {
        let doc = Document::from_text(text).unwrap();
        let screen = Screen::new(Vec::new(), Window { cols: 80, rows: 24 });
        Editor::new(doc, PathBuf::from("/tmp/test.txt"), screen)
    }

    fn type_text(ed: &mut Editor<Vec<u8>>, text: &str) {
        for c in text.chars() {
            ed.handle_key(KeyEvent::char(c)).unwrap();
        }
    }

    #[test]
    fn test_typing_inserts() {
        let mut ed = editor_from("");
        type_text(&mut ed, "hi");
        assert_eq!(ed.document().line(0).chars(), &['h', 'i']);
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut ed = editor_from("");
        ed.handle_key(KeyEvent::ctrl('x')).unwrap();
        let step = ed.handle_key(KeyEvent::ctrl('c')).unwrap();
        assert_eq!(step, Step::Continue);
        // 'n' cancels.
        assert_eq!(ed.handle_key(KeyEvent::char('n')).unwrap(), Step::Continue);
        // Ask again, 'y' quits.
        ed.handle_key(KeyEvent::ctrl('x')).unwrap();
        ed.handle_key(KeyEvent::ctrl('c')).unwrap();
        assert_eq!(ed.handle_key(KeyEvent::char('y')).unwrap(), Step::Quit);
    }

    #[test]
    fn test_goto_line_prompt_flow() {
        let mut ed = editor_from("a\nb\nc\nd\ne");
        ed.handle_key(KeyEvent::alt('g')).unwrap();
        assert_eq!(ed.document().mode(), Mode::Minibuffer);
        type_text(&mut ed, "4");
        ed.handle_key(KeyEvent::key(KeyCode::Enter)).unwrap();
        assert_eq!(ed.document().mode(), Mode::Normal);
        assert_eq!(ed.document().current(), 3);
    }

    #[test]
    fn test_prompt_cancel_restores_position() {
        let mut ed = editor_from("a\nb\nc");
        ed.handle_key(KeyEvent::ctrl('n')).unwrap();
        assert_eq!(ed.document().current(), 1);
        ed.handle_key(KeyEvent::alt('g')).unwrap();
        type_text(&mut ed, "3");
        ed.handle_key(KeyEvent::ctrl('g')).unwrap();
        assert_eq!(ed.document().mode(), Mode::Normal);
        assert_eq!(ed.document().current(), 1);
    }

    #[test]
    fn test_enter_commits_only_in_prompt() {
        let mut ed = editor_from("ab");
        ed.handle_key(KeyEvent::key(KeyCode::Enter)).unwrap();
        assert_eq!(ed.document().line_count(), 2);
    }

    #[test]
    fn test_search_prompt_is_a_stub() {
        let mut ed = editor_from("abc");
        ed.handle_key(KeyEvent::ctrl('s')).unwrap();
        type_text(&mut ed, "needle");
        ed.handle_key(KeyEvent::key(KeyCode::Enter)).unwrap();
        assert_eq!(ed.document().mode(), Mode::Normal);
        let out = String::from_utf8(ed.screen.into_inner()).unwrap();
        assert!(out.contains("search is not implemented"));
    }

    #[test]
    fn test_save_as_adopts_new_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        let mut ed = editor_from("content");
        ed.handle_key(KeyEvent::ctrl('x')).unwrap();
        ed.handle_key(KeyEvent::ctrl('w')).unwrap();
        type_text(&mut ed, target.to_str().unwrap());
        ed.handle_key(KeyEvent::key(KeyCode::Enter)).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "content");
        assert_eq!(ed.path, target);
    }

    #[test]
    fn test_unknown_binding_reports() {
        let mut ed = editor_from("");
        ed.handle_key(KeyEvent::ctrl('q')).unwrap();
        let out = String::from_utf8(ed.screen.into_inner()).unwrap();
        assert!(out.contains("unknown keybinding"));
    }

    #[test]
    fn test_kill_and_yank_through_commands() {
        let mut ed = editor_from("hello world");
        ed.handle_key(KeyEvent::ctrl('k')).unwrap();
        assert_eq!(ed.document().line(0).len(), 0);
        ed.handle_key(KeyEvent::ctrl('y')).unwrap();
        let text: String = ed.document().line(0).chars().iter().collect();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_resize_repaints_whole_window() {
        let mut ed = editor_from("one\ntwo");
        ed.handle_resize(Window { cols: 40, rows: 12 }).unwrap();
        assert_eq!(ed.screen.window(), Window { cols: 40, rows: 12 });
        let out = String::from_utf8(ed.screen.into_inner()).unwrap();
        assert!(out.contains("\x1b[2J"));
    }
}
