//! The document: an ordered, growable collection of lines plus viewport
//! and mode state.
//!
//! The document always holds at least one line. Operations never keep a
//! reference to a line across a structural change; they re-resolve the
//! current line by index, so growth can relocate storage freely.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::line::Line;
use crate::minibuffer::{MAX_PROMPT_LEN, Minibuffer, PromptKind, SavedPosition};
use crate::tabs;

/// The visible window's offset into the document (vertical) and into the
/// current line (horizontal).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Columns hidden left of the visible window.
    pub h_offset: usize,
    /// Lines hidden above the visible window.
    pub v_offset: usize,
}

impl Viewport {
    /// Bring column `col` back into the visible horizontal span
    /// `[h_offset + left, h_offset + text_cols)`, where `left` is the
    /// number of columns pinned at the window's left edge (a prompt
    /// prefix; zero for ordinary lines). Returns whether the offset
    /// moved.
    pub fn scroll_to_col(&mut self, col: usize, left: usize, text_cols: usize) -> bool {
        if text_cols <= left {
            return false;
        }
        let old = self.h_offset;
        if col < self.h_offset + left {
            self.h_offset = col - left;
        } else if col - self.h_offset >= text_cols {
            self.h_offset = col + 1 - text_cols;
        }
        old != self.h_offset
    }
}

/// Whether edits target the document or an engaged prompt line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Minibuffer,
}

/// The whole buffer: lines, current-line index, viewport, and the
/// optionally engaged minibuffer.
#[derive(Debug)]
pub struct Document {
    lines: Vec<Line>,
    current: usize,
    pub viewport: Viewport,
    minibuffer: Option<Minibuffer>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            current: 0,
            viewport: Viewport::default(),
            minibuffer: None,
        }
    }

    /// Build a document from text. `'\n'` starts a new line, `'\t'`
    /// expands through the tab model, everything else appends literally.
    /// `"abc\n"` yields two lines — the empty final line *is* the
    /// trailing newline, which makes load-then-save byte-identical.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut lines: Vec<Line> = Vec::new();
        let mut line = Line::new();
        for c in text.chars() {
            match c {
                '\n' => {
                    lines.try_reserve(1)?;
                    lines.push(std::mem::take(&mut line));
                }
                '\t' => line.expand_tab()?,
                _ => line.push(c)?,
            }
        }
        lines.try_reserve(1)?;
        lines.push(line);
        Ok(Self {
            lines,
            current: 0,
            viewport: Viewport::default(),
            minibuffer: None,
        })
    }

    /// Write the document as plain text: placeholders elided, tabs
    /// re-emitted as single tab characters, lines joined with `'\n'`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut utf8 = [0u8; 4];
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\n")?;
            }
            for &c in line.chars() {
                if tabs::is_pad(c) {
                    continue;
                }
                out.write_all(c.encode_utf8(&mut utf8).as_bytes())?;
            }
        }
        Ok(())
    }

    /// Number of lines in use.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Index of the line the cursor logically occupies.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.lines.len());
        self.current = index.min(self.lines.len() - 1);
    }

    /// The line at `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    pub(crate) fn line_mut(&mut self, index: usize) -> &mut Line {
        &mut self.lines[index]
    }

    /// Normal or minibuffer editing.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.minibuffer.is_some() {
            Mode::Minibuffer
        } else {
            Mode::Normal
        }
    }

    /// The line edits currently target: the engaged prompt line, or the
    /// current document line.
    #[must_use]
    pub fn active_line(&self) -> &Line {
        match &self.minibuffer {
            Some(mb) => mb.line(),
            None => &self.lines[self.current],
        }
    }

    pub(crate) fn active_line_mut(&mut self) -> &mut Line {
        match &mut self.minibuffer {
            Some(mb) => mb.line_mut(),
            None => &mut self.lines[self.current],
        }
    }

    /// Insert `line` immediately after `index`, shifting the tail block
    /// down one slot. The current index is adjusted in the same call, so
    /// no partial state is observable.
    pub fn insert_line_after(&mut self, index: usize, line: Line) -> Result<()> {
        debug_assert!(index < self.lines.len());
        self.lines.try_reserve(1)?;
        self.lines.insert(index + 1, line);
        if self.current > index {
            self.current += 1;
        }
        Ok(())
    }

    /// Remove and return the line at `index`, shifting the tail block up
    /// one slot. The last remaining line is never removed. The current
    /// index is adjusted in the same call.
    pub fn remove_line(&mut self, index: usize) -> Line {
        debug_assert!(index < self.lines.len());
        debug_assert!(self.lines.len() > 1, "document must keep one line");
        let removed = self.lines.remove(index);
        if self.current >= index && self.current > 0 {
            self.current -= 1;
        }
        removed
    }

    /// The engaged minibuffer, if any.
    #[must_use]
    pub fn minibuffer(&self) -> Option<&Minibuffer> {
        self.minibuffer.as_ref()
    }

    /// Engage a prompt: snapshot the current position, zero the
    /// horizontal offset, and substitute a fresh prompt line as the
    /// active line.
    pub fn activate_prompt(&mut self, prefix: &str, kind: PromptKind) -> Result<()> {
        debug_assert!(self.minibuffer.is_none(), "prompt already engaged");
        let saved = SavedPosition {
            current: self.current,
            cursor: self.lines[self.current].cursor(),
            viewport: self.viewport,
        };
        let line = Line::with_prompt(prefix)?;
        self.viewport.h_offset = 0;
        self.minibuffer = Some(Minibuffer::new(line, kind, saved));
        Ok(())
    }

    /// Disengage without invoking anything; the saved position is
    /// restored exactly.
    pub fn cancel_prompt(&mut self) {
        if let Some(mb) = self.minibuffer.take() {
            self.restore(mb.saved());
        }
    }

    /// Disengage and hand back the prompt kind and entered text. Fails
    /// with [`Error::PromptTooLong`] — leaving the prompt engaged — when
    /// the content exceeds the limit. Returns `None` when no prompt is
    /// engaged.
    pub fn commit_prompt(&mut self) -> Result<Option<(PromptKind, String)>> {
        let len = match &self.minibuffer {
            Some(mb) => mb.entered_len(),
            None => return Ok(None),
        };
        if len > MAX_PROMPT_LEN {
            return Err(Error::PromptTooLong {
                len,
                max: MAX_PROMPT_LEN,
            });
        }
        let Some(mb) = self.minibuffer.take() else {
            return Ok(None);
        };
        let result = (mb.kind(), mb.text());
        self.restore(mb.saved());
        Ok(Some(result))
    }

    fn restore(&mut self, saved: SavedPosition) {
        self.current = saved.current.min(self.lines.len() - 1);
        self.viewport = saved.viewport;
        let line = &mut self.lines[self.current];
        line.set_cursor(saved.cursor.min(line.len()));
    }

    /// Whether every structural invariant holds: each line well-formed,
    /// the current index in range, and the vertical offset not past the
    /// current line in normal mode.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.lines.is_empty()
            && self.current < self.lines.len()
            && self.lines.iter().all(Line::is_well_formed)
            && (self.minibuffer.is_some() || self.viewport.v_offset <= self.current)
    }
}
