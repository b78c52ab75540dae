//! Screen renderer: translates redraw directives plus document state
//! into buffered terminal output.
//!
//! Output goes through an internal byte buffer flushed once per
//! processed input unit, so a multi-step operation appears atomic to
//! the terminal. The last row is reserved for the infobar and the
//! minibuffer; the last column is never written.
//!
//! Every stored scalar renders as exactly one column — tabs and
//! placeholders as blanks — so the screen column of cell `i` is always
//! `i - h_offset` and partial repaints stay pixel-exact without relying
//! on terminal tab stops.

use std::io::{self, Write};

use crate::ansi;
use crate::document::{Document, Mode};
use crate::line::Line;
use crate::redraw::Redraw;
use crate::tabs;

/// Terminal dimensions, in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub cols: usize,
    pub rows: usize,
}

impl Window {
    /// Create a window from a `(cols, rows)` size query.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: usize::from(cols),
            rows: usize::from(rows),
        }
    }

    /// Usable text columns; the last column is never written.
    #[must_use]
    pub fn text_cols(&self) -> usize {
        self.cols.saturating_sub(1)
    }

    /// Usable text rows; the last row is the infobar.
    #[must_use]
    pub fn text_rows(&self) -> usize {
        self.rows.saturating_sub(1)
    }
}

/// Buffered terminal renderer.
pub struct Screen<W: Write> {
    out: W,
    buf: Vec<u8>,
    win: Window,
}

impl<W: Write> Screen<W> {
    /// Create a renderer writing to `out` with the given window size.
    pub fn new(out: W, win: Window) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(8192),
            win,
        }
    }

    /// Current window size.
    #[must_use]
    pub fn window(&self) -> Window {
        self.win
    }

    /// Adopt a new window size (after a resize notification).
    pub fn set_window(&mut self, win: Window) {
        self.win = win;
    }

    /// Apply a redraw directive, reposition the cursor, and flush.
    pub fn refresh(&mut self, doc: &Document, directive: Redraw) -> io::Result<()> {
        self.apply(doc, directive);
        self.position_cursor(doc);
        self.flush()
    }

    /// Flush buffered output to the terminal.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.buf.clear();
        self.out.flush()
    }

    /// Clear the screen and drop any buffered output (teardown).
    pub fn clear(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.extend_from_slice(ansi::CLEAR_SCREEN.as_bytes());
        self.buf.extend_from_slice(ansi::CURSOR_HOME.as_bytes());
        self.flush()
    }

    /// Consume the renderer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn move_to(&mut self, row: usize, col: usize) {
        let _ = ansi::write_cursor_position(&mut self.buf, row, col);
    }

    fn put_cell(&mut self, c: char) {
        // One column per stored scalar: tabs and padding are blanks.
        let shown = if c == '\t' || tabs::is_pad(c) || c.is_control() {
            ' '
        } else {
            c
        };
        let mut utf8 = [0u8; 4];
        self.buf
            .extend_from_slice(shown.encode_utf8(&mut utf8).as_bytes());
    }

    fn apply(&mut self, doc: &Document, directive: Redraw) {
        if doc.mode() == Mode::Minibuffer {
            match directive {
                Redraw::Cursor => {}
                Redraw::Whole => {
                    // Resize path: repaint the document area too.
                    self.buf.extend_from_slice(ansi::CLEAR_SCREEN.as_bytes());
                    self.draw_rows_from(doc, doc.viewport.v_offset);
                    self.draw_minibuffer(doc);
                }
                _ => self.draw_minibuffer(doc),
            }
            return;
        }
        match directive {
            Redraw::Cursor => {}
            Redraw::Whole => {
                self.buf.extend_from_slice(ansi::CLEAR_SCREEN.as_bytes());
                self.draw_rows_from(doc, doc.viewport.v_offset);
            }
            Redraw::RegionBelow => {
                self.draw_rows_from(doc, doc.current().saturating_sub(1));
            }
            Redraw::RegionAbove => {
                self.draw_rows_from(doc, doc.current());
            }
            Redraw::CurrentLine => {
                self.draw_document_line(doc, doc.current());
            }
            Redraw::ShiftRight { from } => {
                let line = doc.line(doc.current());
                let row = doc.current() - doc.viewport.v_offset;
                self.paint_cells(line, row, doc.viewport.h_offset, from, line.len());
            }
            Redraw::ShiftLeft { from } => {
                let line = doc.line(doc.current());
                let row = doc.current() - doc.viewport.v_offset;
                let h = doc.viewport.h_offset;
                self.paint_cells(line, row, h, from, line.len());
                self.blank_cells(row, h, line.len(), 1);
            }
            Redraw::Blank { from, len } => {
                let row = doc.current() - doc.viewport.v_offset;
                self.blank_cells(row, doc.viewport.h_offset, from, len);
            }
        }
    }

    /// Repaint rows `from_line..` down to the bottom of the text area,
    /// then blank the row just below the last document line if visible.
    fn draw_rows_from(&mut self, doc: &Document, from_line: usize) {
        let v = doc.viewport.v_offset;
        let bottom = (v + self.win.text_rows()).min(doc.line_count());
        for index in from_line.max(v)..bottom {
            self.draw_document_line(doc, index);
        }
        if doc.line_count() < v + self.win.text_rows() {
            self.move_to(doc.line_count() - v, 0);
            self.buf
                .extend_from_slice(ansi::CLEAR_LINE_RIGHT.as_bytes());
        }
    }

    fn draw_document_line(&mut self, doc: &Document, index: usize) {
        let v = doc.viewport.v_offset;
        debug_assert!(index >= v && index - v < self.win.text_rows().max(1));
        let line = doc.line(index);
        let h = doc.viewport.h_offset;
        self.move_to(index - v, 0);
        self.buf
            .extend_from_slice(ansi::CLEAR_LINE_RIGHT.as_bytes());
        let end = line.len().min(h + self.win.text_cols());
        for i in h..end {
            match line.char_at(i) {
                Some(c) => self.put_cell(c),
                None => break,
            }
        }
    }

    /// Repaint cells `[from, to)` of a row at their exact columns,
    /// clipped to the visible span.
    fn paint_cells(&mut self, line: &Line, row: usize, h: usize, from: usize, to: usize) {
        let start = from.max(h);
        let end = to.min(h + self.win.text_cols());
        if start >= end {
            return;
        }
        self.move_to(row, start - h);
        for i in start..end {
            match line.char_at(i) {
                Some(c) => self.put_cell(c),
                None => break,
            }
        }
    }

    /// Blank `len` cells starting at column `from`, clipped to the
    /// visible span.
    fn blank_cells(&mut self, row: usize, h: usize, from: usize, len: usize) {
        let start = from.max(h);
        let end = (from + len).min(h + self.win.text_cols());
        if start >= end {
            return;
        }
        self.move_to(row, start - h);
        for _ in start..end {
            self.buf.push(b' ');
        }
    }

    /// Repaint the minibuffer row: the pinned prompt prefix, then the
    /// entered content shifted by the horizontal offset.
    fn draw_minibuffer(&mut self, doc: &Document) {
        let Some(mb) = doc.minibuffer() else { return };
        let line = mb.line();
        let margin = line.margin();
        let h = doc.viewport.h_offset;
        let row = self.win.text_rows();

        self.move_to(row, 0);
        self.buf
            .extend_from_slice(ansi::CLEAR_LINE_RIGHT.as_bytes());
        for i in 0..margin.min(self.win.text_cols()) {
            match line.char_at(i) {
                Some(c) => self.put_cell(c),
                None => break,
            }
        }
        self.move_to(row, margin);
        let end = line.len().min(h + self.win.text_cols());
        for i in (margin + h)..end {
            match line.char_at(i) {
                Some(c) => self.put_cell(c),
                None => break,
            }
        }
    }

    /// Park the terminal cursor on the logical cursor position.
    pub fn position_cursor(&mut self, doc: &Document) {
        if let Some(mb) = doc.minibuffer() {
            let col = mb.line().cursor().saturating_sub(doc.viewport.h_offset);
            self.move_to(self.win.text_rows(), col);
            return;
        }
        let row = doc.current().saturating_sub(doc.viewport.v_offset);
        let col = doc
            .line(doc.current())
            .cursor()
            .saturating_sub(doc.viewport.h_offset);
        self.move_to(row, col);
    }

    // ------------------------------------------------------------------
    // Infobar: transient one-line status at the reserved last row.
    // ------------------------------------------------------------------

    /// Show an inverted status message and park the cursor back on the
    /// document.
    pub fn infobar_print(&mut self, doc: &Document, message: &str) -> io::Result<()> {
        self.draw_infobar(message);
        self.position_cursor(doc);
        self.flush()
    }

    /// Show an inverted error message.
    pub fn infobar_error(&mut self, doc: &Document, message: &str) -> io::Result<()> {
        self.draw_infobar(&format!("ERROR: {message}"));
        self.position_cursor(doc);
        self.flush()
    }

    /// Erase the infobar row.
    pub fn infobar_erase(&mut self, doc: &Document) -> io::Result<()> {
        self.move_to(self.win.text_rows(), 0);
        self.buf
            .extend_from_slice(ansi::CLEAR_LINE_RIGHT.as_bytes());
        self.position_cursor(doc);
        self.flush()
    }

    /// Show the cursor-position readout: character, code point, row and
    /// column (1-based).
    pub fn infobar_position(&mut self, doc: &Document) -> io::Result<()> {
        let line = doc.line(doc.current());
        let cursor = line.cursor();
        let c = line.char_at(cursor).unwrap_or('\0');
        let shown = if c.is_control() || tabs::is_pad(c) {
            ' '
        } else {
            c
        };
        let message = format!(
            "CHAR: ({shown}, {}, {:#x}) ROW: {} COLUMN: {}",
            c as u32,
            c as u32,
            doc.current() + 1,
            cursor + 1
        );
        self.infobar_print(doc, &message)
    }

    fn draw_infobar(&mut self, message: &str) {
        self.move_to(self.win.text_rows(), 0);
        self.buf
            .extend_from_slice(ansi::CLEAR_LINE_RIGHT.as_bytes());
        self.buf.extend_from_slice(ansi::INVERT.as_bytes());
        let mut utf8 = [0u8; 4];
        for c in message.chars().take(self.win.text_cols()) {
            self.buf
                .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        }
        self.buf.extend_from_slice(ansi::REVERT.as_bytes());
    }
}
