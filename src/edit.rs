//! Editing operations: insert, delete, split, merge, kill, yank.
//!
//! Each operation mutates the document (or the engaged prompt line) and
//! returns the [`Redraw`] directive describing exactly which screen
//! region it disturbed. Directives are computed after all buffer
//! mutation is complete, so the terminal never shows a state
//! inconsistent with a valid document snapshot.
//!
//! Operations that would cross a line boundary are no-ops while a
//! prompt is engaged. Boundary conditions with no valid effect
//! (delete-forward at end of line, merge on the first line) are no-ops,
//! not errors.

use crate::document::{Document, Mode};
use crate::error::Result;
use crate::redraw::Redraw;
use crate::screen::Window;
use crate::tabs::{self, PAD, TAB_WIDTH};

/// Single-slot storage for the most recently killed span. Overwritten
/// on each kill, copied on yank. Placeholders are elided when the span
/// is captured; tabs stay as single `'\t'` scalars and re-expand on
/// yank.
#[derive(Debug, Default)]
pub struct YankRegister {
    chars: Vec<char>,
}

impl YankRegister {
    /// Create an empty register.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the register holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The stored span.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    fn fill_from(&mut self, span: &[char]) -> Result<()> {
        self.chars.clear();
        self.chars.try_reserve(span.len())?;
        self.chars
            .extend(span.iter().copied().filter(|&c| !tabs::is_pad(c)));
        Ok(())
    }
}

/// Directive for an operation that moved the horizontal offset: the
/// whole window in normal mode, just the prompt row while engaged.
fn after_scroll(doc: &Document) -> Redraw {
    match doc.mode() {
        Mode::Normal => Redraw::Whole,
        Mode::Minibuffer => Redraw::CurrentLine,
    }
}

/// Insert one character at the cursor.
///
/// Typing where a tab character sits consumes the tab's padding instead
/// of shifting the tail: the character replaces the tab and the tab
/// slides one cell right into its run. When the run's last cell is
/// consumed, a fresh full-width run is opened after the character.
pub fn insert_char(doc: &mut Document, win: Window, c: char) -> Result<Redraw> {
    // A prompt is a single line; a newline cannot enter it.
    if c == '\n' && doc.mode() == Mode::Minibuffer {
        return Ok(Redraw::Cursor);
    }
    let text_cols = win.text_cols();
    let line = doc.active_line_mut();
    let at = line.cursor();

    if line.char_at(at) == Some('\t') {
        line.set(at, c);
        let next = at + 1;
        if line.char_at(next).is_some_and(tabs::is_pad) {
            line.set(next, '\t');
        } else {
            let mut i = next;
            line.insert(i, '\t')?;
            i += 1;
            while i % TAB_WIDTH != 0 {
                line.insert(i, PAD)?;
                i += 1;
            }
        }
        line.set_cursor(next);
        let margin = line.margin();
        let scrolled = doc.viewport.scroll_to_col(next, margin, text_cols);
        return Ok(if scrolled {
            after_scroll(doc)
        } else {
            Redraw::CurrentLine
        });
    }

    line.insert(at, c)?;
    line.set_cursor(at + 1);
    let margin = line.margin();
    if doc.viewport.scroll_to_col(at + 1, margin, text_cols) {
        Ok(after_scroll(doc))
    } else {
        Ok(Redraw::ShiftRight { from: at })
    }
}

/// Insert a tab: the tab character, then padding until the cursor
/// reaches the next tab stop. Disabled while a prompt is engaged.
pub fn insert_tab(doc: &mut Document, win: Window) -> Result<Redraw> {
    if doc.mode() == Mode::Minibuffer {
        return Ok(Redraw::Cursor);
    }
    let text_cols = win.text_cols();
    let line = doc.active_line_mut();
    let mut at = line.cursor();
    let stop = tabs::next_stop(at);
    line.insert(at, '\t')?;
    at += 1;
    while at < stop {
        line.insert(at, PAD)?;
        at += 1;
    }
    line.set_cursor(stop);
    if doc.viewport.scroll_to_col(stop, 0, text_cols) {
        Ok(Redraw::Whole)
    } else {
        Ok(Redraw::CurrentLine)
    }
}

/// Delete the character before the cursor. A trailing placeholder run
/// collapses together with its owning tab in one step. At column zero
/// this merges with the previous line; at the margin of a prompt it is
/// a no-op.
pub fn delete_backward(doc: &mut Document, win: Window) -> Result<Redraw> {
    let line = doc.active_line();
    if line.cursor() == line.margin() {
        if doc.mode() == Mode::Minibuffer {
            return Ok(Redraw::Cursor);
        }
        return merge_with_previous_line(doc, win);
    }
    let text_cols = win.text_cols();
    let line = doc.active_line_mut();
    let mut at = line.cursor();
    let mut collapsed_run = false;
    while at > line.margin() && line.char_at(at - 1).is_some_and(tabs::is_pad) {
        line.remove(at - 1);
        at -= 1;
        collapsed_run = true;
    }
    if at > line.margin() {
        line.remove(at - 1);
        at -= 1;
    }
    line.set_cursor(at);
    let margin = line.margin();
    if doc.viewport.scroll_to_col(at, margin, text_cols) {
        Ok(after_scroll(doc))
    } else if collapsed_run {
        Ok(Redraw::CurrentLine)
    } else {
        Ok(Redraw::ShiftLeft { from: at })
    }
}

/// Delete the character at the cursor. A tab takes its placeholder run
/// with it in one step. No-op at end of line.
pub fn delete_forward(doc: &mut Document) -> Redraw {
    let line = doc.active_line_mut();
    let at = line.cursor();
    if at == line.len() {
        return Redraw::Cursor;
    }
    if line.char_at(at) == Some('\t') {
        line.remove(at);
        while line.char_at(at).is_some_and(tabs::is_pad) {
            line.remove(at);
        }
        return Redraw::CurrentLine;
    }
    line.remove(at);
    Redraw::ShiftLeft { from: at }
}

/// Split the current line at the cursor. The suffix becomes a new line
/// inserted immediately after, with its cursor at zero and the
/// horizontal offset reset. Disabled while a prompt is engaged.
pub fn newline(doc: &mut Document, win: Window) -> Result<Redraw> {
    if doc.mode() == Mode::Minibuffer {
        return Ok(Redraw::Cursor);
    }
    let cur = doc.current();
    let at = doc.line(cur).cursor();
    let suffix = doc.line_mut(cur).split_off(at)?;
    doc.insert_line_after(cur, suffix)?;
    doc.set_current(cur + 1);

    let mut whole = false;
    if doc.viewport.h_offset != 0 {
        doc.viewport.h_offset = 0;
        whole = true;
    }
    if doc.current() - doc.viewport.v_offset >= win.text_rows() {
        doc.viewport.v_offset += 1;
        whole = true;
    }
    Ok(if whole {
        Redraw::Whole
    } else {
        Redraw::RegionBelow
    })
}

/// Append the current line to the previous one and remove it. The
/// cursor lands at the join point. No-op on the first line; disabled
/// while a prompt is engaged.
pub fn merge_with_previous_line(doc: &mut Document, win: Window) -> Result<Redraw> {
    if doc.mode() == Mode::Minibuffer {
        return Ok(Redraw::Cursor);
    }
    let cur = doc.current();
    if cur == 0 {
        return Ok(Redraw::Cursor);
    }
    let removed = doc.remove_line(cur);
    let prev = doc.line_mut(cur - 1);
    let join = prev.len();
    prev.extend_from(removed.chars())?;
    prev.set_cursor(join);

    let mut whole = false;
    if cur == doc.viewport.v_offset {
        // The removed line was the topmost visible row.
        doc.viewport.v_offset -= 1;
        whole = true;
    }
    if doc.viewport.scroll_to_col(join, 0, win.text_cols()) {
        whole = true;
    }
    Ok(if whole {
        Redraw::Whole
    } else {
        Redraw::RegionAbove
    })
}

/// Copy `[cursor, len)` into the yank register (overwriting it) and
/// truncate the line at the cursor. The killed span is blanked in
/// place on screen rather than repainted.
pub fn kill_to_end_of_line(doc: &mut Document, register: &mut YankRegister) -> Result<Redraw> {
    if doc.mode() == Mode::Minibuffer {
        return Ok(Redraw::Cursor);
    }
    let line = doc.active_line_mut();
    let at = line.cursor();
    let len = line.len();
    register.fill_from(&line.chars()[at..])?;
    line.truncate(at);
    Ok(Redraw::Blank {
        from: at,
        len: len - at,
    })
}

/// Copy `[margin, cursor)` into the yank register, shift the tail down
/// to the margin, and move the cursor there. No-op when the cursor is
/// already at the margin (the register is left untouched).
pub fn kill_to_beginning_of_line(
    doc: &mut Document,
    win: Window,
    register: &mut YankRegister,
) -> Result<Redraw> {
    if doc.mode() == Mode::Minibuffer {
        return Ok(Redraw::Cursor);
    }
    let text_cols = win.text_cols();
    let line = doc.active_line_mut();
    let at = line.cursor();
    let margin = line.margin();
    if at == margin {
        return Ok(Redraw::Cursor);
    }
    register.fill_from(&line.chars()[margin..at])?;
    line.remove_range(margin, at);
    line.set_cursor(margin);
    if doc.viewport.scroll_to_col(margin, margin, text_cols) {
        Ok(Redraw::Whole)
    } else {
        Ok(Redraw::CurrentLine)
    }
}

/// Replay the yank register through the ordinary insert path, so tabs
/// re-expand at their new columns. No-op when the register is empty or
/// a prompt is engaged.
pub fn yank(doc: &mut Document, win: Window, register: &YankRegister) -> Result<Redraw> {
    if doc.mode() == Mode::Minibuffer {
        return Ok(Redraw::Cursor);
    }
    let mut directive = Redraw::Cursor;
    for &c in register.chars() {
        let d = if c == '\t' {
            insert_tab(doc, win)?
        } else {
            insert_char(doc, win, c)?
        };
        directive = directive.strongest(d);
    }
    Ok(directive)
}
