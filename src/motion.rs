//! Navigation operations: cursor and viewport repositioning.
//!
//! Character and word movement treat a tab plus its padding run as one
//! logical character. The horizontal offset follows one shared rule:
//! whenever the cursor leaves the visible span the offset is recomputed
//! to bring it back, forcing a window repaint (or a prompt-row repaint
//! while the minibuffer is engaged). Movement at a structural boundary
//! is a no-op, not an error.

use crate::document::{Document, Mode};
use crate::redraw::Redraw;
use crate::screen::Window;
use crate::tabs;

fn after_scroll(doc: &Document) -> Redraw {
    match doc.mode() {
        Mode::Normal => Redraw::Whole,
        Mode::Minibuffer => Redraw::CurrentLine,
    }
}

/// Reposition the cursor within the active line and rescroll if needed.
fn land(doc: &mut Document, win: Window, at: usize) -> Redraw {
    let line = doc.active_line_mut();
    line.set_cursor(at);
    let margin = line.margin();
    if doc.viewport.scroll_to_col(at, margin, win.text_cols()) {
        after_scroll(doc)
    } else {
        Redraw::Cursor
    }
}

/// Center the viewport on the current line and repaint everything.
fn recenter(doc: &mut Document, win: Window) -> Redraw {
    doc.viewport.v_offset = doc.current().saturating_sub(win.rows / 2);
    Redraw::Whole
}

/// Move one character right, crossing a tab run in a single step.
pub fn forward_char(doc: &mut Document, win: Window) -> Redraw {
    let line = doc.active_line();
    let mut at = line.cursor();
    if at >= line.len() {
        return Redraw::Cursor;
    }
    at += 1;
    while line.char_at(at).is_some_and(tabs::is_pad) {
        at += 1;
    }
    land(doc, win, at)
}

/// Move one character left, landing on a tab rather than inside its
/// padding.
pub fn backward_char(doc: &mut Document, win: Window) -> Redraw {
    let line = doc.active_line();
    let mut at = line.cursor();
    if at <= line.margin() {
        return Redraw::Cursor;
    }
    at -= 1;
    while at > line.margin() && line.char_at(at).is_some_and(tabs::is_pad) {
        at -= 1;
    }
    land(doc, win, at)
}

/// Move past the current non-space run (skipping leading spaces first),
/// stopping at the end of line.
pub fn forward_word(doc: &mut Document, win: Window) -> Redraw {
    let line = doc.active_line();
    let len = line.len();
    let mut at = line.cursor();
    while at < len && line.is_space(at) {
        at += 1;
    }
    while at < len && !line.is_space(at) {
        at += 1;
    }
    land(doc, win, at)
}

/// Mirror of [`forward_word`]: move back over spaces, then over the
/// word, stopping at the margin.
pub fn backward_word(doc: &mut Document, win: Window) -> Redraw {
    let line = doc.active_line();
    let margin = line.margin();
    let mut at = line.cursor();
    if at <= margin {
        return Redraw::Cursor;
    }
    if at == line.len() {
        at -= 1;
    }
    while at > margin && line.is_space(at) {
        at -= 1;
    }
    while at > margin && !line.is_space(at) {
        at -= 1;
    }
    land(doc, win, at)
}

/// Move to the leftmost editable offset.
pub fn line_start(doc: &mut Document, win: Window) -> Redraw {
    let at = doc.active_line().margin();
    land(doc, win, at)
}

/// Move past the last character of the line.
pub fn line_end(doc: &mut Document, win: Window) -> Redraw {
    let at = doc.active_line().len();
    land(doc, win, at)
}

/// Move to the next line, cursor at column zero. Re-centers the
/// viewport when the bottom boundary would be crossed or a horizontal
/// scroll was active.
pub fn next_line(doc: &mut Document, win: Window) -> Redraw {
    if doc.mode() == Mode::Minibuffer {
        return Redraw::Cursor;
    }
    if doc.current() + 1 >= doc.line_count() {
        return Redraw::Cursor;
    }
    let cur = doc.current() + 1;
    doc.set_current(cur);
    doc.line_mut(cur).set_cursor(0);
    let mut refit = cur - doc.viewport.v_offset >= win.text_rows();
    if doc.viewport.h_offset != 0 {
        doc.viewport.h_offset = 0;
        refit = true;
    }
    if refit {
        recenter(doc, win)
    } else {
        Redraw::Cursor
    }
}

/// Move to the previous line, cursor at column zero.
pub fn previous_line(doc: &mut Document, win: Window) -> Redraw {
    if doc.mode() == Mode::Minibuffer {
        return Redraw::Cursor;
    }
    if doc.current() == 0 {
        return Redraw::Cursor;
    }
    let cur = doc.current() - 1;
    doc.set_current(cur);
    doc.line_mut(cur).set_cursor(0);
    let mut refit = cur < doc.viewport.v_offset;
    if doc.viewport.h_offset != 0 {
        doc.viewport.h_offset = 0;
        refit = true;
    }
    if refit {
        recenter(doc, win)
    } else {
        Redraw::Cursor
    }
}

/// Jump one window height down, clamped to the last line. The new
/// current line becomes the top visible row.
pub fn page_down(doc: &mut Document, win: Window) -> Redraw {
    if doc.mode() == Mode::Minibuffer {
        return Redraw::Cursor;
    }
    let next = (doc.current() + win.text_rows()).min(doc.line_count() - 1);
    doc.set_current(next);
    doc.viewport.v_offset = next;
    Redraw::Whole
}

/// Jump one window height up, clamped to the first line.
pub fn page_up(doc: &mut Document, win: Window) -> Redraw {
    if doc.mode() == Mode::Minibuffer {
        return Redraw::Cursor;
    }
    let next = doc.current().saturating_sub(win.text_rows());
    doc.set_current(next);
    doc.viewport.v_offset = next;
    Redraw::Whole
}

/// Move to the first line of the document.
pub fn document_start(doc: &mut Document, win: Window) -> Redraw {
    if doc.mode() == Mode::Minibuffer {
        return Redraw::Cursor;
    }
    doc.set_current(0);
    doc.line_mut(0).set_cursor(0);
    doc.viewport.h_offset = 0;
    recenter(doc, win)
}

/// Move to the last line of the document.
pub fn document_end(doc: &mut Document, win: Window) -> Redraw {
    if doc.mode() == Mode::Minibuffer {
        return Redraw::Cursor;
    }
    let last = doc.line_count() - 1;
    doc.set_current(last);
    doc.line_mut(last).set_cursor(0);
    doc.viewport.h_offset = 0;
    recenter(doc, win)
}

/// Center the viewport on the cursor without moving it.
pub fn center_on_cursor(doc: &mut Document, win: Window) -> Redraw {
    if doc.mode() == Mode::Minibuffer {
        return Redraw::Cursor;
    }
    recenter(doc, win)
}

/// Jump to 1-based line `number`, clamped to the document, and center.
/// Zero is a no-op (the goto prompt parses unparsable input to zero).
pub fn goto_line(doc: &mut Document, win: Window, number: usize) -> Redraw {
    if doc.mode() == Mode::Minibuffer {
        return Redraw::Cursor;
    }
    if number == 0 {
        return Redraw::Cursor;
    }
    let target = number.min(doc.line_count()) - 1;
    doc.set_current(target);
    let cursor = doc.line(target).cursor();
    doc.viewport.scroll_to_col(cursor, 0, win.text_cols());
    recenter(doc, win)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit;

    const WIN: Window = Window { cols: 80, rows: 24 };

    fn doc_from(text: &str) -> Document {
        Document::from_text(text).unwrap()
    }

    #[test]
    fn test_forward_backward_at_boundaries() {
        let mut doc = doc_from("ab");
        assert_eq!(backward_char(&mut doc, WIN), Redraw::Cursor);
        doc.line_mut(0).set_cursor(2);
        assert_eq!(forward_char(&mut doc, WIN), Redraw::Cursor);
    }

    #[test]
    fn test_tab_is_one_step_each_direction() {
        let mut doc = Document::new();
        edit::insert_tab(&mut doc, WIN).unwrap();
        assert_eq!(doc.line(0).len(), tabs::TAB_WIDTH);

        doc.line_mut(0).set_cursor(0);
        forward_char(&mut doc, WIN);
        assert_eq!(doc.line(0).cursor(), tabs::TAB_WIDTH);
        backward_char(&mut doc, WIN);
        assert_eq!(doc.line(0).cursor(), 0);
    }

    #[test]
    fn test_forward_word() {
        let mut doc = doc_from("one  two");
        forward_word(&mut doc, WIN);
        assert_eq!(doc.line(0).cursor(), 3);
        forward_word(&mut doc, WIN);
        assert_eq!(doc.line(0).cursor(), 8);
        // At the end of line: stays put.
        forward_word(&mut doc, WIN);
        assert_eq!(doc.line(0).cursor(), 8);
    }

    #[test]
    fn test_backward_word() {
        let mut doc = doc_from("one  two");
        doc.line_mut(0).set_cursor(8);
        backward_word(&mut doc, WIN);
        // Lands on the space before the word, mirroring forward
        // movement landing after it.
        assert_eq!(doc.line(0).cursor(), 4);
        backward_word(&mut doc, WIN);
        assert_eq!(doc.line(0).cursor(), 0);
    }

    #[test]
    fn test_line_start_and_end() {
        let mut doc = doc_from("hello");
        doc.line_mut(0).set_cursor(3);
        line_start(&mut doc, WIN);
        assert_eq!(doc.line(0).cursor(), 0);
        line_end(&mut doc, WIN);
        assert_eq!(doc.line(0).cursor(), 5);
    }

    #[test]
    fn test_line_end_scrolls_long_line() {
        let mut doc = doc_from(&"x".repeat(200));
        let d = line_end(&mut doc, WIN);
        assert_eq!(d, Redraw::Whole);
        assert_eq!(doc.line(0).cursor(), 200);
        // Cursor visible: h <= 200 < h + 79.
        let h = doc.viewport.h_offset;
        assert!(h <= 200 && 200 - h < WIN.text_cols());
    }

    #[test]
    fn test_next_previous_line_reset_cursor() {
        let mut doc = doc_from("abc\ndef\nghi");
        doc.line_mut(0).set_cursor(2);
        assert_eq!(next_line(&mut doc, WIN), Redraw::Cursor);
        assert_eq!(doc.current(), 1);
        assert_eq!(doc.line(1).cursor(), 0);
        previous_line(&mut doc, WIN);
        assert_eq!(doc.current(), 0);
        assert_eq!(doc.line(0).cursor(), 0);
    }

    #[test]
    fn test_next_line_at_bottom_recenters() {
        let text = vec!["line"; 50].join("\n");
        let mut doc = doc_from(&text);
        let win = Window { cols: 80, rows: 10 };
        // Walk to the last visible row, then one more.
        for _ in 0..win.text_rows() {
            next_line(&mut doc, win);
        }
        assert_eq!(doc.current(), 9);
        assert_eq!(doc.viewport.v_offset, doc.current() - win.rows / 2);
        assert!(doc.is_well_formed());
    }

    #[test]
    fn test_movement_at_document_bounds_is_noop() {
        let mut doc = doc_from("a\nb");
        assert_eq!(previous_line(&mut doc, WIN), Redraw::Cursor);
        doc.set_current(1);
        assert_eq!(next_line(&mut doc, WIN), Redraw::Cursor);
    }

    #[test]
    fn test_page_down_clamps_and_pins_viewport() {
        let text = vec!["x"; 100].join("\n");
        let mut doc = doc_from(&text);
        let win = Window { cols: 80, rows: 24 };
        assert_eq!(page_down(&mut doc, win), Redraw::Whole);
        assert_eq!(doc.current(), 23);
        assert_eq!(doc.viewport.v_offset, 23);

        // Near the end: clamps to the last line.
        for _ in 0..10 {
            page_down(&mut doc, win);
        }
        assert_eq!(doc.current(), 99);
        assert_eq!(doc.viewport.v_offset, 99);
    }

    #[test]
    fn test_page_up_clamps_to_first_line() {
        let mut doc = doc_from("a\nb\nc");
        doc.set_current(2);
        doc.viewport.v_offset = 2;
        assert_eq!(page_up(&mut doc, WIN), Redraw::Whole);
        assert_eq!(doc.current(), 0);
        assert_eq!(doc.viewport.v_offset, 0);
    }

    #[test]
    fn test_document_bounds_center_viewport() {
        let text = vec!["x"; 100].join("\n");
        let mut doc = doc_from(&text);
        document_end(&mut doc, WIN);
        assert_eq!(doc.current(), 99);
        assert_eq!(doc.viewport.v_offset, 99 - WIN.rows / 2);
        document_start(&mut doc, WIN);
        assert_eq!(doc.current(), 0);
        assert_eq!(doc.viewport.v_offset, 0);
    }

    #[test]
    fn test_goto_line_clamps() {
        let mut doc = doc_from("a\nb\nc");
        goto_line(&mut doc, WIN, 2);
        assert_eq!(doc.current(), 1);
        goto_line(&mut doc, WIN, 999);
        assert_eq!(doc.current(), 2);
        let before = doc.current();
        goto_line(&mut doc, WIN, 0);
        assert_eq!(doc.current(), before);
    }

    #[test]
    fn test_line_movement_suppressed_in_minibuffer() {
        let mut doc = doc_from("a\nb");
        doc.activate_prompt("p: ", crate::minibuffer::PromptKind::Search)
            .unwrap();
        assert_eq!(next_line(&mut doc, WIN), Redraw::Cursor);
        assert_eq!(page_down(&mut doc, WIN), Redraw::Cursor);
        assert_eq!(document_end(&mut doc, WIN), Redraw::Cursor);
        assert_eq!(doc.current(), 0);
    }

    #[test]
    fn test_char_movement_works_in_minibuffer() {
        let mut doc = Document::new();
        doc.activate_prompt("p: ", crate::minibuffer::PromptKind::Search)
            .unwrap();
        edit::insert_char(&mut doc, WIN, 'a').unwrap();
        edit::insert_char(&mut doc, WIN, 'b').unwrap();
        backward_char(&mut doc, WIN);
        assert_eq!(doc.active_line().cursor(), 4);
        // Margin bounds the movement.
        backward_char(&mut doc, WIN);
        assert_eq!(backward_char(&mut doc, WIN), Redraw::Cursor);
        assert_eq!(doc.active_line().cursor(), 3);
    }
}
