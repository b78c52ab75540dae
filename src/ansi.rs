//! Constant ANSI escape sequences and sequence writers.
//!
//! The renderer needs only cursor positioning, line/screen erasure, and
//! inverse video for the infobar; nothing else is emitted.

use std::io::{self, Write};

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[1;1H";

/// Clear from cursor to end of line.
pub const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Enable inverse video.
pub const INVERT: &str = "\x1b[7m";

/// Disable inverse video.
pub const REVERT: &str = "\x1b[27m";

/// Write a cursor-position sequence for 0-based `row`/`col`.
pub fn write_cursor_position<W: Write>(out: &mut W, row: usize, col: usize) -> io::Result<()> {
    write!(out, "\x1b[{};{}H", row + 1, col + 1)
}
