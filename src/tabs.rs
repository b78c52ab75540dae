//! Tab stop model.
//!
//! A tab is stored as a literal `'\t'` followed by [`PAD`] placeholder
//! scalars up to the next multiple of [`TAB_WIDTH`]. The run is
//! self-describing: column arithmetic needs no second, expanded
//! representation of the line. Placeholders are never addressable on
//! their own — cursor movement treats a tab plus its padding as one
//! unit, and they are elided from saved files and the yank register.

/// Number of columns a tab stop spans.
pub const TAB_WIDTH: usize = 8;

/// Placeholder scalar used as tab padding. Private-use, so it can never
/// collide with loaded text.
pub const PAD: char = '\u{E000}';

/// Whether `c` is the tab padding placeholder.
#[must_use]
pub fn is_pad(c: char) -> bool {
    c == PAD
}

/// The first tab stop strictly after column `col`.
#[must_use]
pub fn next_stop(col: usize) -> usize {
    (col / TAB_WIDTH) * TAB_WIDTH + TAB_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_stop() {
        assert_eq!(next_stop(0), 8);
        assert_eq!(next_stop(7), 8);
        assert_eq!(next_stop(8), 16);
        assert_eq!(next_stop(12), 16);
    }

    #[test]
    fn test_pad_is_not_tab() {
        assert!(is_pad(PAD));
        assert!(!is_pad('\t'));
        assert!(!is_pad(' '));
    }

    #[test]
    fn test_pad_is_private_use() {
        // Must never collide with anything a file can contain after
        // lossy UTF-8 decoding of ordinary text.
        assert!(!PAD.is_ascii());
        assert_eq!(PAD as u32, 0xE000);
    }
}
