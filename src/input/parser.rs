//! Byte-stream input parser.
//!
//! Push one byte at a time; a complete key event comes back as soon as
//! the sequence is unambiguous. Handles control bytes, `ESC x` as
//! Alt+x, the common CSI sequences (arrows, Home/End, PageUp/PageDown,
//! Delete), and multi-byte UTF-8. Unrecognized sequences are dropped.

use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Ground,
    Escape,
    Csi,
    Utf8 {
        need: usize,
    },
}

/// Parser state for multi-byte sequences.
#[derive(Clone, Debug, Default)]
pub struct InputParser {
    state: State,
    pending: Vec<u8>,
}

impl InputParser {
    /// Create a new input parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns a complete key event when one is formed.
    pub fn advance(&mut self, byte: u8) -> Option<KeyEvent> {
        match self.state {
            State::Ground => self.ground(byte),
            State::Escape => self.escape(byte),
            State::Csi => self.csi(byte),
            State::Utf8 { need } => self.utf8(byte, need),
        }
    }

    fn ground(&mut self, byte: u8) -> Option<KeyEvent> {
        match byte {
            0x1b => {
                self.state = State::Escape;
                None
            }
            0x0a | 0x0d => Some(KeyEvent::key(KeyCode::Enter)),
            0x09 => Some(KeyEvent::key(KeyCode::Tab)),
            0x7f | 0x08 => Some(KeyEvent::key(KeyCode::Backspace)),
            0x01..=0x1a => {
                // Ctrl+A through Ctrl+Z.
                let c = (byte - 1 + b'a') as char;
                Some(KeyEvent::ctrl(c))
            }
            0x20..=0x7e => Some(KeyEvent::char(byte as char)),
            0xc2..=0xdf => {
                self.begin_utf8(byte, 1);
                None
            }
            0xe0..=0xef => {
                self.begin_utf8(byte, 2);
                None
            }
            0xf0..=0xf4 => {
                self.begin_utf8(byte, 3);
                None
            }
            // Remaining control bytes and stray continuation bytes.
            _ => None,
        }
    }

    fn escape(&mut self, byte: u8) -> Option<KeyEvent> {
        match byte {
            b'[' | b'O' => {
                self.state = State::Csi;
                self.pending.clear();
                None
            }
            0x1b => Some(KeyEvent::key(KeyCode::Esc)),
            0x01..=0x1a => {
                self.state = State::Ground;
                let c = (byte - 1 + b'a') as char;
                Some(KeyEvent::new(
                    KeyCode::Char(c),
                    KeyModifiers::CTRL | KeyModifiers::ALT,
                ))
            }
            0x20..=0x7e => {
                self.state = State::Ground;
                Some(KeyEvent::alt(byte as char))
            }
            _ => {
                self.state = State::Ground;
                None
            }
        }
    }

    fn csi(&mut self, byte: u8) -> Option<KeyEvent> {
        // Parameter bytes accumulate until a final byte arrives.
        if !(0x40..=0x7e).contains(&byte) {
            self.pending.push(byte);
            return None;
        }
        self.state = State::Ground;
        let params = std::mem::take(&mut self.pending);
        let code = match byte {
            b'A' => Some(KeyCode::Up),
            b'B' => Some(KeyCode::Down),
            b'C' => Some(KeyCode::Right),
            b'D' => Some(KeyCode::Left),
            b'H' => Some(KeyCode::Home),
            b'F' => Some(KeyCode::End),
            b'~' => match params.split(|&b| b == b';').next().unwrap_or(&[]) {
                b"1" | b"7" => Some(KeyCode::Home),
                b"3" => Some(KeyCode::Delete),
                b"4" | b"8" => Some(KeyCode::End),
                b"5" => Some(KeyCode::PageUp),
                b"6" => Some(KeyCode::PageDown),
                _ => None,
            },
            _ => None,
        };
        code.map(KeyEvent::key)
    }

    fn begin_utf8(&mut self, byte: u8, need: usize) {
        self.state = State::Utf8 { need };
        self.pending.clear();
        self.pending.push(byte);
    }

    fn utf8(&mut self, byte: u8, need: usize) -> Option<KeyEvent> {
        if !(0x80..=0xbf).contains(&byte) {
            // Broken sequence: drop it and reparse this byte.
            self.state = State::Ground;
            self.pending.clear();
            return self.advance(byte);
        }
        self.pending.push(byte);
        if need > 1 {
            self.state = State::Utf8 { need: need - 1 };
            return None;
        }
        self.state = State::Ground;
        let bytes = std::mem::take(&mut self.pending);
        std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .map(KeyEvent::char)
    }
}
