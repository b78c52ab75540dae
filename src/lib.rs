//! `ted` — a minimal Emacs-flavored terminal text editor.
//!
//! The editing core is an in-memory multi-line character buffer with
//! cursor and viewport tracking, plus an incremental renderer that
//! repaints only the screen regions an edit disturbed — single cells on
//! ordinary keystrokes, never a full repaint unless the viewport moved.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::module_name_repetitions)] // Allow KeyCode, KeyEvent etc in input::keyboard
#![allow(clippy::missing_errors_doc)] // Error conditions follow the crate Error enum
#![allow(clippy::missing_panics_doc)] // Public paths do not panic outside debug asserts
#![allow(clippy::must_use_candidate)] // Accessors are obvious enough
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts

pub mod ansi;
pub mod document;
pub mod edit;
pub mod editor;
pub mod error;
pub mod file;
pub mod input;
pub mod keymap;
pub mod line;
pub mod log;
pub mod minibuffer;
pub mod motion;
pub mod redraw;
pub mod screen;
pub mod tabs;
pub mod terminal;

// Re-export core types at crate root
pub use document::{Document, Mode, Viewport};
pub use edit::YankRegister;
pub use editor::{Editor, Step};
pub use error::{Error, Result};
pub use line::Line;
pub use log::{LogLevel, emit_log, set_log_callback};
pub use minibuffer::{MAX_PROMPT_LEN, Minibuffer, PromptKind};
pub use redraw::Redraw;
pub use screen::{Screen, Window};

// Re-export input types
pub use input::{InputParser, KeyCode, KeyEvent, KeyModifiers};
pub use keymap::{Command, Keymap};

// Re-export terminal helpers
pub use terminal::{
    RawModeGuard, enable_raw_mode, install_resize_handler, is_tty, take_resize, terminal_size,
};
