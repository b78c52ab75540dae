//! `ted` binary: terminal setup, the synchronous input loop, and
//! teardown.
//!
//! # Usage
//!
//! ```bash
//! ted FILE
//! ```
//!
//! A missing file opens an empty buffer and is created on save. Set
//! `TED_LOG=path` to append diagnostics to a file.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use ted::{
    Editor, InputParser, Step, Window, enable_raw_mode, install_resize_handler, is_tty,
    set_log_callback, take_resize, terminal_size,
};

const USAGE: &str = "usage: ted FILE";

fn main() {
    let Some(path) = parse_args() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    if let Err(e) = run(path) {
        eprintln!("ted: {e}");
        std::process::exit(1);
    }
}

fn parse_args() -> Option<PathBuf> {
    let mut args = std::env::args_os().skip(1);
    let path = args.next()?;
    if args.next().is_some() {
        return None;
    }
    Some(PathBuf::from(path))
}

fn install_file_logger() {
    let Ok(log_path) = std::env::var("TED_LOG") else {
        return;
    };
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };
    let file = Mutex::new(file);
    set_log_callback(move |level, message| {
        if let Ok(mut f) = file.lock() {
            let _ = writeln!(f, "[{level}] {message}");
        }
    });
}

fn run(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    install_file_logger();

    if !is_tty(&io::stdout()) {
        return Err("stdout is not a terminal".into());
    }

    let size = terminal_size()?;
    let win = Window::new(size.0, size.1);

    // Raw mode is restored when the guard drops, error or not.
    let _raw = enable_raw_mode()?;
    install_resize_handler()?;

    let stdout = io::stdout().lock();
    let mut editor = Editor::open(&path, stdout, win)?;
    editor.draw_initial()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut parser = InputParser::new();
    let mut byte = [0u8; 1];

    loop {
        if take_resize() {
            let size = terminal_size()?;
            editor.handle_resize(Window::new(size.0, size.1))?;
        }
        match input.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                if let Some(key) = parser.advance(byte[0]) {
                    if editor.handle_key(key)? == Step::Quit {
                        break;
                    }
                }
            }
            // A signal (resize) interrupted the read; poll the flag and
            // carry on.
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }

    editor.screen_mut().clear()?;
    Ok(())
}
