//! Raw mode terminal handling and the resize flag.
//!
//! Raw mode disables line buffering and echo so input arrives one byte
//! at a time; the saved state is restored when the guard drops. The
//! `SIGWINCH` handler does nothing but set a process-wide flag, which
//! the input loop polls once per iteration.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios, ioctl,
//! and sigaction. These are necessary for low-level terminal control
//! and cannot be avoided.

#![allow(unsafe_code)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::sync::atomic::{AtomicBool, Ordering};

/// Saved terminal state for restoration.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Enter raw mode on the given file descriptor.
    ///
    /// Returns a guard that will restore the terminal state when dropped.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;

        // Input modes: no break, no CR to NL, no parity check, no strip
        // char, no start/stop output control.
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);

        // Control modes: set 8 bit chars
        raw.c_cflag |= libc::CS8;

        // Local modes: echo off, canonical off, no extended functions,
        // no signal chars (^C, ^Z, etc)
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

        // Control characters: block until one byte is available.
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        set_termios(fd, &raw)?;

        Ok(Self { fd, original })
    }

    /// Restore the original terminal state.
    fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Enter raw mode for stdin.
///
/// Returns a guard that restores the terminal when dropped.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get the terminal size as `(cols, rows)`.
///
/// Returns an error if the size cannot be determined or either
/// dimension is zero.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigwinch(_: libc::c_int) {
    // Only the flag store is allowed here; everything else happens in
    // the input loop.
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

/// Install the `SIGWINCH` handler that sets the resize flag.
///
/// Installed without `SA_RESTART`, so a blocking read returns
/// `Interrupted` and the loop notices the resize immediately.
pub fn install_resize_handler() -> io::Result<()> {
    // SAFETY: sigaction with a zeroed struct, an empty mask, and a
    // handler that only stores to an atomic is async-signal-safe.
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_sigwinch as libc::sighandler_t;
        libc::sigemptyset(&raw mut action.sa_mask);
        action.sa_flags = 0;
        if libc::sigaction(libc::SIGWINCH, &raw const action, std::ptr::null_mut()) == -1 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Consume the pending-resize flag.
pub fn take_resize() -> bool {
    RESIZE_PENDING.swap(false, Ordering::Relaxed)
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &raw mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tty_does_not_panic() {
        let _ = is_tty(&io::stdin());
        let _ = is_tty(&io::stdout());
    }

    #[test]
    fn test_is_tty_file_returns_false() {
        let file = tempfile::tempfile().expect("create temp file");
        assert!(!is_tty(&file));
    }

    #[test]
    fn test_terminal_size_does_not_panic() {
        // Might fail in CI without a TTY, but must not panic.
        let _ = terminal_size();
    }

    #[test]
    fn test_terminal_size_valid_dimensions() {
        if let Ok((cols, rows)) = terminal_size() {
            assert!(cols > 0);
            assert!(rows > 0);
        }
    }

    #[test]
    fn test_resize_flag_swap() {
        RESIZE_PENDING.store(true, Ordering::Relaxed);
        assert!(take_resize());
        assert!(!take_resize());
    }

    #[test]
    fn test_get_termios_with_invalid_fd_fails() {
        assert!(get_termios(-1).is_err());
    }

    #[test]
    fn test_set_termios_with_invalid_fd_fails() {
        let termios: libc::termios = unsafe { std::mem::zeroed() };
        assert!(set_termios(-1, &termios).is_err());
    }
}
