//! Error types for ted.

use std::collections::TryReserveError;
use std::fmt;
use std::io;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for editor operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal or file operations.
    Io(io::Error),
    /// Line or document storage could not grow. Fatal: buffer invariants
    /// cannot be maintained past a failed allocation.
    OutOfMemory,
    /// Minibuffer content exceeded the prompt length limit.
    PromptTooLong { len: usize, max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OutOfMemory => write!(f, "out of memory growing buffer storage"),
            Self::PromptTooLong { len, max } => {
                write!(f, "prompt input of {len} characters exceeds limit of {max}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfMemory;
        assert!(err.to_string().contains("out of memory"));

        let err = Error::PromptTooLong { len: 300, max: 256 };
        assert!(err.to_string().contains("300"));
        assert!(err.to_string().contains("256"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_reserve_error_conversion() {
        let mut v: Vec<u8> = Vec::new();
        let reserve_err = v.try_reserve(usize::MAX).unwrap_err();
        let err: Error = reserve_err.into();
        assert!(matches!(err, Error::OutOfMemory));
    }
}
