use std::fmt;
use std::io;

use thiserror::Error;

/// Which side of the request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be completed (connect, timeout, bad URL).
    Transport,
    /// The server answered, but with a non-success status or an unusable body.
    Response,
}

/// Opaque failure payload carried into `FetchState::last_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn response(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Response,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Transport => write!(f, "transport error: {}", self.message),
            ErrorKind::Response => write!(f, "response error: {}", self.message),
        }
    }
}

/// Failure of a durable key/value write. Never fatal to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode stored values: {0}")]
    Serialize(String),
}
