//! Error type.

use std::fmt;
use std::io;

/// Alias for `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The errors an edit session can conclude with.
///
/// The first error recorded during a session is sticky: it is the session's
/// final result regardless of anything that happens afterwards.
#[derive(Debug)]
pub enum Error {
    /// The engine issued a status event the current state has no transition
    /// for.
    Protocol,
    /// The engine rejected the supplied expiration date.
    InvalidTime,
    /// The key is already signed by the selected signing key.
    Conflict,
    /// The key cannot be signed because it has expired or is otherwise
    /// unusable.
    UnusableKey,
    /// A command was requested for a state that defines none. This indicates
    /// a bug in an interactor, not a user-facing condition.
    Bug,
    /// Writing to the command channel failed.
    Io(io::Error),
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Self::Protocol => Self::Protocol,
            Self::InvalidTime => Self::InvalidTime,
            Self::Conflict => Self::Conflict,
            Self::UnusableKey => Self::UnusableKey,
            Self::Bug => Self::Bug,
            Self::Io(e) => Self::Io(io::Error::new(e.kind(), e.to_string())),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Protocol => write!(f, "unexpected response from the engine"),
            Error::InvalidTime => write!(f, "invalid expiration date"),
            Error::Conflict => write!(f, "key is already signed"),
            Error::UnusableKey => write!(f, "key is expired or otherwise unusable"),
            Error::Bug => write!(f, "internal error in the edit state machine"),
            Error::Io(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
