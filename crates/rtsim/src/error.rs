//! Error types for rtsim

use std::fmt;
use std::io;

/// Result type alias for rtsim operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading inputs or fetching from a source
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Malformed trace or table
    Parse(String),

    /// Key absent from the table source
    MissingKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::MissingKey(key) => write!(f, "Key not found in table: {}", key),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        Error::Parse(format!("{:?}", err))
    }
}
