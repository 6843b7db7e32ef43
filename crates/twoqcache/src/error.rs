//! Error types for twoqcache

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache constructed with an unusable total capacity
    InvalidConfiguration(String),

    /// Missing key or value supplied to an operation
    InvalidArgument(String),

    /// Segment bookkeeping found inconsistent during a trim pass
    InvariantViolation(String),
}

impl Error {
    /// True for errors that indicate a defect in the cache itself rather
    /// than bad input from the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InvariantViolation(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvariantViolation(msg) => write!(f, "Internal invariant violation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
