use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The endpoint answered with a non-success status.
    Status,
    /// The request never got an answer (network failure, bad URL, etc.)
    Transport,
    /// The endpoint answered, but the body is not JSON.
    InvalidBody,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Status => write!(f, "Unexpected status"),
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::InvalidBody => write!(f, "Invalid body"),
            ErrorKind::Other => write!(f, "Other error"),
        }
    }
}
