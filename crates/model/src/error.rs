use std::fmt::{self, Display};

/// The kind of error a model provider reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The content was rejected by moderation.
    Moderated,
    /// The provider refused the request because of rate limits.
    RateLimitExceeded,
    /// Transport, decoding and every other failure.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Moderated => write!(f, "moderated"),
            ErrorKind::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}
