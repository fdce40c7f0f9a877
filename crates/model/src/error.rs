use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The API key is invalid, expired, or lacks access.
    Unauthorized,
    /// The model provider is rate limited, or the quota is used up.
    RateLimitExceeded,
    /// The requested model does not exist.
    ModelNotFound,
    /// The provider did not answer in time.
    Timeout,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unauthorized => write!(f, "Unauthorized"),
            ErrorKind::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ErrorKind::ModelNotFound => write!(f, "Model not found"),
            ErrorKind::Timeout => write!(f, "Request timed out"),
            ErrorKind::Other => write!(f, "Provider error"),
        }
    }
}
