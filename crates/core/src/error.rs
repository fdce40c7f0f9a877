use std::error::Error as StdError;
use std::fmt::{self, Display};

use vault_chat_model::{ErrorKind as ModelErrorKind, ModelProviderError};
use vault_chat_transcript::Error as StoreError;

/// Describes why a chat operation failed.
#[derive(Debug)]
pub enum ChatError {
    /// The input was empty after trimming.
    EmptyInput,
    /// The model answered with nothing but whitespace.
    EmptyReply,
    /// The model provider failed.
    Model(Box<dyn ModelProviderError>),
    /// Listing, loading, or saving transcripts failed.
    Store(StoreError),
}

impl ChatError {
    /// Returns the provider error kind if the model call failed.
    #[inline]
    pub fn model_error_kind(&self) -> Option<ModelErrorKind> {
        match self {
            ChatError::Model(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::EmptyInput => write!(f, "Nothing to send"),
            ChatError::EmptyReply => write!(f, "The model returned no text"),
            ChatError::Model(err) => write!(f, "{}: {err}", err.kind()),
            ChatError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl StdError for ChatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChatError::Model(err) => {
                Some(err.as_ref() as &(dyn StdError + 'static))
            }
            ChatError::Store(err) => Some(err as &(dyn StdError + 'static)),
            _ => None,
        }
    }
}

impl From<StoreError> for ChatError {
    #[inline]
    fn from(err: StoreError) -> Self {
        ChatError::Store(err)
    }
}
