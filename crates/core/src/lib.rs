//! Chat orchestration: user input, model call, and transcript saving.
//!
//! Each user turn makes at most one request to the model and, when the
//! model answers, at most one save of the whole transcript. A failed model
//! call persists nothing. A failed save is reported without losing any
//! message from memory.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod chat;
mod error;
mod model_client;

pub use chat::{Chat, ChatBuilder, TurnOutcome};
pub use error::ChatError;

/// Re-exports of [`vault_chat_transcript`] crate.
pub mod transcript {
    pub use vault_chat_transcript::*;
}
