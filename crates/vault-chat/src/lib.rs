//! A terminal chat that keeps every conversation as a markdown transcript.
//!
//! The crate includes a CLI tool for using in the terminal. The pieces it
//! is made of, configuration and command parsing, are exposed here so that
//! other front-ends can reuse them.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod command;
pub mod config;
mod hint;

pub use command::{Command, LoadTarget};
pub use config::{Config, ConfigError};
pub use hint::model_error_hint;

/// Re-exports of [`vault_chat_core`] crate.
pub mod core {
    pub use vault_chat_core::*;
}
