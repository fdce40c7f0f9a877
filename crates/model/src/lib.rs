//! An abstraction layer for text-completion providers.
//!
//! This crate establishes the protocol the chat uses to talk to a remote
//! model: an ordered list of messages goes in, and either the generated
//! text or a classified failure comes out. Keeping it separate lets the
//! chat switch between providers, including a scripted fake for tests,
//! without touching the rest of the codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
