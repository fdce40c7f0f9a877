//! Markdown transcript persistence.
//!
//! A transcript is one linear conversation between a user and an assistant,
//! stored as one human-readable markdown file named `YYYYMMDD-NN.md`. This
//! crate allocates those file names, renders conversations into the on-disk
//! format, parses them back, and keeps track of which file the current
//! conversation is saved to.
//!
//! Reading is lenient: a document without any turn headings simply yields
//! no messages. Writing is strict: every filesystem failure is returned to
//! the caller, and the in-memory conversation is never discarded.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod format;
mod message;
mod naming;
mod parser;
mod session;
mod store;

pub use error::{Error, ErrorKind};
pub use format::serialize;
pub use message::{Message, Role};
pub use naming::{
    MAX_SEQUENCE, is_transcript_filename, list_transcripts, next_filename,
};
pub use parser::{parse, parse_file};
pub use session::{Binding, Session};
pub use store::TranscriptStore;
