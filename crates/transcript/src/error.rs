use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::io;
use std::path::Path;

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The transcript directory exists but cannot be listed.
    DirectoryUnavailable,
    /// A transcript file cannot be opened or decoded.
    Unreadable,
    /// A transcript could not be written.
    WriteFailed,
    /// All two-digit sequence numbers for the day are taken.
    SequenceOverflow,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::DirectoryUnavailable => {
                write!(f, "Directory unavailable")
            }
            ErrorKind::Unreadable => write!(f, "Unreadable transcript"),
            ErrorKind::WriteFailed => write!(f, "Write failed"),
            ErrorKind::SequenceOverflow => write!(f, "Sequence overflow"),
        }
    }
}

/// Error type for transcript operations.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    reason: String,
    source: Option<io::Error>,
}

impl Error {
    pub(crate) fn directory_unavailable(dir: &Path, source: io::Error) -> Self {
        Self {
            kind: ErrorKind::DirectoryUnavailable,
            reason: format!("cannot list {}", dir.display()),
            source: Some(source),
        }
    }

    pub(crate) fn unreadable<S: Into<String>>(reason: S) -> Self {
        Self {
            kind: ErrorKind::Unreadable,
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn unreadable_file(path: &Path, source: io::Error) -> Self {
        Self {
            kind: ErrorKind::Unreadable,
            reason: format!("cannot read {}", path.display()),
            source: Some(source),
        }
    }

    pub(crate) fn write_failed(path: &Path, source: io::Error) -> Self {
        Self {
            kind: ErrorKind::WriteFailed,
            reason: format!("cannot write {}", path.display()),
            source: Some(source),
        }
    }

    pub(crate) fn sequence_overflow(day: &str) -> Self {
        Self {
            kind: ErrorKind::SequenceOverflow,
            reason: format!("no sequence number left for {day}"),
            source: None,
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns a human-readable reason, without the kind prefix.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.reason)?;
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}
