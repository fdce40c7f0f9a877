use std::fmt::{self, Display};

/// The author of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The human side of the conversation.
    User,
    /// The model side of the conversation.
    Assistant,
}

impl Role {
    /// Returns the lowercase wire name, e.g. `"user"`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Returns the capitalized name used in turn headings.
    #[inline]
    pub(crate) fn heading(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn in a transcript.
///
/// The content is always stored trimmed, so what is kept in memory is
/// exactly what a saved transcript gives back when it is loaded again.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Creates a message, trimming leading and trailing whitespace.
    pub fn new<S: AsRef<str>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.as_ref().trim().to_owned(),
        }
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: AsRef<str>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: AsRef<str>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns the author of this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the trimmed content.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }
}
