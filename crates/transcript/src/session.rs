use uuid::Uuid;

use crate::message::Message;

/// Which transcript file, if any, the session saves to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Binding {
    /// No file has been chosen yet. The first save allocates one.
    #[default]
    Unbound,
    /// Every save overwrites this file.
    Bound(String),
}

/// The in-memory state of one conversation.
///
/// A session starts [`Unbound`](Binding::Unbound) with a random identifier.
/// Once bound, the file name sticks until the caller either starts a new
/// conversation or loads another transcript.
#[derive(Clone, Debug)]
pub struct Session {
    messages: Vec<Message>,
    conversation_id: String,
    binding: Binding,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an empty, unbound session.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            conversation_id: Uuid::new_v4().to_string(),
            binding: Binding::Unbound,
        }
    }

    /// Returns the messages in insertion order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Appends a message.
    #[inline]
    pub fn push(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    /// Returns the conversation identifier.
    ///
    /// This is a random UUID until the session is bound, and the file stem
    /// (e.g. `20250418-01`) afterwards.
    #[inline]
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Returns the current binding.
    #[inline]
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Returns the bound file name, if any.
    #[inline]
    pub fn current_file(&self) -> Option<&str> {
        match &self.binding {
            Binding::Unbound => None,
            Binding::Bound(filename) => Some(filename),
        }
    }

    /// Drops all messages and the binding, and picks a fresh identifier.
    pub fn start_new_conversation(&mut self) {
        self.messages.clear();
        self.conversation_id = Uuid::new_v4().to_string();
        self.binding = Binding::Unbound;
        debug!("started conversation {}", self.conversation_id);
    }

    pub(crate) fn bind(&mut self, filename: String) {
        self.conversation_id = file_stem(&filename).to_owned();
        self.binding = Binding::Bound(filename);
    }

    pub(crate) fn replace(&mut self, filename: String, messages: Vec<Message>) {
        self.messages = messages;
        self.bind(filename);
    }
}

#[inline]
pub(crate) fn file_stem(filename: &str) -> &str {
    filename.strip_suffix(".md").unwrap_or(filename)
}
