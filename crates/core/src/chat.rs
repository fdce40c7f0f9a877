mod builder;

use std::path::PathBuf;

use vault_chat_model::{ModelFinishReason, ModelMessage, ModelRequest};
use vault_chat_transcript::{
    Error as StoreError, Message, Role, Session, TranscriptStore,
};

pub use builder::ChatBuilder;

use crate::error::ChatError;
use crate::model_client::ModelClient;

/// What a successful model turn produced.
#[derive(Debug)]
pub struct TurnOutcome {
    /// The assistant reply, trimmed.
    pub reply: String,
    /// Whether the model stopped because of its token limit.
    pub truncated: bool,
    /// Where the transcript was saved, or why saving failed. Either way
    /// the reply stays in the conversation.
    pub saved: Result<PathBuf, StoreError>,
}

/// A conversation with a model, saved to a transcript directory.
///
/// The chat owns the [`Session`], and is the only thing that changes it.
pub struct Chat {
    model_client: ModelClient,
    store: TranscriptStore,
    session: Session,
    system_prompt: String,
    temperature: f32,
}

impl Chat {
    /// Sends one user message and waits for the assistant.
    ///
    /// The user message is kept in the conversation even if the model call
    /// fails, but nothing is saved in that case. When the model answers,
    /// the reply is appended and the whole transcript is saved.
    pub async fn send_message(
        &mut self,
        input: &str,
    ) -> Result<TurnOutcome, ChatError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        self.session.push(Message::user(input));

        let request = self.build_model_request();
        let reply = self
            .model_client
            .send_request(request)
            .await
            .map_err(|err| {
                warn!("model call failed, turn is not saved: {err}");
                ChatError::Model(err)
            })?;

        let msg = Message::assistant(&reply.content);
        if msg.content().is_empty() {
            return Err(ChatError::EmptyReply);
        }
        let reply_text = msg.content().to_owned();
        self.session.push(msg);

        let truncated = reply.finish_reason == Some(ModelFinishReason::Length);
        if truncated {
            warn!("reply was cut off by the token limit");
        }

        let saved = self
            .store
            .save(&mut self.session, self.model_client.model_name());
        if let Err(err) = &saved {
            error!("failed to save the transcript: {err}");
        }

        Ok(TurnOutcome {
            reply: reply_text,
            truncated,
            saved,
        })
    }

    /// Forgets the current conversation and starts an unbound one.
    ///
    /// Nothing on disk changes.
    #[inline]
    pub fn new_conversation(&mut self) {
        self.session.start_new_conversation();
    }

    /// Replaces the conversation with the transcript `filename`; later
    /// turns are saved back into that file.
    #[inline]
    pub fn load_transcript(&mut self, filename: &str) -> Result<(), ChatError> {
        self.store.load(&mut self.session, filename)?;
        Ok(())
    }

    /// Lists saved transcripts, newest first.
    #[inline]
    pub fn list_transcripts(&self) -> Result<Vec<String>, ChatError> {
        Ok(self.store.list_transcripts()?)
    }

    /// Returns the messages of the current conversation.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    /// Returns the file the conversation is saved to, if any.
    #[inline]
    pub fn current_file(&self) -> Option<&str> {
        self.session.current_file()
    }

    /// Returns the identifier of the current conversation.
    #[inline]
    pub fn conversation_id(&self) -> &str {
        self.session.conversation_id()
    }

    /// Returns the transcript store.
    #[inline]
    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Returns the model name written into transcripts.
    #[inline]
    pub fn model_name(&self) -> &str {
        self.model_client.model_name()
    }

    fn build_model_request(&self) -> ModelRequest {
        let history = self.session.messages().iter().map(|msg| {
            let content = msg.content().to_owned();
            match msg.role() {
                Role::User => ModelMessage::User(content),
                Role::Assistant => ModelMessage::Assistant(content),
            }
        });
        ModelRequest {
            messages: std::iter::once(ModelMessage::System(
                self.system_prompt.clone(),
            ))
            .chain(history)
            .collect(),
            temperature: Some(self.temperature),
        }
    }
}
