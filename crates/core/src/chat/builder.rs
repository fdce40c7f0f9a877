use vault_chat_model::ModelProvider;
use vault_chat_transcript::{Session, TranscriptStore};

use super::Chat;
use crate::model_client::ModelClient;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// [`Chat`] builder.
pub struct ChatBuilder {
    model_client: ModelClient,
    store: TranscriptStore,
    system_prompt: Option<String>,
    temperature: Option<f32>,
}

impl ChatBuilder {
    /// Creates a new builder that talks to `provider` and saves into
    /// `store`.
    #[inline]
    pub fn new<P: ModelProvider + 'static>(
        provider: P,
        store: TranscriptStore,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            store,
            system_prompt: None,
            temperature: None,
        }
    }

    /// Sets the system prompt sent ahead of every request.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the sampling temperature.
    #[inline]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Builds the chat with a fresh, unbound session.
    #[inline]
    pub fn build(self) -> Chat {
        Chat {
            model_client: self.model_client,
            store: self.store,
            session: Session::new(),
            system_prompt: self
                .system_prompt
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_owned()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }
}
