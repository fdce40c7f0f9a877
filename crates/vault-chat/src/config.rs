//! Configuration read from environment variables.

use std::env;
use std::fmt::{self, Display};
use std::path::PathBuf;

const DEFAULT_TRANSCRIPT_DIR: &str = "ChatGPT";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Everything the CLI needs to start a chat.
#[derive(Clone, PartialEq)]
pub struct Config {
    /// API key for the completion provider (`OPENAI_API_KEY`).
    pub api_key: String,
    /// Custom API base URL (`OPENAI_BASE_URL`).
    pub base_url: Option<String>,
    /// Model name (`OPENAI_MODEL`).
    pub model: Option<String>,
    /// Where transcripts are kept (`VAULT_CHAT_DIR`).
    pub transcript_dir: PathBuf,
    /// Sampling temperature, `0.0..=2.0` (`VAULT_CHAT_TEMPERATURE`).
    pub temperature: f32,
    /// System instruction (`VAULT_CHAT_SYSTEM_PROMPT`).
    pub system_prompt: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<deducted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("transcript_dir", &self.transcript_dir)
            .field("temperature", &self.temperature)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

/// Describes an unusable configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set or empty.
    Missing(&'static str),
    /// A variable is set to something that can't be used.
    Invalid {
        /// The variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => {
                write!(f, "{name} environment variable is not set")
            }
            ConfigError::Invalid { name, value } => {
                write!(f, "{name} has an invalid value: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads the configuration from the process environment.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = var("OPENAI_API_KEY")
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let temperature = match var("VAULT_CHAT_TEMPERATURE") {
            Some(value) => parse_temperature(&value).ok_or(
                ConfigError::Invalid {
                    name: "VAULT_CHAT_TEMPERATURE",
                    value,
                },
            )?,
            None => DEFAULT_TEMPERATURE,
        };

        let config = Self {
            api_key,
            base_url: var("OPENAI_BASE_URL"),
            model: var("OPENAI_MODEL"),
            transcript_dir: var("VAULT_CHAT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRANSCRIPT_DIR)),
            temperature,
            system_prompt: var("VAULT_CHAT_SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_owned()),
        };
        debug!("loaded config: {config:?}");
        Ok(config)
    }
}

fn parse_temperature(value: &str) -> Option<f32> {
    let temperature = value.trim().parse::<f32>().ok()?;
    (0.0..=2.0).contains(&temperature).then_some(temperature)
}
