use serde::{Deserialize, Serialize};
use vault_chat_model::{ErrorKind, ModelFinishReason, ModelReply};

/// How the fake model answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetResponse {
    /// Reply with this text.
    #[serde(rename = "reply")]
    Reply(String),
    /// Fail with this kind of error.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
}

impl PresetResponse {
    #[inline]
    pub(crate) fn into_result(self) -> Result<ModelReply, ErrorKind> {
        match self {
            PresetResponse::Reply(content) => Ok(ModelReply {
                content,
                finish_reason: Some(ModelFinishReason::Stop),
            }),
            PresetResponse::Failure(kind) => Err(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let presets = vec![
            PresetResponse::Reply("I have left a message for you.".to_owned()),
            PresetResponse::Failure(ErrorKind::Timeout),
        ];

        let serialized = serde_json::to_string(&presets).unwrap();
        assert!(serialized.contains(r#""type":"failure""#));
        let deserialized: Vec<PresetResponse> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(presets, deserialized);
    }
}
