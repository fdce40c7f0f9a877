use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;

use vault_chat_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelProvider,
    ModelProviderError, ModelReply, ModelRequest,
};

#[derive(Debug)]
struct FakeModelProviderError(ErrorKind);

impl Display for FakeModelProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeModelProviderError {}

impl ModelProviderError for FakeModelProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Echoes the last user message back.
struct FakeModelProvider;

impl ModelProvider for FakeModelProvider {
    type Error = FakeModelProviderError;

    fn model_name(&self) -> &str {
        "echo"
    }

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let result = 'blk: {
            let Some(last) = req.messages.last() else {
                break 'blk Err(FakeModelProviderError(ErrorKind::Other));
            };
            let ModelMessage::User(text) = last else {
                break 'blk Err(FakeModelProviderError(ErrorKind::Other));
            };
            if req.temperature.is_some_and(|t| t > 2.0) {
                break 'blk Err(FakeModelProviderError(
                    ErrorKind::RateLimitExceeded,
                ));
            }

            Ok(ModelReply {
                content: format!("You said {text}"),
                finish_reason: Some(ModelFinishReason::Stop),
            })
        };
        ready(result)
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            messages: vec![
                ModelMessage::System("Be brief.".to_string()),
                ModelMessage::User("Good morning".to_string()),
            ],
            temperature: Some(0.7),
        };
        let reply = provider.send_request(&req).await.unwrap();
        assert_eq!(reply.content, "You said Good morning");
        assert_eq!(reply.finish_reason, Some(ModelFinishReason::Stop));
        assert_eq!(provider.model_name(), "echo");
    }

    #[tokio::test]
    async fn test_error() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            messages: vec![],
            temperature: None,
        };
        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        let req = ModelRequest {
            messages: vec![ModelMessage::User("Hi".to_string())],
            temperature: Some(3.0),
        };
        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
        assert_eq!(err.kind().to_string(), "Rate limit exceeded");
    }
}
