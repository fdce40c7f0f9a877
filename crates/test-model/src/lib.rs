//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::sleep;
use vault_chat_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    responses: VecDeque<PresetResponse>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to queue up how the model should
/// respond. Each request consumes the next queued response, in order, and
/// is recorded so tests can inspect what was sent. If the queue runs dry,
/// an error will be returned.
///
/// Clones share the same queue, so a test can keep one handle while the
/// code under test owns another.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    /// Queues a successful reply.
    #[inline]
    pub fn add_reply<S: Into<String>>(&self, content: S) {
        self.add_response(PresetResponse::Reply(content.into()));
    }

    /// Queues a failure of the given kind.
    #[inline]
    pub fn add_failure(&self, kind: ErrorKind) {
        self.add_response(PresetResponse::Failure(kind));
    }

    /// Queues a preset response.
    #[inline]
    pub fn add_response(&self, preset: PresetResponse) {
        self.lock().responses.push_back(preset);
    }

    /// Delays every response by `duration`.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn model_name(&self) -> &str {
        "test-model"
    }

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        // Pick the response now, so that the order of requests decides the
        // order of responses even when they are delayed.
        let preset = {
            let mut script = self.lock();
            script.requests.push(req.clone());
            script.responses.pop_front()
        };
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            let Some(preset) = preset else {
                return Err(Error {
                    message: "no enough responses",
                    kind: ErrorKind::Other,
                });
            };
            preset.into_result().map_err(|kind| Error {
                message: "preset failure",
                kind,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use vault_chat_model::ModelMessage;

    use super::*;

    fn request(text: &str) -> ModelRequest {
        ModelRequest {
            messages: vec![ModelMessage::User(text.to_owned())],
            temperature: Some(0.7),
        }
    }

    #[tokio::test]
    async fn test_send_request() {
        let provider = TestModelProvider::default();
        provider.add_reply("Hello, world!");
        provider.add_failure(ErrorKind::Unauthorized);

        let reply = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(reply.content, "Hello, world!");

        let err = provider.send_request(&request("Again")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = provider.send_request(&request("More")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        let requests = provider.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1], request("Again"));
    }

    #[tokio::test]
    async fn test_clones_share_script() {
        let mut provider = TestModelProvider::default();
        provider.set_delay(Duration::from_millis(1));
        let handle = provider.clone();
        handle.add_reply("from the handle");

        let reply = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(reply.content, "from the handle");
        assert_eq!(handle.requests().len(), 1);
    }
}
