use std::sync::Arc;

use tracing::{info, warn};

use super::{ChatMessage, ChatProvider, LlmError};

/// Primary provider with exactly one fallback attempt on a secondary.
/// There is no retry or backoff beyond that single switch.
#[derive(Clone)]
pub struct FallbackChat {
    primary: Arc<dyn ChatProvider>,
    secondary: Arc<dyn ChatProvider>,
}

impl FallbackChat {
    pub fn new(primary: Arc<dyn ChatProvider>, secondary: Arc<dyn ChatProvider>) -> Self {
        Self { primary, secondary }
    }

    pub async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let primary_err = match self.primary.complete(system, messages).await {
            Ok(reply) => return Ok(reply),
            Err(e) => e,
        };

        warn!(
            "Primary provider {} failed, falling back to {}: {primary_err}",
            self.primary.name(),
            self.secondary.name()
        );

        match self.secondary.complete(system, messages).await {
            Ok(reply) => {
                info!("Secondary provider {} answered", self.secondary.name());
                Ok(reply)
            }
            Err(secondary_err) => Err(LlmError::Exhausted {
                primary: primary_err.to_string(),
                secondary: secondary_err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted provider that counts its calls and keeps the last request.
    pub struct MockProvider {
        pub reply: Option<String>,
        pub calls: AtomicUsize,
        pub last_request: Mutex<Option<(String, Vec<ChatMessage>)>>,
    }

    impl MockProvider {
        pub fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// `(system, messages)` of the most recent call.
        pub fn last_request(&self) -> Option<(String, Vec<ChatMessage>)> {
            self.last_request.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some((system.to_string(), messages.to_vec()));
            self.reply.clone().ok_or(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::user("hello")]
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let primary = MockProvider::ok("from primary");
        let secondary = MockProvider::ok("from secondary");
        let chat = FallbackChat::new(primary.clone(), secondary.clone());

        assert_eq!(chat.complete("sys", &messages()).await.unwrap(), "from primary");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_uses_secondary_once() {
        let primary = MockProvider::failing();
        let secondary = MockProvider::ok("from secondary");
        let chat = FallbackChat::new(primary.clone(), secondary.clone());

        assert_eq!(
            chat.complete("sys", &messages()).await.unwrap(),
            "from secondary"
        );
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);

        let (system, forwarded) = secondary.last_request().unwrap();
        assert_eq!(system, "sys");
        assert_eq!(forwarded, messages());
    }

    #[tokio::test]
    async fn test_both_failing_is_exhausted() {
        let primary = MockProvider::failing();
        let secondary = MockProvider::failing();
        let chat = FallbackChat::new(primary.clone(), secondary.clone());

        let err = chat.complete("sys", &messages()).await.unwrap_err();
        assert!(matches!(err, LlmError::Exhausted { .. }));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }
}
