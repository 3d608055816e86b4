use async_trait::async_trait;

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse},
    error::LLMError,
};

use super::wrapper::ResilientLLM;

#[async_trait]
impl ChatProvider for ResilientLLM {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.retry(|| self.inner.chat(messages)).await
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::resilient_llm::ResilienceConfig;

    #[derive(Debug)]
    struct Reply(String);

    impl std::fmt::Display for Reply {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl ChatResponse for Reply {
        fn text(&self) -> Option<String> {
            Some(self.0.clone())
        }
    }

    struct Flaky {
        failures: usize,
        calls: AtomicUsize,
        error: fn() -> LLMError,
    }

    #[async_trait]
    impl ChatProvider for Flaky {
        async fn chat(&self, _: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err((self.error)());
            }
            Ok(Box::new(Reply("recovered".into())))
        }
    }

    fn fast(attempts: usize) -> ResilienceConfig {
        ResilienceConfig {
            max_attempts: attempts,
            base_delay_ms: 1,
            max_delay_ms: 2,
            jitter: false,
        }
    }

    #[tokio::test]
    async fn retries_transient_failures() {
        let inner = Flaky {
            failures: 2,
            calls: AtomicUsize::new(0),
            error: || LLMError::HttpError("connection reset".into()),
        };
        let llm = ResilientLLM::new(Box::new(inner), fast(3));
        let text = llm.generate("", &[], "hi").await.expect("third attempt succeeds");
        assert_eq!(text, "recovered");
    }

    #[tokio::test]
    async fn auth_errors_are_not_retried() {
        let inner = Flaky {
            failures: 5,
            calls: AtomicUsize::new(0),
            error: || LLMError::AuthError("bad key".into()),
        };
        let llm = ResilientLLM::new(Box::new(inner), fast(3));
        let err = llm.chat(&[]).await.unwrap_err();
        assert!(matches!(err, LLMError::AuthError(_)));
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let inner = Flaky {
            failures: 10,
            calls: AtomicUsize::new(0),
            error: || LLMError::ProviderError("503".into()),
        };
        let llm = ResilientLLM::new(Box::new(inner), fast(2));
        let err = llm.chat(&[]).await.unwrap_err();
        assert!(matches!(err, LLMError::ProviderError(_)));
    }
}
