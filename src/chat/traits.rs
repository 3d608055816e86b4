use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;
use super::usage::Usage;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
    fn usage(&self) -> Option<Usage> {
        None
    }
}

/// The generation capability consumed by agents and reducers.
///
/// A provider is configured once (model, temperature, credentials) and then
/// answers chat requests. Implementations may retry internally; callers in
/// this crate never do.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError>;

    /// Model identifier, used for logging.
    fn model(&self) -> &str {
        "unknown"
    }

    /// Generates a reply to `input` given system instructions and prior turns.
    async fn generate(
        &self,
        system: &str,
        history: &[ChatMessage],
        input: &str,
    ) -> Result<String, LLMError> {
        let messages = build_generation_messages(system, history, input);
        let response = self.chat(&messages).await?;
        if let Some(usage) = response.usage() {
            log::debug!(
                "{} usage: prompt={} completion={}",
                self.model(),
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }
        response
            .text()
            .ok_or_else(|| LLMError::ProviderError("no text in chat response".into()))
    }
}

fn build_generation_messages(
    system: &str,
    history: &[ChatMessage],
    input: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    if !system.is_empty() {
        messages.push(ChatMessage::system().content(system).build());
    }
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user().content(input).build());
    messages
}
