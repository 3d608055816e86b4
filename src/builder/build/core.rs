use crate::{
    backends::{OpenAICompatible, OpenAICompatibleConfig},
    chat::ChatProvider,
    error::LLMError,
};

use super::super::llm_builder::LLMBuilder;
use super::super::state::BuilderState;
use super::{helpers, wrappers};

impl LLMBuilder {
    pub fn build(self) -> Result<Box<dyn ChatProvider>, LLMError> {
        self.state.build()
    }
}

impl BuilderState {
    pub(super) fn build(mut self) -> Result<Box<dyn ChatProvider>, LLMError> {
        helpers::log_builder_state(&self);
        let backend = self
            .backend
            .take()
            .ok_or_else(|| LLMError::InvalidRequest("No backend specified".to_string()))?;

        if backend.requires_api_key() && self.api_key.is_none() {
            return Err(LLMError::InvalidRequest(format!(
                "No API key provided for {backend}"
            )));
        }

        let config = OpenAICompatibleConfig {
            backend,
            api_key: self.api_key.take(),
            base_url: self
                .base_url
                .take()
                .unwrap_or_else(|| backend.default_base_url().to_string()),
            model: self
                .model
                .take()
                .unwrap_or_else(|| backend.default_model().to_string()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout_seconds: helpers::timeout_or_default(&self),
        };

        let provider: Box<dyn ChatProvider> = Box::new(OpenAICompatible::new(config)?);
        Ok(wrappers::wrap_with_resilience(&mut self, provider))
    }
}
