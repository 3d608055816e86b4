use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    chat::ChatProvider,
    error::{ConfigurationError, LLMError},
    resilient_llm::ResilienceConfig,
};

use super::{backend::LLMBackend, llm_builder::LLMBuilder};

/// Model and sampling temperature for one generation capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
}

impl GenerationParams {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }
}

/// Produces a configured chat provider for the given parameters.
///
/// Sessions ask for one provider per agent and one per reducer, so each
/// can run with its own model and temperature.
pub trait ProviderFactory: Send + Sync {
    fn provider(&self, params: &GenerationParams) -> Result<Arc<dyn ChatProvider>, LLMError>;
}

/// Connection settings for one chat engine, shared by every provider it hands out.
pub struct Engine {
    backend: LLMBackend,
    api_key: Option<SecretString>,
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
    resilience: Option<ResilienceConfig>,
}

impl Engine {
    /// Resolves `engine_id` (case-insensitive) to a backend.
    pub fn new(engine_id: &str, api_key: Option<String>) -> Result<Self, ConfigurationError> {
        let backend: LLMBackend = engine_id.parse()?;
        Ok(Self {
            backend,
            api_key: api_key.map(SecretString::new),
            base_url: None,
            timeout_seconds: None,
            resilience: None,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Wraps every provider in a retrying [`crate::resilient_llm::ResilientLLM`].
    pub fn with_resilience(mut self, cfg: ResilienceConfig) -> Self {
        self.resilience = Some(cfg);
        self
    }

    pub fn backend(&self) -> LLMBackend {
        self.backend
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("resilience", &self.resilience)
            .finish()
    }
}

impl ProviderFactory for Engine {
    fn provider(&self, params: &GenerationParams) -> Result<Arc<dyn ChatProvider>, LLMError> {
        let mut builder = LLMBuilder::new()
            .backend(self.backend)
            .model(params.model.clone())
            .temperature(params.temperature);

        if let Some(key) = &self.api_key {
            builder = builder.secret_api_key(SecretString::new(key.expose_secret().clone()));
        }
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            builder = builder.timeout_seconds(timeout);
        }
        if let Some(cfg) = &self.resilience {
            builder = builder.resilience(cfg);
        }

        Ok(Arc::from(builder.build()?))
    }
}
