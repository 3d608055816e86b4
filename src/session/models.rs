use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    agent::MemoryAgent,
    builder::GenerationParams,
    chat::ChatProvider,
    error::ConfigurationError,
    memory::TurnWindowMemory,
};

/// Model and temperature for every role a session creates a provider for.
///
/// The reviewer's temperature is not configurable: it is derived from the
/// session's rigor level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionModels {
    pub debater: GenerationParams,
    pub debate_summarizer: GenerationParams,
    pub journalist: GenerationParams,
    pub interview_author: GenerationParams,
    pub interview_summarizer: GenerationParams,
    pub review_author: GenerationParams,
    pub reviewer_model: String,
    /// Turns of history replayed by memory agents; unbounded when unset.
    pub history_window: Option<usize>,
}

impl Default for SessionModels {
    fn default() -> Self {
        Self {
            debater: GenerationParams::new("gpt-4", 0.7),
            debate_summarizer: GenerationParams::new("gpt-4o", 0.5),
            journalist: GenerationParams::new("gpt-3.5-turbo", 0.8),
            interview_author: GenerationParams::new("gpt-3.5-turbo", 0.8),
            interview_summarizer: GenerationParams::new("gpt-4o", 0.5),
            review_author: GenerationParams::new("gpt-4o", 0.7),
            reviewer_model: "gpt-4o".to_string(),
            history_window: None,
        }
    }
}

impl SessionModels {
    /// Builds a memory agent over the configured history store.
    pub(crate) fn memory_agent(
        &self,
        name: impl Into<String>,
        provider: Arc<dyn ChatProvider>,
    ) -> Result<MemoryAgent, ConfigurationError> {
        let Some(turns) = self.history_window else {
            return Ok(MemoryAgent::new(name, provider));
        };
        let memory = TurnWindowMemory::new(turns).ok_or_else(|| {
            ConfigurationError::InvalidParameter {
                name: "history_window",
                reason: "must keep at least one turn".to_string(),
            }
        })?;
        Ok(MemoryAgent::with_memory(name, provider, Box::new(memory)))
    }
}
