use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{chat::ChatMessage, error::LLMError};

/// Types of memory implementations available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    /// Unbounded buffer holding every message
    Buffer,
    /// Keeps the N most recent turns
    TurnWindow,
}

/// Trait for memory providers that can store and retrieve conversation history.
#[async_trait]
pub trait MemoryProvider: Send + Sync {
    async fn remember(&mut self, message: &ChatMessage) -> Result<(), LLMError>;

    /// Returns the most recent `limit` messages in chronological order, or all of them.
    async fn recall(&self, limit: Option<usize>) -> Result<Vec<ChatMessage>, LLMError>;

    async fn clear(&mut self) -> Result<(), LLMError>;

    fn memory_type(&self) -> MemoryType;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
