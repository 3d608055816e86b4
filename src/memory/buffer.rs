use async_trait::async_trait;

use crate::{chat::ChatMessage, error::LLMError};

use super::{MemoryProvider, MemoryType};

/// Keeps the full conversation, oldest first.
#[derive(Debug, Clone, Default)]
pub struct BufferMemory {
    messages: Vec<ChatMessage>,
}

impl BufferMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[async_trait]
impl MemoryProvider for BufferMemory {
    async fn remember(&mut self, message: &ChatMessage) -> Result<(), LLMError> {
        self.messages.push(message.clone());
        Ok(())
    }

    async fn recall(&self, limit: Option<usize>) -> Result<Vec<ChatMessage>, LLMError> {
        let start = limit
            .map(|limit| self.messages.len().saturating_sub(limit))
            .unwrap_or(0);
        Ok(self.messages[start..].to_vec())
    }

    async fn clear(&mut self) -> Result<(), LLMError> {
        self.messages.clear();
        Ok(())
    }

    fn memory_type(&self) -> MemoryType {
        MemoryType::Buffer
    }

    fn size(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recall_returns_messages_in_order() {
        let mut memory = BufferMemory::new();
        for text in ["one", "two", "three"] {
            memory
                .remember(&ChatMessage::user().content(text).build())
                .await
                .expect("remember");
        }

        let all = memory.recall(None).await.expect("recall");
        assert_eq!(
            all.iter().map(|m| m.content.as_str()).collect::<Vec<_>>(),
            ["one", "two", "three"]
        );

        let last = memory.recall(Some(2)).await.expect("recall");
        assert_eq!(last[0].content, "two");

        memory.clear().await.expect("clear");
        assert!(memory.is_empty());
    }
}
