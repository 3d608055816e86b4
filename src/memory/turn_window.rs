use std::collections::VecDeque;
use std::num::NonZeroUsize;

use async_trait::async_trait;

use crate::{chat::ChatMessage, error::LLMError};

use super::{MemoryProvider, MemoryType};

/// Keeps only the most recent turns of a conversation.
///
/// A turn is the counterpart's input plus the agent's reply, so the window
/// holds `2 * turns` messages and always starts on an input. Long debates
/// use it to cap prompt size at the cost of forgetting the opening rounds.
#[derive(Debug, Clone)]
pub struct TurnWindowMemory {
    messages: VecDeque<ChatMessage>,
    turns: NonZeroUsize,
}

impl TurnWindowMemory {
    /// Returns `None` for a zero-turn window.
    pub fn new(turns: usize) -> Option<Self> {
        let turns = NonZeroUsize::new(turns)?;
        Some(Self {
            messages: VecDeque::with_capacity(turns.get() * 2),
            turns,
        })
    }

    pub fn turns(&self) -> usize {
        self.turns.get()
    }

    fn capacity(&self) -> usize {
        self.turns.get().saturating_mul(2)
    }
}

#[async_trait]
impl MemoryProvider for TurnWindowMemory {
    async fn remember(&mut self, message: &ChatMessage) -> Result<(), LLMError> {
        self.messages.push_back(message.clone());
        // evict whole turns so the window never opens on a reply
        while self.messages.len() > self.capacity() {
            self.messages.pop_front();
            self.messages.pop_front();
        }
        Ok(())
    }

    async fn recall(&self, limit: Option<usize>) -> Result<Vec<ChatMessage>, LLMError> {
        let start = limit
            .map(|limit| self.messages.len().saturating_sub(limit))
            .unwrap_or(0);
        Ok(self.messages.range(start..).cloned().collect())
    }

    async fn clear(&mut self) -> Result<(), LLMError> {
        self.messages.clear();
        Ok(())
    }

    fn memory_type(&self) -> MemoryType {
        MemoryType::TurnWindow
    }

    fn size(&self) -> usize {
        self.messages.len()
    }
}
