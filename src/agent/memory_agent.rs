use std::sync::Arc;

use crate::{
    chat::{ChatMessage, ChatProvider},
    error::{ConfigurationError, SessionError},
    memory::{BufferMemory, MemoryProvider},
    persona::Persona,
};

/// Agent that keeps the full bilateral conversation as model context.
pub struct MemoryAgent {
    name: String,
    provider: Arc<dyn ChatProvider>,
    persona: Option<Persona>,
    memory: Box<dyn MemoryProvider>,
}

impl MemoryAgent {
    /// Creates an agent backed by an unbounded history buffer.
    pub fn new(name: impl Into<String>, provider: Arc<dyn ChatProvider>) -> Self {
        Self::with_memory(name, provider, Box::new(BufferMemory::new()))
    }

    pub fn with_memory(
        name: impl Into<String>,
        provider: Arc<dyn ChatProvider>,
        memory: Box<dyn MemoryProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            persona: None,
            memory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn persona(&self) -> Option<&Persona> {
        self.persona.as_ref()
    }

    pub async fn history(&self) -> Result<Vec<ChatMessage>, SessionError> {
        Ok(self.memory.recall(None).await?)
    }

    pub(super) async fn instruct(&mut self, persona: Persona) -> Result<(), SessionError> {
        self.memory.clear().await?;
        self.persona = Some(persona);
        Ok(())
    }

    pub(super) async fn restore_history(
        &mut self,
        messages: Vec<ChatMessage>,
    ) -> Result<(), SessionError> {
        self.memory.clear().await?;
        for message in &messages {
            self.memory.remember(message).await?;
        }
        Ok(())
    }

    /// Generates a reply; the exchange is written to history only on success.
    pub(super) async fn respond(&mut self, input: &str) -> Result<String, SessionError> {
        let persona = self
            .persona
            .as_ref()
            .ok_or_else(|| ConfigurationError::Uninstructed(self.name.clone()))?;

        let history = self.memory.recall(None).await?;
        log::debug!(
            "{} responding with {} messages of history",
            self.name,
            history.len()
        );
        let text = self
            .provider
            .generate(&persona.text, &history, input)
            .await?;

        self.memory
            .remember(&ChatMessage::user().content(input).build())
            .await?;
        self.memory
            .remember(&ChatMessage::assistant().content(text.clone()).build())
            .await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRole;
    use crate::memory::TurnWindowMemory;
    use crate::test_support::{Script, ScriptedProvider};

    async fn instructed(script: &Arc<Script>) -> MemoryAgent {
        let provider = Arc::new(ScriptedProvider::new("pro", script.clone()));
        let mut agent = MemoryAgent::new("Proponent", provider);
        agent
            .instruct(Persona::new("You argue for."))
            .await
            .expect("instruct");
        agent
    }

    #[tokio::test]
    async fn history_grows_by_two_messages_per_turn() {
        let script = Script::new();
        let mut agent = instructed(&script).await;

        agent.respond("Begin the debate.").await.expect("turn 1");
        agent.respond("Rebuttal").await.expect("turn 2");

        let history = agent.history().await.expect("history");
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content, "Begin the debate.");
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[2].content, "Rebuttal");

        let calls = script.calls();
        let second_call = &calls[1];
        assert_eq!(second_call.system(), Some("You argue for."));
        assert_eq!(second_call.input(), "Rebuttal");
        assert_eq!(second_call.history().len(), 2);
    }

    #[tokio::test]
    async fn failed_turn_leaves_history_untouched() {
        let script = Script::failing_at(2);
        let mut agent = instructed(&script).await;

        agent.respond("first").await.expect("turn 1");
        let err = agent.respond("second").await.unwrap_err();
        assert!(err.is_capability());
        assert_eq!(agent.history().await.expect("history").len(), 2);
    }

    #[tokio::test]
    async fn instruct_resets_history() {
        let script = Script::new();
        let mut agent = instructed(&script).await;
        agent.respond("first").await.expect("turn");

        agent
            .instruct(Persona::new("fresh"))
            .await
            .expect("instruct");
        assert!(agent.history().await.expect("history").is_empty());
    }

    #[tokio::test]
    async fn turn_window_bounds_the_prompt() {
        let script = Script::new();
        let provider = Arc::new(ScriptedProvider::new("pro", script.clone()));
        let memory = TurnWindowMemory::new(1).expect("window");
        let mut agent = MemoryAgent::with_memory("Pro", provider, Box::new(memory));
        agent.instruct(Persona::new("p")).await.expect("instruct");

        for input in ["a", "b", "c"] {
            agent.respond(input).await.expect("turn");
        }
        assert_eq!(script.calls()[2].history().len(), 2);
    }
}
