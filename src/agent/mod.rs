//! Conversational agents.
//!
//! An agent pairs a persona with a generation capability and some
//! conversational state. Two flavors exist: [`MemoryAgent`] replays its
//! whole history to the model on every turn, [`RetrievalAgent`] instead
//! grounds each answer in passages fetched for that question.

mod memory_agent;
mod retrieval_agent;

use crate::{chat::ChatMessage, error::SessionError, persona::Persona, retrieval::Passage};

pub use memory_agent::MemoryAgent;
pub use retrieval_agent::{QaEntry, RetrievalAgent};

/// Output of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Passages the answer was grounded in; empty for memory agents.
    pub passages: Vec<Passage>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            passages: Vec::new(),
        }
    }
}

/// Conversational state captured before a turn, so a failed round can be undone.
#[derive(Debug)]
pub(crate) enum Checkpoint {
    History(Vec<ChatMessage>),
    QaLog(usize),
}

/// A participant in a two-party exchange.
pub enum Agent {
    Memory(MemoryAgent),
    Retrieval(RetrievalAgent),
}

impl Agent {
    pub fn name(&self) -> &str {
        match self {
            Agent::Memory(agent) => agent.name(),
            Agent::Retrieval(agent) => agent.name(),
        }
    }

    pub fn is_instructed(&self) -> bool {
        match self {
            Agent::Memory(agent) => agent.persona().is_some(),
            Agent::Retrieval(agent) => agent.persona().is_some(),
        }
    }

    pub fn persona(&self) -> Option<&Persona> {
        match self {
            Agent::Memory(agent) => agent.persona(),
            Agent::Retrieval(agent) => agent.persona(),
        }
    }

    /// Sets the persona and forgets any earlier conversation.
    pub async fn instruct(&mut self, persona: Persona) -> Result<(), SessionError> {
        match self {
            Agent::Memory(agent) => agent.instruct(persona).await,
            Agent::Retrieval(agent) => {
                agent.instruct(persona);
                Ok(())
            }
        }
    }

    /// Produces this agent's turn in reply to the counterpart's `input`.
    pub async fn respond(&mut self, input: &str) -> Result<Reply, SessionError> {
        match self {
            Agent::Memory(agent) => agent.respond(input).await.map(Reply::text),
            Agent::Retrieval(agent) => agent.respond(input).await,
        }
    }
}

impl Agent {
    pub(crate) async fn checkpoint(&self) -> Result<Checkpoint, SessionError> {
        match self {
            Agent::Memory(agent) => Ok(Checkpoint::History(agent.history().await?)),
            Agent::Retrieval(agent) => Ok(Checkpoint::QaLog(agent.qa_log().len())),
        }
    }

    /// Rewinds the agent to `checkpoint`, dropping turns taken since.
    pub(crate) async fn restore(&mut self, checkpoint: Checkpoint) -> Result<(), SessionError> {
        match (self, checkpoint) {
            (Agent::Memory(agent), Checkpoint::History(messages)) => {
                agent.restore_history(messages).await
            }
            (Agent::Retrieval(agent), Checkpoint::QaLog(len)) => {
                agent.truncate_log(len);
                Ok(())
            }
            (agent, _) => {
                log::warn!("checkpoint does not match agent {}", agent.name());
                Ok(())
            }
        }
    }
}

impl From<MemoryAgent> for Agent {
    fn from(agent: MemoryAgent) -> Self {
        Agent::Memory(agent)
    }
}

impl From<RetrievalAgent> for Agent {
    fn from(agent: RetrievalAgent) -> Self {
        Agent::Retrieval(agent)
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Agent::Memory(_) => "Memory",
            Agent::Retrieval(_) => "Retrieval",
        };
        f.debug_struct("Agent")
            .field("kind", &kind)
            .field("name", &self.name())
            .field("instructed", &self.is_instructed())
            .finish()
    }
}
