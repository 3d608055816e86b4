//! Scripted two-agent conversations over language models.
//!
//! `dualbot` runs fixed-length, turn-taking exchanges between two
//! model-backed agents and reduces the resulting transcript to a closing
//! artifact. Three modes are provided:
//!
//! - [`DebateSession`]: two debaters argue a scenario for 4 or 8 rounds,
//!   then the transcript is summarized.
//! - [`InterviewSession`]: a journalist interviews the author of a paper
//!   whose answers are grounded in retrieved passages.
//! - [`ReviewSession`]: a reviewer questions an author for 4 rounds and
//!   then issues a single verdict.
//!
//! Providers come from a [`ProviderFactory`]; [`Engine`] is the HTTP one.
//!
//! ```no_run
//! use dualbot::{DebateSession, Engine, Role};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::new("openai", Some("sk-...".into()))?;
//! let roles = (Role::new("Proponent"), Role::new("Opponent"));
//! let mut debate = DebateSession::new(&engine, roles, "Cities should ban cars", "Short").await?;
//! while debate.remaining_rounds() > 0 {
//!     let round = debate.step().await?;
//!     println!("{}\n\n{}", round.first, round.second);
//! }
//! println!("{}", debate.summarize().await?);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod backends;
pub mod builder;
pub mod chat;
pub mod error;
pub mod exchange;
pub mod memory;
pub mod persona;
pub mod reducer;
pub mod resilient_llm;
pub mod retrieval;
pub mod session;

pub use agent::{Agent, MemoryAgent, QaEntry, Reply, RetrievalAgent};
pub use builder::{Engine, GenerationParams, LLMBackend, LLMBuilder, ProviderFactory};
pub use chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole};
pub use error::{ConfigurationError, LLMError, SessionError};
pub use exchange::{ExchangeDriver, ExchangeEvent, ExchangeState, Transcript};
pub use persona::{Persona, Role, SessionLength};
pub use retrieval::{Passage, Retriever, TfIdfIndex};
pub use session::{DebateSession, InterviewSession, QaRound, ReviewSession, SessionModels};
