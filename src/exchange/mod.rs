//! Two-party exchange driver.
//!
//! The driver owns two instructed agents and runs a fixed number of
//! rounds. In each round the first agent answers the driving input and the
//! second agent answers the first; the second agent's output drives the
//! next round. Turns are strictly sequential.

mod driver;
mod events;
mod transcript;


pub use driver::{ExchangeDriver, RoundOutput};
pub use events::ExchangeEvent;
pub use transcript::{Transcript, TranscriptEntry};

use std::fmt;

/// Lifecycle of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    /// No agents wired yet.
    #[default]
    Uninitialized,
    /// Agents wired, transcript empty, sentinel seeded.
    Ready,
    /// At least one round has started.
    Running,
    /// All rounds (and the terminal step, if any) are done.
    Complete,
    /// A round aborted on a capability error.
    Failed,
}

impl fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Complete => "COMPLETE",
            Self::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// When the exchange counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Complete as soon as the last round succeeds.
    #[default]
    AfterFinalRound,
    /// Stay running after the last round until [`ExchangeDriver::complete`].
    AfterTerminalStep,
}

/// Fixed parameters of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// Number of rounds to run; each round is two turns.
    pub rounds: usize,
    /// Driving input of the first round.
    pub sentinel: String,
    pub completion: CompletionPolicy,
}

impl ExchangeConfig {
    #[must_use]
    pub fn new(rounds: usize, sentinel: impl Into<String>) -> Self {
        Self {
            rounds,
            sentinel: sentinel.into(),
            completion: CompletionPolicy::AfterFinalRound,
        }
    }

    #[must_use]
    pub fn with_terminal_step(mut self) -> Self {
        self.completion = CompletionPolicy::AfterTerminalStep;
        self
    }
}
