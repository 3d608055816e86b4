//! Session facades for the three conversation modes.
//!
//! Each session validates its parameters, compiles personas, obtains
//! providers from a [`ProviderFactory`](crate::builder::ProviderFactory)
//! and then exposes `step()` plus the terminal reductions.

mod debate;
mod interview;
mod models;
mod review;

pub use debate::{DebateRound, DebateSession, DEBATE_SENTINEL};
pub use interview::{InterviewSession, INTERVIEW_ROUNDS, INTERVIEW_SENTINEL};
pub use models::SessionModels;
pub use review::{ReviewSession, REVIEW_ROUNDS, REVIEW_SENTINEL};

use crate::retrieval::Passage;

/// One question/answer round of an interview or review.
#[derive(Debug, Clone, PartialEq)]
pub struct QaRound {
    /// 1-based round number.
    pub round: usize,
    pub question: String,
    pub answer: String,
    /// Passages the answer was grounded in.
    pub passages: Vec<Passage>,
}

impl From<crate::exchange::RoundOutput> for QaRound {
    fn from(output: crate::exchange::RoundOutput) -> Self {
        Self {
            round: output.round,
            question: output.first.text,
            answer: output.second.text,
            passages: output.second.passages,
        }
    }
}
