//! Events emitted while an exchange runs.

/// Progress notifications for a presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeEvent {
    /// Agents were wired and the exchange is ready.
    Started {
        /// Rounds that will be run.
        rounds: usize,
    },

    /// One agent finished its turn.
    TurnCompleted {
        /// 1-based round number.
        round: usize,
        /// Name of the agent who spoke.
        speaker: String,
        /// Full content of the turn.
        text: String,
    },

    /// Both turns of a round are in the transcript.
    RoundCompleted {
        /// 1-based round number.
        round: usize,
    },

    /// The exchange reached its final state.
    Completed {
        /// Rounds that were run.
        rounds: usize,
    },

    /// A round aborted; the transcript keeps only earlier rounds.
    Failed {
        /// 1-based number of the round that failed.
        round: usize,
        /// Error message.
        message: String,
    },
}
