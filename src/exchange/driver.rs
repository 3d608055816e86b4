use tokio::sync::mpsc;

use crate::{
    agent::{Agent, Reply},
    error::{ConfigurationError, SessionError},
};

use super::events::ExchangeEvent;
use super::transcript::Transcript;
use super::{CompletionPolicy, ExchangeConfig, ExchangeState};

/// Both turns of one successful round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutput {
    /// 1-based round number.
    pub round: usize,
    pub first: Reply,
    pub second: Reply,
}

/// Runs a fixed-round exchange between two agents.
pub struct ExchangeDriver {
    config: ExchangeConfig,
    state: ExchangeState,
    agents: Option<(Agent, Agent)>,
    transcript: Transcript,
    driving_input: String,
    completed_rounds: usize,
    event_sender: Option<mpsc::UnboundedSender<ExchangeEvent>>,
}

impl ExchangeDriver {
    /// Creates an unwired driver.
    #[must_use]
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            driving_input: config.sentinel.clone(),
            config,
            state: ExchangeState::Uninitialized,
            agents: None,
            transcript: Transcript::new(),
            completed_rounds: 0,
            event_sender: None,
        }
    }

    /// Sets the event sender for receiving exchange events.
    pub fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<ExchangeEvent>) {
        self.event_sender = Some(sender);
    }

    /// Creates an event receiver channel.
    #[must_use]
    pub fn create_event_channel(&mut self) -> mpsc::UnboundedReceiver<ExchangeEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.event_sender = Some(tx);
        rx
    }

    #[must_use]
    pub const fn state(&self) -> ExchangeState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub const fn completed_rounds(&self) -> usize {
        self.completed_rounds
    }

    #[must_use]
    pub fn remaining_rounds(&self) -> usize {
        self.config.rounds.saturating_sub(self.completed_rounds)
    }

    /// Input the first agent will receive in the next round.
    #[must_use]
    pub fn driving_input(&self) -> &str {
        &self.driving_input
    }

    #[must_use]
    pub fn first_agent(&self) -> Option<&Agent> {
        self.agents.as_ref().map(|(first, _)| first)
    }

    #[must_use]
    pub fn second_agent(&self) -> Option<&Agent> {
        self.agents.as_ref().map(|(_, second)| second)
    }

    /// Installs two instructed agents, clears the transcript and seeds the sentinel.
    pub fn wire(&mut self, first: Agent, second: Agent) -> Result<(), ConfigurationError> {
        if self.state == ExchangeState::Running {
            return Err(invalid_state("a driver that is not running", self.state));
        }
        for agent in [&first, &second] {
            if !agent.is_instructed() {
                return Err(ConfigurationError::Uninstructed(agent.name().to_string()));
            }
        }

        log::info!(
            "wiring exchange {} -> {} for {} rounds",
            first.name(),
            second.name(),
            self.config.rounds
        );
        self.agents = Some((first, second));
        self.transcript.clear();
        self.driving_input = self.config.sentinel.clone();
        self.completed_rounds = 0;
        self.state = ExchangeState::Ready;
        self.emit_event(ExchangeEvent::Started {
            rounds: self.config.rounds,
        });

        if self.config.rounds == 0 && self.config.completion == CompletionPolicy::AfterFinalRound {
            self.finish();
        }
        Ok(())
    }

    /// Runs one round: first agent on the driving input, second agent on the first's output.
    ///
    /// Both turns enter the transcript and the agents' state only if both
    /// succeed; a second-turn failure rewinds the first agent. Each turn is
    /// announced as soon as it is generated, so a `TurnCompleted` followed
    /// by `Failed` marks a discarded turn. A capability error moves the
    /// driver to [`ExchangeState::Failed`] and is returned as is.
    pub async fn step(&mut self) -> Result<RoundOutput, SessionError> {
        match self.state {
            ExchangeState::Ready | ExchangeState::Running => {}
            other => return Err(invalid_state("READY or RUNNING", other).into()),
        }
        if self.remaining_rounds() == 0 {
            return Err(ConfigurationError::InvalidState {
                expected: format!("fewer than {} completed rounds", self.config.rounds),
                actual: format!("{} completed rounds", self.completed_rounds),
            }
            .into());
        }
        let Some((first, second)) = self.agents.as_mut() else {
            return Err(invalid_state("wired agents", self.state).into());
        };

        let round = self.completed_rounds + 1;
        self.state = ExchangeState::Running;
        log::debug!("round {round}/{} starting", self.config.rounds);

        let (first_reply, second_reply) = match run_round(
            first,
            second,
            &self.driving_input,
            round,
            self.event_sender.as_ref(),
        )
        .await
        {
            Ok(replies) => replies,
            Err(err) => {
                log::warn!("round {round} aborted: {err}");
                self.state = ExchangeState::Failed;
                emit(
                    self.event_sender.as_ref(),
                    ExchangeEvent::Failed {
                        round,
                        message: err.to_string(),
                    },
                );
                return Err(err);
            }
        };

        let first_name = first.name().to_string();
        let second_name = second.name().to_string();
        self.transcript.push(round, &first_name, &first_reply.text);
        self.transcript.push(round, &second_name, &second_reply.text);
        self.driving_input = second_reply.text.clone();
        self.completed_rounds = round;

        self.emit_event(ExchangeEvent::RoundCompleted { round });

        if self.remaining_rounds() == 0 && self.config.completion == CompletionPolicy::AfterFinalRound
        {
            self.finish();
        }

        Ok(RoundOutput {
            round,
            first: first_reply,
            second: second_reply,
        })
    }

    /// Checks that the single terminal step may run now.
    pub fn ensure_terminal_step(&self) -> Result<(), ConfigurationError> {
        if self.config.completion != CompletionPolicy::AfterTerminalStep {
            return Err(ConfigurationError::InvalidState {
                expected: "an exchange with a terminal step".to_string(),
                actual: "an exchange that completes after its final round".to_string(),
            });
        }
        match self.state {
            ExchangeState::Ready | ExchangeState::Running if self.remaining_rounds() == 0 => Ok(()),
            ExchangeState::Ready | ExchangeState::Running => Err(ConfigurationError::InvalidState {
                expected: format!("{} completed rounds", self.config.rounds),
                actual: format!("{} completed rounds", self.completed_rounds),
            }),
            other => Err(invalid_state("RUNNING", other)),
        }
    }

    /// Marks the terminal step as done; allowed once, after the final round.
    pub fn complete(&mut self) -> Result<(), ConfigurationError> {
        self.ensure_terminal_step()?;
        self.finish();
        Ok(())
    }

    fn finish(&mut self) {
        self.state = ExchangeState::Complete;
        log::info!("exchange complete after {} rounds", self.completed_rounds);
        self.emit_event(ExchangeEvent::Completed {
            rounds: self.completed_rounds,
        });
    }

    fn emit_event(&self, event: ExchangeEvent) {
        emit(self.event_sender.as_ref(), event);
    }
}

fn emit(sender: Option<&mpsc::UnboundedSender<ExchangeEvent>>, event: ExchangeEvent) {
    if let Some(sender) = sender {
        let _ = sender.send(event);
    }
}

async fn run_round(
    first: &mut Agent,
    second: &mut Agent,
    input: &str,
    round: usize,
    events: Option<&mpsc::UnboundedSender<ExchangeEvent>>,
) -> Result<(Reply, Reply), SessionError> {
    let checkpoint = first.checkpoint().await?;
    let first_reply = first.respond(input).await?;
    emit(
        events,
        ExchangeEvent::TurnCompleted {
            round,
            speaker: first.name().to_string(),
            text: first_reply.text.clone(),
        },
    );

    match second.respond(&first_reply.text).await {
        Ok(second_reply) => {
            emit(
                events,
                ExchangeEvent::TurnCompleted {
                    round,
                    speaker: second.name().to_string(),
                    text: second_reply.text.clone(),
                },
            );
            Ok((first_reply, second_reply))
        }
        Err(err) => {
            if let Err(restore_err) = first.restore(checkpoint).await {
                log::warn!("could not rewind {}: {restore_err}", first.name());
            }
            Err(err)
        }
    }
}

fn invalid_state(expected: &str, actual: ExchangeState) -> ConfigurationError {
    ConfigurationError::InvalidState {
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

impl std::fmt::Debug for ExchangeDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeDriver")
            .field("state", &self.state)
            .field("rounds", &self.config.rounds)
            .field("completed_rounds", &self.completed_rounds)
            .field("transcript_len", &self.transcript.len())
            .finish()
    }
}
