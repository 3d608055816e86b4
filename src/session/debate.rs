use tokio::sync::mpsc;

use crate::{
    agent::Agent,
    builder::ProviderFactory,
    error::{ConfigurationError, SessionError},
    exchange::{ExchangeConfig, ExchangeDriver, ExchangeEvent, ExchangeState, Transcript},
    persona::{self, Role, SessionLength},
    reducer::{ReductionKind, Reducer},
};

use super::SessionModels;

/// Driving input of the first debate round.
pub const DEBATE_SENTINEL: &str = "Begin the debate.";

/// The two statements of one debate round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateRound {
    pub round: usize,
    pub first: String,
    pub second: String,
}

/// Adversarial debate between two memory agents.
pub struct DebateSession {
    driver: ExchangeDriver,
    summarizer: Reducer,
    roles: (Role, Role),
    length: SessionLength,
}

impl DebateSession {
    /// Builds a debate with the default models.
    pub async fn new(
        factory: &dyn ProviderFactory,
        roles: (Role, Role),
        scenario: &str,
        session_length: &str,
    ) -> Result<Self, SessionError> {
        Self::with_models(
            factory,
            &SessionModels::default(),
            roles,
            scenario,
            session_length,
        )
        .await
    }

    /// The first role opens; the second waits for the opening statement.
    pub async fn with_models(
        factory: &dyn ProviderFactory,
        models: &SessionModels,
        roles: (Role, Role),
        scenario: &str,
        session_length: &str,
    ) -> Result<Self, SessionError> {
        let length: SessionLength = session_length.parse()?;
        persona::require(scenario, "scenario")?;
        persona::require(&roles.0.name, "first role name")?;
        persona::require(&roles.1.name, "second role name")?;

        let (first_role, second_role) = &roles;
        let first_persona =
            persona::compile(first_role, scenario, second_role, session_length, true)?;
        let second_persona =
            persona::compile(second_role, scenario, first_role, session_length, false)?;

        let mut first: Agent = models
            .memory_agent(first_role.name.clone(), factory.provider(&models.debater)?)?
            .into();
        let mut second: Agent = models
            .memory_agent(second_role.name.clone(), factory.provider(&models.debater)?)?
            .into();
        first.instruct(first_persona).await?;
        second.instruct(second_persona).await?;

        let summarizer = Reducer::new(factory.provider(&models.debate_summarizer)?);

        let mut driver = ExchangeDriver::new(ExchangeConfig::new(
            length.exchange_count(),
            DEBATE_SENTINEL,
        ));
        driver.wire(first, second)?;
        log::info!(
            "debate ready: {} vs {}, {} rounds",
            first_role.name,
            second_role.name,
            length.exchange_count()
        );

        Ok(Self {
            driver,
            summarizer,
            roles,
            length,
        })
    }

    /// Runs one round and returns both statements.
    pub async fn step(&mut self) -> Result<DebateRound, SessionError> {
        let output = self.driver.step().await?;
        Ok(DebateRound {
            round: output.round,
            first: output.first.text,
            second: output.second.text,
        })
    }

    /// Summarizes a rendered transcript.
    pub async fn summary(&self, transcript: &str) -> Result<String, SessionError> {
        self.summarizer
            .reduce(transcript, ReductionKind::DebateSummary)
            .await
    }

    /// Summarizes this session's own transcript.
    pub async fn summarize(&self) -> Result<String, SessionError> {
        self.summary(&self.driver.transcript().render()).await
    }

    /// Errors unless every round has run.
    pub fn ensure_finished(&self) -> Result<(), ConfigurationError> {
        match self.driver.state() {
            ExchangeState::Complete => Ok(()),
            other => Err(ConfigurationError::InvalidState {
                expected: ExchangeState::Complete.to_string(),
                actual: other.to_string(),
            }),
        }
    }

    pub fn create_event_channel(&mut self) -> mpsc::UnboundedReceiver<ExchangeEvent> {
        self.driver.create_event_channel()
    }

    pub fn transcript(&self) -> &Transcript {
        self.driver.transcript()
    }

    pub fn state(&self) -> ExchangeState {
        self.driver.state()
    }

    pub fn rounds(&self) -> usize {
        self.length.exchange_count()
    }

    pub fn remaining_rounds(&self) -> usize {
        self.driver.remaining_rounds()
    }

    pub fn roles(&self) -> &(Role, Role) {
        &self.roles
    }
}
