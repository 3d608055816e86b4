use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    agent::{Agent, RetrievalAgent},
    builder::ProviderFactory,
    error::SessionError,
    exchange::{ExchangeConfig, ExchangeDriver, ExchangeEvent, ExchangeState, Transcript},
    persona,
    reducer::{ReductionKind, Reducer},
    retrieval::Retriever,
};

use super::{QaRound, SessionModels};

/// Fixed number of question/answer rounds in a paper interview.
pub const INTERVIEW_ROUNDS: usize = 6;

/// Driving input of the journalist's first question.
pub const INTERVIEW_SENTINEL: &str = "Begin the interview.";

/// Paper digestion: a journalist interviews a retrieval-grounded author.
pub struct InterviewSession {
    driver: ExchangeDriver,
    summarizer: Reducer,
    topic: String,
}

impl InterviewSession {
    pub async fn new(
        factory: &dyn ProviderFactory,
        topic: &str,
        abstract_text: &str,
        retriever: Arc<dyn Retriever>,
    ) -> Result<Self, SessionError> {
        Self::with_models(
            factory,
            &SessionModels::default(),
            topic,
            abstract_text,
            retriever,
        )
        .await
    }

    pub async fn with_models(
        factory: &dyn ProviderFactory,
        models: &SessionModels,
        topic: &str,
        abstract_text: &str,
        retriever: Arc<dyn Retriever>,
    ) -> Result<Self, SessionError> {
        persona::require(topic, "topic")?;
        persona::require(abstract_text, "abstract")?;

        let mut journalist: Agent = models
            .memory_agent("Journalist", factory.provider(&models.journalist)?)?
            .into();
        let mut author: Agent = RetrievalAgent::new(
            "Author",
            factory.provider(&models.interview_author)?,
            retriever,
        )
        .into();
        journalist
            .instruct(persona::journalist(topic, abstract_text))
            .await?;
        author.instruct(persona::author(topic)).await?;

        let summarizer = Reducer::new(factory.provider(&models.interview_summarizer)?);

        let mut driver =
            ExchangeDriver::new(ExchangeConfig::new(INTERVIEW_ROUNDS, INTERVIEW_SENTINEL));
        driver.wire(journalist, author)?;
        log::info!("interview ready on '{topic}', {INTERVIEW_ROUNDS} rounds");

        Ok(Self {
            driver,
            summarizer,
            topic: topic.to_string(),
        })
    }

    /// The journalist asks, the author answers from retrieved passages.
    pub async fn step(&mut self) -> Result<QaRound, SessionError> {
        Ok(self.driver.step().await?.into())
    }

    pub async fn summary(&self, transcript: &str) -> Result<String, SessionError> {
        self.summarizer
            .reduce(transcript, ReductionKind::InterviewSummary)
            .await
    }

    pub async fn summarize(&self) -> Result<String, SessionError> {
        self.summary(&self.driver.transcript().render()).await
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

    pub fn remaining_rounds(&self) -> usize {
        self.driver.remaining_rounds()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}
