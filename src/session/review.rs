use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    agent::{Agent, RetrievalAgent},
    builder::{GenerationParams, ProviderFactory},
    error::SessionError,
    exchange::{ExchangeConfig, ExchangeDriver, ExchangeEvent, ExchangeState, Transcript},
    persona::{self, rigor_to_temperature},
    reducer::{render_critiques, render_responses, ReductionKind, Reducer},
    retrieval::Retriever,
};

use super::{QaRound, SessionModels};

/// Question/answer rounds before the verdict.
pub const REVIEW_ROUNDS: usize = 4;

/// Driving input of the reviewer's first question.
pub const REVIEW_SENTINEL: &str = "Generate a critical review question.";

/// Peer-review simulation: four probing rounds, then a single verdict.
pub struct ReviewSession {
    driver: ExchangeDriver,
    /// Runs on the reviewer's model and temperature.
    reviewer_reducer: Reducer,
    /// Runs on the author's model and temperature.
    author_reducer: Reducer,
    critiques: Vec<String>,
    responses: Vec<(String, String)>,
    verdict: Option<String>,
}

impl ReviewSession {
    pub async fn new(
        factory: &dyn ProviderFactory,
        title: &str,
        abstract_text: &str,
        retriever: Arc<dyn Retriever>,
        focus_areas: &[String],
        rigor: u32,
    ) -> Result<Self, SessionError> {
        Self::with_models(
            factory,
            &SessionModels::default(),
            title,
            abstract_text,
            retriever,
            focus_areas,
            rigor,
        )
        .await
    }

    pub async fn with_models(
        factory: &dyn ProviderFactory,
        models: &SessionModels,
        title: &str,
        abstract_text: &str,
        retriever: Arc<dyn Retriever>,
        focus_areas: &[String],
        rigor: u32,
    ) -> Result<Self, SessionError> {
        persona::require(title, "title")?;
        persona::require(abstract_text, "abstract")?;
        if focus_areas.is_empty() {
            log::warn!("review of '{title}' has no focus areas");
        }

        let reviewer_persona = persona::reviewer(title, abstract_text, focus_areas, rigor);
        let reviewer_params = GenerationParams::new(
            models.reviewer_model.clone(),
            reviewer_persona
                .temperature
                .unwrap_or_else(|| rigor_to_temperature(rigor)),
        );
        let reviewer_provider = factory.provider(&reviewer_params)?;
        let author_provider = factory.provider(&models.review_author)?;

        let mut reviewer: Agent = models
            .memory_agent("Reviewer", reviewer_provider.clone())?
            .into();
        let mut author: Agent =
            RetrievalAgent::new("Author", author_provider.clone(), retriever).into();
        reviewer.instruct(reviewer_persona).await?;
        author
            .instruct(persona::review_author(title, abstract_text))
            .await?;

        let mut driver = ExchangeDriver::new(
            ExchangeConfig::new(REVIEW_ROUNDS, REVIEW_SENTINEL).with_terminal_step(),
        );
        driver.wire(reviewer, author)?;
        log::info!(
            "review ready for '{title}', rigor {} (temperature {:.2})",
            rigor.min(persona::MAX_RIGOR),
            reviewer_params.temperature
        );

        Ok(Self {
            driver,
            reviewer_reducer: Reducer::new(reviewer_provider),
            author_reducer: Reducer::new(author_provider),
            critiques: Vec::new(),
            responses: Vec::new(),
            verdict: None,
        })
    }

    /// The reviewer asks one question and the author answers it.
    pub async fn step(&mut self) -> Result<QaRound, SessionError> {
        let round: QaRound = self.driver.step().await?.into();
        self.critiques.push(round.question.clone());
        self.responses
            .push((round.question.clone(), round.answer.clone()));
        Ok(round)
    }

    /// Issues the terminal verdict; allowed once, after the last round.
    pub async fn generate_verdict(&mut self) -> Result<String, SessionError> {
        self.driver.ensure_terminal_step()?;
        let verdict = self
            .reviewer_reducer
            .reduce(&render_critiques(&self.critiques), ReductionKind::Verdict)
            .await?;
        self.driver.complete()?;
        self.verdict = Some(verdict.clone());
        Ok(verdict)
    }

    pub async fn summarize_critiques(&self) -> Result<String, SessionError> {
        self.reviewer_reducer
            .reduce(
                &render_critiques(&self.critiques),
                ReductionKind::CritiqueSummary,
            )
            .await
    }

    pub async fn summarize_responses(&self) -> Result<String, SessionError> {
        self.author_reducer
            .reduce(
                &render_responses(&self.responses),
                ReductionKind::ResponseSummary,
            )
            .await
    }

    /// Reviewer questions in the order they were asked.
    pub fn critiques(&self) -> &[String] {
        &self.critiques
    }

    /// `(question, answer)` pairs in round order.
    pub fn responses(&self) -> &[(String, String)] {
        &self.responses
    }

    pub fn verdict(&self) -> Option<&str> {
        self.verdict.as_deref()
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
}
