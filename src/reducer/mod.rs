//! One-shot reductions over a transcript or review log.

mod templates;

use std::fmt;
use std::sync::Arc;

use crate::{chat::ChatProvider, error::SessionError};

pub use templates::{render_critiques, render_responses, TRANSCRIPT_PLACEHOLDER};

/// Which closing artifact to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionKind {
    /// Each side's arguments, disagreements, open questions.
    DebateSummary,
    /// Contributions, term glossary, methodology, implications.
    InterviewSummary,
    /// Methodological, statistical and ethical concerns raised by the reviewer.
    CritiqueSummary,
    /// Strongest defenses, weaknesses and evidence in the author's answers.
    ResponseSummary,
    /// Accept/revise/reject with required and suggested changes.
    Verdict,
}

impl ReductionKind {
    #[must_use]
    pub const fn template(&self) -> &'static str {
        match self {
            Self::DebateSummary => templates::DEBATE_SUMMARY,
            Self::InterviewSummary => templates::INTERVIEW_SUMMARY,
            Self::CritiqueSummary => templates::CRITIQUE_SUMMARY,
            Self::ResponseSummary => templates::RESPONSE_SUMMARY,
            Self::Verdict => templates::VERDICT,
        }
    }

    /// Builds the prompt sent to the model.
    #[must_use]
    pub fn prompt(&self, text: &str) -> String {
        self.template().replace(TRANSCRIPT_PLACEHOLDER, text)
    }
}

impl fmt::Display for ReductionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DebateSummary => "debate summary",
            Self::InterviewSummary => "interview summary",
            Self::CritiqueSummary => "critique summary",
            Self::ResponseSummary => "response summary",
            Self::Verdict => "verdict",
        };
        f.write_str(name)
    }
}

/// Issues stateless reduction calls against one provider.
#[derive(Clone)]
pub struct Reducer {
    provider: Arc<dyn ChatProvider>,
}

impl Reducer {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Exactly one generation call, no system prompt and no history.
    pub async fn reduce(&self, text: &str, kind: ReductionKind) -> Result<String, SessionError> {
        if text.trim().is_empty() {
            log::warn!("producing {kind} from empty input");
        }
        log::debug!("producing {kind} with {}", self.provider.model());
        Ok(self.provider.generate("", &[], &kind.prompt(text)).await?)
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("model", &self.provider.model())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRole;
    use crate::test_support::{Script, ScriptedProvider};
    use rstest::rstest;

    #[rstest]
    #[case(ReductionKind::DebateSummary, "disagreement")]
    #[case(ReductionKind::InterviewSummary, "technical terms")]
    #[case(ReductionKind::CritiqueSummary, "Statistical issues")]
    #[case(ReductionKind::ResponseSummary, "strongest defenses")]
    #[case(ReductionKind::Verdict, "Accept/Revise/Reject")]
    fn prompts_embed_the_input(#[case] kind: ReductionKind, #[case] marker: &str) {
        let prompt = kind.prompt("Pro: yes\n\nCon: no");
        assert!(prompt.contains("Pro: yes\n\nCon: no"));
        assert!(prompt.contains(marker));
        assert!(!prompt.contains(TRANSCRIPT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn reduce_is_a_single_stateless_call() {
        let script = Script::new();
        let reducer = Reducer::new(Arc::new(ScriptedProvider::new("summarizer", script.clone())));

        reducer
            .reduce("Pro: yes", ReductionKind::DebateSummary)
            .await
            .expect("summary");
        reducer
            .reduce("Pro: again", ReductionKind::DebateSummary)
            .await
            .expect("summary");

        let calls = script.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].messages.len(), 1);
        assert_eq!(calls[1].messages[0].role, ChatRole::User);
        assert!(calls[1].input().contains("Pro: again"));
    }

    #[tokio::test]
    async fn empty_input_is_still_reduced() {
        let script = Script::new();
        let reducer = Reducer::new(Arc::new(ScriptedProvider::new("summarizer", script.clone())));
        reducer
            .reduce("", ReductionKind::Verdict)
            .await
            .expect("verdict");
        assert_eq!(script.call_count(), 1);
    }

    #[tokio::test]
    async fn capability_errors_propagate() {
        let script = Script::failing_at(1);
        let reducer = Reducer::new(Arc::new(ScriptedProvider::new("summarizer", script)));
        let err = reducer
            .reduce("x", ReductionKind::InterviewSummary)
            .await
            .unwrap_err();
        assert!(err.is_capability());
    }
}
