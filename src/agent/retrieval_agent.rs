use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    chat::ChatProvider,
    error::{ConfigurationError, SessionError},
    persona::Persona,
    retrieval::{format_context, Passage, Retriever, DEFAULT_TOP_K},
};

use super::Reply;

/// One answered question and the passage texts it was grounded in.
#[derive(Debug, Clone, PartialEq)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
    pub passages: Vec<String>,
}

/// Agent that answers each question from freshly retrieved passages.
///
/// The model sees only the persona (with `{context}` filled) and the
/// current question. Earlier answers are never replayed; the QA log is
/// consulted only to prefer passages that have not been quoted yet.
pub struct RetrievalAgent {
    name: String,
    provider: Arc<dyn ChatProvider>,
    retriever: Arc<dyn Retriever>,
    top_k: usize,
    persona: Option<Persona>,
    qa_log: Vec<QaEntry>,
}

impl RetrievalAgent {
    pub fn new(
        name: impl Into<String>,
        provider: Arc<dyn ChatProvider>,
        retriever: Arc<dyn Retriever>,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            retriever,
            top_k: DEFAULT_TOP_K,
            persona: None,
            qa_log: Vec::new(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn persona(&self) -> Option<&Persona> {
        self.persona.as_ref()
    }

    /// Answered questions in the order they were produced.
    pub fn qa_log(&self) -> &[QaEntry] {
        &self.qa_log
    }

    pub(super) fn instruct(&mut self, persona: Persona) {
        self.persona = Some(persona);
        self.qa_log.clear();
    }

    pub(super) fn truncate_log(&mut self, len: usize) {
        self.qa_log.truncate(len);
    }

    pub(super) async fn respond(&mut self, question: &str) -> Result<Reply, SessionError> {
        let persona = self
            .persona
            .as_ref()
            .ok_or_else(|| ConfigurationError::Uninstructed(self.name.clone()))?;

        // over-fetch so already quoted passages can be swapped for new ones
        let candidates = self
            .retriever
            .retrieve(question, self.top_k.saturating_mul(2))
            .await?;
        let passages = prefer_unserved(candidates, &self.served(), self.top_k);
        log::debug!("{} retrieved {} passages", self.name, passages.len());
        let system = persona.with_context(&format_context(&passages));

        let text = self.provider.generate(&system, &[], question).await?;
        self.qa_log.push(QaEntry {
            question: question.to_string(),
            answer: text.clone(),
            passages: passages.iter().map(|p| p.text.clone()).collect(),
        });
        Ok(Reply { text, passages })
    }

    fn served(&self) -> HashSet<&str> {
        self.qa_log
            .iter()
            .flat_map(|entry| entry.passages.iter().map(String::as_str))
            .collect()
    }
}

/// Picks `k` candidates, unserved ones first, keeping the retriever's ranking.
///
/// Served passages only fill the slots no new passage can take, so a narrow
/// paper still yields `k` passages per answer.
fn prefer_unserved(candidates: Vec<Passage>, served: &HashSet<&str>, k: usize) -> Vec<Passage> {
    let fresh = candidates
        .iter()
        .filter(|p| !served.contains(p.text.as_str()))
        .count();
    let mut repeats_allowed = k.saturating_sub(fresh);
    let mut picked = Vec::with_capacity(k);
    for passage in candidates {
        if picked.len() == k {
            break;
        }
        if served.contains(passage.text.as_str()) {
            if repeats_allowed == 0 {
                continue;
            }
            repeats_allowed -= 1;
        }
        picked.push(passage);
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Script, ScriptedProvider, StaticRetriever};

    fn agent(script: &Arc<Script>, retriever: Arc<StaticRetriever>) -> RetrievalAgent {
        let provider = Arc::new(ScriptedProvider::new("author", script.clone()));
        let mut agent = RetrievalAgent::new("Author", provider, retriever);
        agent.instruct(Persona::new("Paper says:\n{context}"));
        agent
    }

    #[tokio::test]
    async fn retrieves_per_question_and_fills_context() {
        let script = Script::new();
        let retriever = Arc::new(StaticRetriever::new(["alpha", "beta", "gamma", "delta"]));
        let mut agent = agent(&script, retriever.clone());

        let reply = agent.respond("What is alpha?").await.expect("reply");
        agent.respond("And beta?").await.expect("reply");

        assert_eq!(reply.passages.len(), 3);
        assert_eq!(
            retriever.queries(),
            vec![("What is alpha?".to_string(), 6), ("And beta?".to_string(), 6)]
        );

        let calls = script.calls();
        let call = &calls[0];
        assert_eq!(call.system(), Some("Paper says:\nalpha\n\nbeta\n\ngamma"));
        assert_eq!(call.input(), "What is alpha?");
        assert!(script.calls()[1].history().is_empty());
        assert_eq!(agent.qa_log().len(), 2);
        assert_eq!(agent.qa_log()[0].answer, reply.text);
        assert_eq!(agent.qa_log()[0].passages, ["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn retrieval_failure_propagates_without_generation() {
        let script = Script::new();
        let mut agent = agent(&script, Arc::new(StaticRetriever::failing()));

        let err = agent.respond("q").await.unwrap_err();
        assert!(err.is_capability());
        assert_eq!(script.call_count(), 0);
        assert!(agent.qa_log().is_empty());
    }

    #[tokio::test]
    async fn top_k_is_configurable() {
        let script = Script::new();
        let retriever = Arc::new(StaticRetriever::new(["a", "b", "c"]));
        let provider = Arc::new(ScriptedProvider::new("author", script.clone()));
        let mut agent = RetrievalAgent::new("Author", provider, retriever).with_top_k(1);
        agent.instruct(Persona::new("{context}"));

        let reply = agent.respond("q").await.expect("reply");
        assert_eq!(reply.passages.len(), 1);
    }

    #[tokio::test]
    async fn later_answers_prefer_passages_not_yet_quoted() {
        let script = Script::new();
        let retriever = Arc::new(StaticRetriever::new(["alpha", "beta", "gamma", "delta"]));
        let mut agent = agent(&script, retriever);

        agent.respond("first").await.expect("reply");
        let second = agent.respond("second").await.expect("reply");

        let texts: Vec<&str> = second.passages.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["alpha", "beta", "delta"]);
    }

    #[tokio::test]
    async fn served_passages_fill_in_when_nothing_new_matches() {
        let script = Script::new();
        let retriever = Arc::new(StaticRetriever::new(["alpha", "beta"]));
        let mut agent = agent(&script, retriever);

        agent.respond("first").await.expect("reply");
        let second = agent.respond("second").await.expect("reply");
        assert_eq!(second.passages.len(), 2);
    }

    #[test]
    fn unserved_passages_win_over_higher_ranked_repeats() {
        let candidates = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|t| Passage::new(t, 1.0))
            .collect();
        let served: HashSet<&str> = ["a", "c"].into_iter().collect();

        let picked = prefer_unserved(candidates, &served, 3);
        let texts: Vec<&str> = picked.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["b", "d", "e"]);
    }
}
