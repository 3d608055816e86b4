//! Document retrieval for retrieval-augmented agents.
//!
//! The engine only needs "top-k passages for a query"; how the index is
//! built is the caller's business. [`TfIdfIndex`] is an in-memory
//! implementation good enough for a single paper.

pub mod tfidf;

use async_trait::async_trait;

use crate::error::LLMError;

pub use tfidf::TfIdfIndex;

/// Number of passages fetched per question.
pub const DEFAULT_TOP_K: usize = 3;

/// One retrieved chunk of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub text: String,
    /// Similarity to the query; higher is closer.
    pub score: f32,
}

impl Passage {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Read-only document index shared by reference between agents.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns at most `k` passages, most relevant first.
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Passage>, LLMError>;
}

/// Joins passages into the block substituted for `{context}`.
pub fn format_context(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
