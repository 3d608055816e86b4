//! TF-IDF passage index.
//!
//! Builds IDF weights over the passages themselves and ranks them by cosine
//! similarity to the query vector.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::error::LLMError;

use super::{cosine_similarity, Passage, Retriever};

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "of", "to", "and", "or", "for", "with", "this",
    "that", "be", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "can", "shall", "not", "no",
    "but", "if", "at", "by", "from", "as", "into", "about", "up", "out", "so", "its", "you",
    "your", "i", "my", "we", "our", "they", "them", "their", "he", "she", "his", "her", "what",
    "how", "why", "which",
];

/// In-memory retriever over a fixed set of passages.
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    passages: Vec<String>,
    /// term -> dimension index
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    vectors: Vec<Vec<f32>>,
}

impl TfIdfIndex {
    pub fn from_passages<I, S>(passages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let passages: Vec<String> = passages
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.trim().is_empty())
            .collect();
        if passages.is_empty() {
            return Self::default();
        }

        let tokenized: Vec<Vec<String>> = passages.iter().map(|p| tokenize(p)).collect();
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term.to_string()).or_insert(0) += 1;
                if !vocabulary.contains_key(term) {
                    let idx = vocabulary.len();
                    vocabulary.insert(term.to_string(), idx);
                }
            }
        }

        let n = passages.len() as f32;
        let mut idf = vec![0.0f32; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
            idf[idx] = (n / df.max(1.0)).ln() + 1.0;
        }

        let mut index = Self {
            passages,
            vocabulary,
            idf,
            vectors: Vec::new(),
        };
        index.vectors = tokenized.iter().map(|t| index.vectorize(t)).collect();
        log::debug!(
            "built TF-IDF index: {} passages, {} terms",
            index.passages.len(),
            index.vocabulary.len()
        );
        index
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Ranks passages against `query`; passages sharing no term with it are skipped.
    pub fn search(&self, query: &str, k: usize) -> Vec<Passage> {
        if self.is_empty() || k == 0 {
            return Vec::new();
        }
        let query = self.vectorize(&tokenize(query));
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx, cosine_similarity(&query, v)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        // stable sort keeps document order among equal scores
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
            .into_iter()
            .map(|(idx, score)| Passage::new(self.passages[idx].clone(), score))
            .collect()
    }

    fn vectorize(&self, tokens: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.idf.len()];
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                vector[idx] += self.idf[idx];
            }
        }
        vector
    }
}

#[async_trait]
impl Retriever for TfIdfIndex {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Passage>, LLMError> {
        Ok(self.search(query, k))
    }
}

/// Lowercase, split on non-alphanumerics, drop stop words and single letters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 1)
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
