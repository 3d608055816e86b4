use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// 1-based round the turn belongs to.
    pub round: usize,
    pub speaker: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only record of every turn in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, round: usize, speaker: &str, text: &str) {
        self.entries.push(TranscriptEntry {
            round,
            speaker: speaker.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders `"<speaker>: <text>"` entries separated by blank lines.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.speaker, e.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_joins_speaker_lines() {
        let mut transcript = Transcript::new();
        transcript.push(1, "Pro", "Opening");
        transcript.push(1, "Con", "Rebuttal");
        assert_eq!(transcript.render(), "Pro: Opening\n\nCon: Rebuttal");
        assert_eq!(transcript.entries()[1].round, 1);
    }

    #[test]
    fn empty_transcript_renders_empty() {
        assert_eq!(Transcript::new().render(), "");
    }
}
