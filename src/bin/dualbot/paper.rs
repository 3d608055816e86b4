use std::fs;
use std::path::Path;

use anyhow::Context;
use dualbot::TfIdfIndex;

/// Target upper bound for one passage, in characters.
pub const MAX_PASSAGE_CHARS: usize = 1_200;

/// A plain-text paper split into retrievable passages.
#[derive(Debug)]
pub struct Paper {
    pub passages: Vec<String>,
    abstract_text: String,
}

impl Paper {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading paper {}", path.display()))?;
        let passages = split_passages(&text, MAX_PASSAGE_CHARS);
        if passages.is_empty() {
            anyhow::bail!("paper {} has no text", path.display());
        }
        log::info!("loaded {} passages from {}", passages.len(), path.display());
        Ok(Self {
            passages,
            abstract_text: find_abstract(&text),
        })
    }

    /// Abstract used when none is given on the command line.
    pub fn abstract_text(&self) -> &str {
        &self.abstract_text
    }

    pub fn index(&self) -> TfIdfIndex {
        TfIdfIndex::from_passages(self.passages.iter().cloned())
    }
}

/// Packs blank-line separated paragraphs into passages of at most `max_chars`.
///
/// Paragraph line breaks are folded into spaces. A paragraph longer than
/// `max_chars` is cut on word boundaries.
pub fn split_passages(text: &str, max_chars: usize) -> Vec<String> {
    let mut passages = Vec::new();
    let mut current = String::new();

    for paragraph in paragraphs(text) {
        if paragraph.chars().count() > max_chars {
            flush(&mut current, &mut passages);
            passages.extend(split_words(&paragraph, max_chars));
            continue;
        }
        if !current.is_empty() && !fits(&current, &paragraph, max_chars) {
            flush(&mut current, &mut passages);
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(&paragraph);
    }
    flush(&mut current, &mut passages);
    passages
}

/// Non-empty blank-line separated paragraphs, whitespace folded.
fn paragraphs(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
}

/// The paragraph labelled "Abstract", else the first paragraph.
fn find_abstract(text: &str) -> String {
    let mut first = None;
    for paragraph in paragraphs(text) {
        if let Some(body) = strip_abstract_label(&paragraph) {
            return body.to_string();
        }
        first.get_or_insert(paragraph);
    }
    first.unwrap_or_default()
}

fn strip_abstract_label(paragraph: &str) -> Option<&str> {
    let label = paragraph.get(..8)?;
    if !label.eq_ignore_ascii_case("abstract") {
        return None;
    }
    let rest = &paragraph[8..];
    if rest.starts_with(char::is_alphanumeric) {
        return None;
    }
    let body = rest.trim_start_matches([':', '.', '-', ' ']);
    (!body.is_empty()).then_some(body)
}

fn split_words(paragraph: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for word in paragraph.split(' ') {
        if !current.is_empty() && !fits(&current, word, max_chars) {
            flush(&mut current, &mut chunks);
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    flush(&mut current, &mut chunks);
    chunks
}

/// Whether `next` can join `current` with one separator and stay within `max_chars`.
fn fits(current: &str, next: &str, max_chars: usize) -> bool {
    current.chars().count() + 1 + next.chars().count() <= max_chars
}

fn flush(current: &mut String, out: &mut Vec<String>) {
    if !current.is_empty() {
        out.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn short_paragraphs_are_packed_together() {
        let text = "Alpha beta.\n\nGamma delta.\n\n\n\nEpsilon.";
        assert_eq!(
            split_passages(text, 100),
            ["Alpha beta.\nGamma delta.\nEpsilon."]
        );
    }

    #[test]
    fn passages_respect_the_limit() {
        let text = "aaaa bbbb\n\ncccc dddd\n\neeee";
        assert_eq!(split_passages(text, 10), ["aaaa bbbb", "cccc dddd", "eeee"]);
    }

    #[test]
    fn long_paragraph_is_cut_on_words() {
        let text = "one two three four five six";
        let passages = split_passages(text, 9);
        assert_eq!(passages, ["one two", "three", "four five", "six"]);
        assert!(passages.iter().all(|p| p.chars().count() <= 9));
    }

    #[test]
    fn line_breaks_inside_a_paragraph_are_folded() {
        assert_eq!(
            split_passages("We propose\na new\n  method.", 100),
            ["We propose a new method."]
        );
    }

    #[test]
    fn loads_file_into_searchable_index() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            "Abstract: sparse attention cuts memory.\n\n{}\n\nResults improve perplexity.",
            "filler ".repeat(300)
        )
        .expect("write");

        let paper = Paper::load(file.path()).expect("paper");
        assert_eq!(paper.abstract_text(), "sparse attention cuts memory.");

        let hits = paper.index().search("perplexity results", 1);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.contains("perplexity"));
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().expect("tempfile");
        assert!(Paper::load(file.path()).is_err());
    }

    #[test]
    fn abstract_defaults_to_the_first_paragraph_alone() {
        let text = "We study X.\n\nIntroduction text.\n\nMore detail.";
        assert_eq!(find_abstract(text), "We study X.");
        assert_eq!(split_passages(text, 1_000).len(), 1);
    }

    #[test]
    fn labelled_abstract_is_found_after_the_title() {
        let text = "Title of paper\n\nABSTRACT\nWe study X.\n\nIntroduction text.";
        assert_eq!(find_abstract(text), "We study X.");
    }

    #[test]
    fn words_starting_with_abstract_are_not_a_label() {
        assert_eq!(strip_abstract_label("Abstraction layers matter."), None);
        assert_eq!(strip_abstract_label("Abstract."), None);
    }
}
