/// Slot replaced with the transcript or log being reduced.
pub const TRANSCRIPT_PLACEHOLDER: &str = "{{transcript}}";

pub(super) const DEBATE_SUMMARY: &str = "Analyze this debate transcript and write a structured summary:
1. List the first side's main arguments with their supporting points
2. List the second side's main arguments with their supporting points
3. Highlight the key areas of disagreement
4. Note any unresolved questions

Debate transcript:
{{transcript}}";

pub(super) const INTERVIEW_SUMMARY: &str = "Analyze this interview transcript and extract the key insights:
1. Identify 3-5 main technical contributions
2. List important technical terms with explanations
3. Highlight novel methodologies
4. Summarize practical implications

Interview transcript:
{{transcript}}";

pub(super) const CRITIQUE_SUMMARY: &str = "Analyze these review critiques:
{{transcript}}

Extract:
1. Methodological concerns
2. Statistical issues
3. Ethical considerations
4. Suggested improvements";

pub(super) const RESPONSE_SUMMARY: &str = "Analyze these author responses:
{{transcript}}

Identify:
1. The 3 strongest defenses
2. 2 potential weaknesses
3. Key evidence provided";

pub(super) const VERDICT: &str = "Based on these critiques:
{{transcript}}

Give final recommendations:
1. Accept/Revise/Reject
2. Required revisions
3. Suggested improvements";

/// Numbers reviewer questions one per paragraph.
pub fn render_critiques(critiques: &[String]) -> String {
    critiques
        .iter()
        .enumerate()
        .map(|(idx, critique)| format!("{}. {}", idx + 1, critique))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Pairs each reviewer question with the author's answer.
pub fn render_responses(responses: &[(String, String)]) -> String {
    responses
        .iter()
        .enumerate()
        .map(|(idx, (question, answer))| {
            format!(
                "{}. Reviewer question: {}\nAuthor response: {}",
                idx + 1,
                question,
                answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critiques_are_numbered() {
        let rendered = render_critiques(&["Sample size?".into(), "Controls?".into()]);
        assert_eq!(rendered, "1. Sample size?\n\n2. Controls?");
    }

    #[test]
    fn responses_pair_question_and_answer() {
        let rendered = render_responses(&[("Why n=12?".into(), "Budget.".into())]);
        assert_eq!(
            rendered,
            "1. Reviewer question: Why n=12?\nAuthor response: Budget."
        );
        assert_eq!(render_responses(&[]), "");
    }
}
