use serde::{Deserialize, Serialize};

/// Token accounting reported by a provider for one chat call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    #[serde(alias = "input_tokens")]
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    #[serde(alias = "output_tokens")]
    pub completion_tokens: u32,
    /// Total number of tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::Usage;

    #[test]
    fn parses_responses_api_aliases() {
        let usage: Usage =
            serde_json::from_str(r#"{"input_tokens": 12, "output_tokens": 30, "total_tokens": 42}"#)
                .expect("usage json");
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.completion_tokens, 30);
    }
}
