use std::fmt;

use crate::error::ConfigurationError;

/// Supported chat engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMBackend {
    OpenAI,
    DeepSeek,
    Ollama,
}

impl LLMBackend {
    /// Base URL used when the builder is not given one.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMBackend::OpenAI => "https://api.openai.com/v1/",
            LLMBackend::DeepSeek => "https://api.deepseek.com/v1/",
            LLMBackend::Ollama => "http://localhost:11434/v1/",
        }
    }

    /// Model used when the builder is not given one.
    pub fn default_model(&self) -> &'static str {
        match self {
            LLMBackend::OpenAI => "gpt-4o",
            LLMBackend::DeepSeek => "deepseek-chat",
            LLMBackend::Ollama => "llama3.1",
        }
    }

    /// Local Ollama servers accept unauthenticated requests.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, LLMBackend::Ollama)
    }
}

impl fmt::Display for LLMBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LLMBackend::OpenAI => "OpenAI",
            LLMBackend::DeepSeek => "DeepSeek",
            LLMBackend::Ollama => "Ollama",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for LLMBackend {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LLMBackend::OpenAI),
            "deepseek" => Ok(LLMBackend::DeepSeek),
            "ollama" => Ok(LLMBackend::Ollama),
            _ => Err(ConfigurationError::UnsupportedEngine(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("openai", LLMBackend::OpenAI)]
    #[case("OpenAI", LLMBackend::OpenAI)]
    #[case("DeepSeek", LLMBackend::DeepSeek)]
    #[case(" ollama ", LLMBackend::Ollama)]
    fn parses_engine_ids_case_insensitively(#[case] id: &str, #[case] expected: LLMBackend) {
        assert_eq!(id.parse::<LLMBackend>(), Ok(expected));
    }

    #[test]
    fn unknown_engine_is_unsupported() {
        assert_eq!(
            "claude".parse::<LLMBackend>(),
            Err(ConfigurationError::UnsupportedEngine("claude".into()))
        );
    }
}
