//! Client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! OpenAI, DeepSeek and Ollama all accept the same request shape, so one
//! client serves every [`LLMBackend`]; only the base URL and the API key
//! requirement differ.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    builder::LLMBackend,
    chat::{ChatMessage, ChatProvider, ChatResponse, Usage},
    error::LLMError,
};

/// Configuration for the OpenAI-compatible client.
#[derive(Debug)]
pub struct OpenAICompatibleConfig {
    /// Backend flavor, used for defaults and error messages.
    pub backend: LLMBackend,
    /// Bearer token; optional only for backends that do not need one.
    pub api_key: Option<SecretString>,
    /// Base URL ending right before `chat/completions`.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for an OpenAI-compatible chat API.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAICompatible {
    /// Shared configuration wrapped in Arc for cheap cloning.
    pub config: Arc<OpenAICompatibleConfig>,
    /// HTTP client for making requests.
    pub client: Client,
}

#[derive(Serialize)]
struct CompatChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompatChatRequest<'a> {
    model: &'a str,
    messages: Vec<CompatChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct CompatChatResponse {
    choices: Vec<CompatChatChoice>,
    usage: Option<Usage>,
}

impl std::fmt::Display for CompatChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

#[derive(Deserialize, Debug)]
struct CompatChatChoice {
    message: CompatChatMsg,
}

#[derive(Deserialize, Debug)]
struct CompatChatMsg {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse for CompatChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

impl OpenAICompatible {
    /// Creates a client, building a dedicated HTTP client with the timeout.
    pub fn new(config: OpenAICompatibleConfig) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Creates a new client with a custom HTTP client.
    pub fn with_client(client: Client, config: OpenAICompatibleConfig) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn backend(&self) -> &LLMBackend {
        &self.config.backend
    }

    pub fn temperature(&self) -> Option<f32> {
        self.config.temperature
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn api_key(&self) -> Result<Option<&str>, LLMError> {
        match &self.config.api_key {
            Some(key) => Ok(Some(key.expose_secret().as_str())),
            None if self.config.backend.requires_api_key() => Err(LLMError::AuthError(format!(
                "Missing {} API key",
                self.config.backend
            ))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAICompatible {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let api_key = self.api_key()?;

        let body = CompatChatRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|m| CompatChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("{} request payload: {}", self.config.backend, json);
            }
        }

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        let status = resp.status();
        log::debug!("{} HTTP status: {}", self.config.backend, status);

        let raw = resp.text().await?;
        if !status.is_success() {
            return Err(status_error(&self.config.backend, status, raw));
        }

        let parsed: CompatChatResponse =
            serde_json::from_str(&raw).map_err(|err| LLMError::ResponseFormatError {
                message: err.to_string(),
                raw_response: raw.clone(),
            })?;
        Ok(Box::new(parsed))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

fn status_error(backend: &LLMBackend, status: StatusCode, body: String) -> LLMError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LLMError::AuthError(format!("{backend} rejected credentials: {body}"))
        }
        _ => LLMError::ProviderError(format!("{backend} returned {status}: {body}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: String, api_key: Option<&str>) -> OpenAICompatibleConfig {
        OpenAICompatibleConfig {
            backend: LLMBackend::OpenAI,
            api_key: api_key.map(|k| SecretString::new(k.to_string())),
            base_url,
            model: "gpt-4o".to_string(),
            max_tokens: None,
            temperature: Some(0.5),
            timeout_seconds: Some(5),
        }
    }

    #[tokio::test]
    async fn chat_posts_messages_and_parses_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o",
                "temperature": 0.5,
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "Begin the debate."}
                ]
            })))
            .with_status(200)
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Opening statement"}}],
                    "usage":{"prompt_tokens":10,"completion_tokens":3,"total_tokens":13}}"#,
            )
            .create_async()
            .await;

        let client =
            OpenAICompatible::new(config(format!("{}/v1/", server.url()), Some("sk-test")))
                .expect("client");
        let reply = client
            .generate("persona", &[], "Begin the debate.")
            .await
            .expect("reply");

        assert_eq!(reply, "Opening statement");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":"bad key"}"#)
            .create_async()
            .await;

        let client = OpenAICompatible::new(config(server.url(), Some("sk-bad"))).expect("client");
        let err = client.generate("", &[], "hi").await.unwrap_err();
        assert!(matches!(err, LLMError::AuthError(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_response_format_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = OpenAICompatible::new(config(server.url(), Some("sk"))).expect("client");
        let err = client.generate("", &[], "hi").await.unwrap_err();
        match err {
            LLMError::ResponseFormatError { raw_response, .. } => {
                assert_eq!(raw_response, "not json")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client =
            OpenAICompatible::new(config("http://127.0.0.1:9".to_string(), None)).expect("client");
        let err = client.generate("", &[], "hi").await.unwrap_err();
        assert!(matches!(err, LLMError::AuthError(_)));
    }
}
