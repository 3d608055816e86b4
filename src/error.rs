use thiserror::Error;

/// Errors raised by a generation or retrieval capability.
///
/// The engine never inspects or retries these; they travel up through the
/// agent and exchange layers untouched.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Errors returned by the LLM provider
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// Document retrieval failed
    #[error("Retrieval error: {0}")]
    RetrievalError(String),
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Retry attempts exceeded
    #[error("Retry attempts exceeded after {attempts} tries: {last_error}")]
    RetryExceeded { attempts: usize, last_error: String },
}

/// Converts reqwest HTTP errors into LlmErrors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}

/// Misconfiguration detected before (or instead of) talking to a provider.
///
/// None of these are retryable: they point at a bad label, a missing
/// parameter, or an engine object used out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Session-length label outside the fixed lookup table
    #[error("unrecognized session length '{0}' (expected one of: Short, Long)")]
    UnknownSessionLength(String),
    /// Engine identifier that maps to no backend
    #[error("unsupported chat engine '{0}'")]
    UnsupportedEngine(String),
    /// Agent asked to respond before `instruct`
    #[error("agent '{0}' was used before being instructed")]
    Uninstructed(String),
    /// Required session parameter absent or blank
    #[error("missing required session parameter: {0}")]
    MissingParameter(&'static str),
    /// Session parameter present but out of range
    #[error("invalid session parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// Operation not allowed in the exchange's current state
    #[error("invalid exchange state: expected {expected}, found {actual}")]
    InvalidState { expected: String, actual: String },
}

/// Error returned by agents, exchanges, reducers and sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Capability(#[from] LLMError),
}

impl SessionError {
    /// Whether the failure came from the generation or retrieval capability.
    pub fn is_capability(&self) -> bool {
        matches!(self, SessionError::Capability(_))
    }
}
