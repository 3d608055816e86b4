use serde::{Deserialize, Serialize};

use dualbot::resilient_llm::ResilienceConfig;
use dualbot::SessionModels;

const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub models: SessionModels,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub id: String,
    pub api_key: Option<String>,
    /// Environment variable consulted when no key is given directly.
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub resilience: Option<ResilienceConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            id: "openai".to_string(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: None,
            timeout_seconds: None,
            resilience: None,
        }
    }
}

impl EngineConfig {
    /// Picks the first non-empty key from `cli`, the config file, then the environment.
    pub fn resolve_api_key<F>(&self, cli: Option<&str>, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        cli.map(str::to_string)
            .or_else(|| self.api_key.clone())
            .or_else(|| env(&self.api_key_env))
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub path: Option<String>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}
