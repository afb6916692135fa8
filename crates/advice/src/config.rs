use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::error::AdviceError;

const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_MS: u64 = 20_000;
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    Gemini,
    #[serde(rename = "openai", alias = "openai_compatible")]
    OpenAi,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    fn default_base_url(self) -> &'static str {
        match self {
            Provider::Gemini => DEFAULT_GEMINI_BASE_URL,
            Provider::OpenAi => DEFAULT_OPENAI_BASE_URL,
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => DEFAULT_GEMINI_MODEL,
            Provider::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }
}

/// The `[advice]` section of the console config, as written by the operator.
#[derive(Debug, Clone, Deserialize)]
pub struct AdviceSettings {
    #[serde(default)]
    pub provider: Provider,
    pub base_url: Option<String>,
    pub model: Option<String>,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    /// Inline key. Takes precedence over `api_key_env`.
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            base_url: None,
            model: None,
            chat_path: default_chat_path(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
            temperature: default_temperature(),
        }
    }
}

impl AdviceSettings {
    /// Resolves the credential from the process environment.
    pub fn resolve(&self) -> Result<AdviceConfig, AdviceError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(&self, lookup: F) -> Result<AdviceConfig, AdviceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(&self.api_key_env).filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| {
                AdviceError::Configuration(format!(
                    "{} not set and no api_key in config",
                    self.api_key_env
                ))
            })?;
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| self.provider.default_base_url().to_string());
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string());
        Ok(AdviceConfig {
            provider: self.provider,
            base_url,
            model,
            chat_path: self.chat_path.clone(),
            api_key: api_key.trim().to_string(),
            timeout: Duration::from_millis(self.timeout_ms),
            temperature: self.temperature,
        })
    }
}

/// Fully resolved client configuration. Built once at startup and read-only
/// afterwards.
#[derive(Clone)]
pub struct AdviceConfig {
    pub provider: Provider,
    pub base_url: String,
    pub model: String,
    pub chat_path: String,
    pub api_key: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("chat_path", &self.chat_path)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

fn default_chat_path() -> String {
    "/v1/chat/completions".to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
