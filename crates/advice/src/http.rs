use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use risk_model::{HealthReading, RiskAssessment};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::{AdviceConfig, Provider};
use crate::error::AdviceError;
use crate::generator::AdviceGenerator;
use crate::http_utils::{error_message_from_body, join_base_path};
use crate::prompt::build_prompt;

pub struct HttpAdviceGenerator {
    config: AdviceConfig,
    http_client: Client,
}

impl HttpAdviceGenerator {
    pub fn new(config: AdviceConfig) -> Self {
        let http_client = match build_http_client() {
            Ok(client) => client,
            Err(err) => {
                warn!(error = %err, "advice http client build failed, falling back to default");
                Client::new()
            }
        };
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &AdviceConfig {
        &self.config
    }

    fn endpoint(&self) -> Result<String, AdviceError> {
        match self.config.provider {
            Provider::Gemini => join_base_path(
                &self.config.base_url,
                &format!("/v1beta/models/{}:generateContent", self.config.model),
            ),
            Provider::OpenAi => join_base_path(&self.config.base_url, &self.config.chat_path),
        }
    }

    fn payload(&self, prompt: &str) -> Value {
        match self.config.provider {
            Provider::Gemini => json!({
                "contents": [
                    { "role": "user", "parts": [ { "text": prompt } ] }
                ],
                "generationConfig": { "temperature": self.config.temperature },
            }),
            Provider::OpenAi => json!({
                "model": self.config.model,
                "messages": [
                    { "role": "user", "content": prompt }
                ],
                "temperature": self.config.temperature,
            }),
        }
    }

    async fn send(&self, prompt: &str) -> Result<String, AdviceError> {
        let url = self.endpoint()?;
        let request = self
            .http_client
            .post(&url)
            .timeout(self.config.timeout)
            .json(&self.payload(prompt));
        let request = match self.config.provider {
            Provider::Gemini => request.header("x-goog-api-key", &self.config.api_key),
            Provider::OpenAi => request.bearer_auth(&self.config.api_key),
        };

        let started = Instant::now();
        let response = request.send().await.map_err(|err| {
            warn!(
                provider = self.config.provider.as_str(),
                is_timeout = err.is_timeout(),
                is_connect = err.is_connect(),
                error = %err,
                "advice request failed"
            );
            AdviceError::from(err)
        })?;
        let status = response.status();
        let body = response.text().await?;
        info!(
            provider = self.config.provider.as_str(),
            model = %self.config.model,
            status = %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            body_len = body.len(),
            "advice response"
        );
        if !status.is_success() {
            return Err(AdviceError::service(
                Some(status.as_u16()),
                error_message_from_body(&body),
            ));
        }

        let value: Value = serde_json::from_str(&body).map_err(|err| {
            AdviceError::service(Some(status.as_u16()), format!("invalid json: {err}"))
        })?;
        extract_text(self.config.provider, &value)
            .map_err(|message| AdviceError::service(Some(status.as_u16()), message))
    }
}

#[async_trait]
impl AdviceGenerator for HttpAdviceGenerator {
    async fn generate(
        &self,
        reading: &HealthReading,
        assessment: &RiskAssessment,
    ) -> Result<String, AdviceError> {
        let prompt = build_prompt(reading, assessment);
        self.send(&prompt).await
    }
}

fn extract_text(provider: Provider, value: &Value) -> Result<String, String> {
    let text = match provider {
        Provider::Gemini => gemini_text(value),
        Provider::OpenAi => value
            .pointer("/choices/0/message/content")
            .and_then(|val| val.as_str())
            .or_else(|| value.pointer("/choices/0/text").and_then(|val| val.as_str()))
            .unwrap_or("")
            .trim()
            .to_string(),
    };
    if !text.is_empty() {
        return Ok(text);
    }
    if let Some(reason) = value
        .pointer("/promptFeedback/blockReason")
        .and_then(|val| val.as_str())
    {
        return Err(format!("response blocked: {reason}"));
    }
    Err("response missing content".to_string())
}

fn gemini_text(value: &Value) -> String {
    value
        .pointer("/candidates/0/content/parts")
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .redirect(Policy::none())
        .user_agent(concat!("health-console/", env!("CARGO_PKG_VERSION")))
        .build()
}
