use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LLMError};
use crate::config::LlmConfig;

const COMPLETIONS_PATH: &str = "/chat/completions";

/// A backend able to turn one prompt into one completion
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError>;

    /// Model identifier, shown in the page footer
    fn model(&self) -> &str;
}

/// Blocking-per-request client for OpenAI-compatible `/v1/chat/completions`
pub struct OpenAICompatibleClient {
    http_client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

impl OpenAICompatibleClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LLMError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LLMError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: completions_url(&config.api_base),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_transport_error(&self, err: reqwest::Error) -> LLMError {
        if err.is_timeout() {
            LLMError::Timeout(self.timeout_secs)
        } else {
            LLMError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAICompatibleClient {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );
        let start = Instant::now();

        let response = self
            .http_client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_transport_error(e))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            tracing::warn!(status = %status, latency_ms, "Completion request rejected");
            return Err(LLMError::Request(format!("{}: {}", status, body.trim())));
        }

        let envelope: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| LLMError::MalformedResponse(e.to_string()))?;

        if let Some(usage) = &envelope.usage {
            tracing::info!(
                latency_ms,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion received"
            );
        } else {
            tracing::info!(latency_ms, "Completion received");
        }

        envelope.into_content()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Resolve the full completions URL from a configured base
///
/// `https://host` and `https://host/v1` both resolve to
/// `https://host/v1/chat/completions`; a base already ending in
/// `/chat/completions` is used as is.
fn completions_url(api_base: &str) -> String {
    let base = api_base.trim().trim_end_matches('/');
    if base.ends_with(COMPLETIONS_PATH) {
        base.to_string()
    } else if base.ends_with("/v1") {
        format!("{}{}", base, COMPLETIONS_PATH)
    } else {
        format!("{}/v1{}", base, COMPLETIONS_PATH)
    }
}
