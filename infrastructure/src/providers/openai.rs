//! OpenAI-compatible chat-completions gateway
//!
//! Works against api.openai.com and any server exposing the same
//! `/v1/chat/completions` endpoint (Azure proxies, local model servers).

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use debate_application::{GatewayError, LlmGateway};
use debate_domain::{Message, Model};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Connection and sampling settings for [`OpenAiCompatibleGateway`]
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub api_key: String,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl OpenAiSettings {
    /// Build settings from the `[provider]` section.
    ///
    /// Fails with [`GatewayError::MissingApiKey`] when neither `api_key` nor
    /// the configured environment variable is set.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| GatewayError::MissingApiKey(config.api_key_env.clone()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key,
            temperature: config.temperature,
            top_p: config.top_p,
            frequency_penalty: config.frequency_penalty,
            presence_penalty: config.presence_penalty,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, trimmed; empty when the provider sent none
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }
}

/// LLM gateway for OpenAI-compatible chat-completions APIs
pub struct OpenAiCompatibleGateway {
    settings: OpenAiSettings,
    client: reqwest::Client,
}

impl OpenAiCompatibleGateway {
    pub fn new(settings: OpenAiSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self { settings, client })
    }

    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        Self::new(OpenAiSettings::from_config(config)?)
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    fn build_request<'a>(&'a self, model: &'a Model, messages: &'a [Message]) -> ChatRequest<'a> {
        ChatRequest {
            model: model.as_str(),
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            frequency_penalty: self.settings.frequency_penalty,
            presence_penalty: self.settings.presence_penalty,
            max_tokens: self.settings.max_tokens,
        }
    }
}

fn status_error(status: StatusCode, model: &Model, body: String) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationFailed(format!("Status: {}, Body: {}", status, body))
        }
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(model.to_string()),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("Status: {}, Body: {}", status, body)),
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError> {
        let start = Instant::now();
        let request = self.build_request(model, messages);

        let response = self
            .client
            .post(self.settings.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, model, body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        debug!(
            model = %model,
            messages = messages.len(),
            tokens = body.usage.as_ref().map(|u| u.total_tokens),
            latency_ms = start.elapsed().as_millis() as u64,
            "Completion received"
        );

        Ok(body.into_text())
    }
}
