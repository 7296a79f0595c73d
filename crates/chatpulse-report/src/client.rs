//! HTTP client for OpenAI-compatible chat-completions endpoints.

use std::time::Duration;

use chatpulse_core::{ConfigError, LlmSettings};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
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

/// Client for a chat-completions provider.
///
/// Use [`LlmClient::new`] for the default provider or
/// [`LlmClient::with_base_url`] to point at another endpoint (or a mock
/// server in tests).
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    endpoint: Url,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self, ReportError> {
        Self::with_base_url(api_key, model, max_tokens, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client posting to `{base_url}/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ReportError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("chatpulse/0.1 (chat-analytics)")
            .build()?;

        // Exactly one trailing slash, so the join appends instead of
        // replacing the last path segment (`/v1`).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| ReportError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            max_tokens,
            endpoint,
        })
    }

    /// Builds a client from the environment-derived provider settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] (wrapped) when no API key is
    /// configured, plus the errors of [`LlmClient::with_base_url`].
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, ReportError> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("LLM_API_KEY".to_string()))?;
        Self::with_base_url(
            api_key,
            &settings.model,
            settings.max_tokens,
            settings.timeout_secs,
            &settings.base_url,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `prompt` as a single user message and returns the first choice.
    ///
    /// # Errors
    ///
    /// - [`ReportError::Http`] on network failure or a non-2xx status.
    /// - [`ReportError::Deserialize`] if the body is not a completion object.
    /// - [`ReportError::EmptyCompletion`] if the first choice has no text.
    pub async fn complete(&self, prompt: &str) -> Result<String, ReportError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ReportError::Deserialize {
                context: format!("chat completion from {}", self.endpoint),
                source: e,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ReportError::EmptyCompletion)
    }
}
