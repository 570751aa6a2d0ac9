//! Chat-completion API access.
//!
//! # Architecture
//!
//! - [`AskAsync`]: core trait, one prompt in and one completion out
//! - [`ChatCompletionClient`]: OpenAI-compatible `/chat/completions` client
//!
//! Calls are single shot: no retries, no streaming.

use crate::config::LlmSettings;
use crate::error::SummarizeError;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Trait for async LLM interaction.
///
/// Implementors send text to an LLM and return its reply.
pub trait AskAsync {
    /// Send `text` as a single user message and return the completion text.
    async fn ask(&self, text: &str) -> Result<String, SummarizeError>;
}

/// Client for an OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: reqwest::Client,
    settings: LlmSettings,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl ChatCompletionClient {
    pub fn new(settings: LlmSettings) -> Result<Self, SummarizeError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { http, settings })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, text: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            temperature: self.settings.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: text,
            }],
        }
    }
}

/// Extract the first choice's content from a completion body.
fn parse_completion(body: &[u8]) -> Result<String, SummarizeError> {
    let parsed: ChatResponse = serde_json::from_slice(body)?;
    parsed
        .choices
        .into_iter()
        .find_map(|choice| choice.message.content)
        .ok_or(SummarizeError::EmptyResponse)
}

impl AskAsync for ChatCompletionClient {
    #[instrument(level = "info", skip_all, fields(model = %self.settings.model))]
    async fn ask(&self, text: &str) -> Result<String, SummarizeError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(SummarizeError::MissingApiKey)?;

        let t0 = Instant::now();
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&self.build_request(text))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            warn!(elapsed_ms = dt.as_millis() as u64, %status, "API call failed");
            return Err(SummarizeError::Api { status, message });
        }

        let content = parse_completion(&body)?;
        info!(elapsed_ms = dt.as_millis() as u64, bytes = content.len(), "Completion received");
        Ok(content)
    }
}
