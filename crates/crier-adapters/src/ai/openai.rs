//! OpenAI chat adapter implementation
//!
//! Implements the ContentGeneratorPort trait for OpenAI's Chat Completions API.

use async_trait::async_trait;
use crier_core::api_key::SecretApiKey;
use crier_core::ports::content::{ContentError, ContentGeneratorPort, ContentPrompt, GeneratedText};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Default text generation model
pub const DEFAULT_TEXT_MODEL: &str = "gpt-4";

/// Chat Completions API endpoint
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Maximum retry attempts for rate limiting
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// OpenAI chat adapter
///
/// Communicates with the Chat Completions API for post text generation.
pub struct OpenAiAdapter {
    client: Client,
    api_key: SecretApiKey,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenAiAdapter {
    /// Creates a new OpenAI adapter
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g., "gpt-4")
    /// * `max_tokens` - Completion token cap
    /// * `temperature` - Sampling temperature
    pub fn new(
        api_key: SecretApiKey,
        model: impl Into<String>,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Returns the model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds the request body for the Chat Completions API
    fn build_request(&self, prompt: &ContentPrompt) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system_message.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user_message.clone(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Sends a request to the API with retry logic
    async fn send_request(&self, request: &ChatCompletionRequest) -> Result<GeneratedText, ContentError> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match self.send_single_request(request).await {
                Ok(response) => return Ok(response),
                Err(ContentError::RateLimitExceeded) => {
                    let backoff = Duration::from_millis(INITIAL_BACKOFF_MS * 2u64.pow(attempt));
                    warn!(
                        attempt = attempt + 1,
                        backoff_ms = backoff.as_millis(),
                        "Rate limited, retrying after backoff"
                    );
                    tokio::time::sleep(backoff).await;
                    last_error = Some(ContentError::RateLimitExceeded);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(ContentError::RateLimitExceeded))
    }

    /// Sends a single request to the API
    async fn send_single_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<GeneratedText, ContentError> {
        debug!(model = %self.model, "Sending request to Chat Completions API");

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to OpenAI API");
                ContentError::RequestFailed(e.to_string())
            })?;

        let status = response.status();

        if status.is_success() {
            let body: ChatCompletionResponse = response.json().await.map_err(|e| {
                error!(error = %e, "Failed to parse Chat Completions response");
                ContentError::InvalidResponse(e.to_string())
            })?;

            let text = body
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content.trim().to_string())
                .unwrap_or_default();

            if text.is_empty() {
                return Err(ContentError::EmptyResponse);
            }

            debug!(text_length = text.len(), "Received generated post text");
            Ok(GeneratedText { text })
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                401 => {
                    error!("OpenAI API authentication failed");
                    Err(ContentError::Unauthorized)
                }
                429 => {
                    warn!("OpenAI API rate limit exceeded");
                    Err(ContentError::RateLimitExceeded)
                }
                400 => {
                    error!(body = %error_body, "OpenAI API invalid request");
                    Err(ContentError::InvalidRequest(error_body))
                }
                _ => {
                    error!(status = %status, body = %error_body, "OpenAI API error");
                    Err(ContentError::RequestFailed(error_body))
                }
            }
        }
    }
}

#[async_trait]
impl ContentGeneratorPort for OpenAiAdapter {
    async fn generate_text(&self, prompt: ContentPrompt) -> Result<GeneratedText, ContentError> {
        let request = self.build_request(&prompt);
        self.send_request(&request).await
    }
}

// === Request/Response Types ===

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}
