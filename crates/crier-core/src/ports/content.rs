//! Content generator port definition

use async_trait::async_trait;
use thiserror::Error;

/// Prompt for text generation
#[derive(Debug, Clone)]
pub struct ContentPrompt {
    /// System message framing the model's role
    pub system_message: String,
    /// User message describing the post to write
    pub user_message: String,
}

/// Response from a content generator
#[derive(Debug, Clone)]
pub struct GeneratedText {
    /// Generated post body
    pub text: String,
}

/// Errors that can occur during content generation
#[derive(Debug, Error)]
pub enum ContentError {
    /// API key is missing or invalid
    #[error("Unauthorized: API key is missing or invalid. Please set the OPENAI_API_KEY environment variable")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Please wait and try again.")]
    RateLimitExceeded,

    /// Invalid request (e.g., empty prompt)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider returned a response with no usable text
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// Request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Port for text generation
#[async_trait]
pub trait ContentGeneratorPort: Send + Sync {
    /// Generate post text for the given prompt
    async fn generate_text(&self, prompt: ContentPrompt) -> Result<GeneratedText, ContentError>;
}
