//! Image generator port definition

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Request for a single generated image
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// Full scene description, including quality settings
    pub prompt: String,
    /// Image dimensions (e.g., "1024x1024")
    pub size: String,
    /// Rendering quality (e.g., "standard", "hd")
    pub quality: String,
    /// Rendering style (e.g., "natural", "vivid")
    pub style: String,
    /// Filename stem for the stored image, typically the category name
    pub label: String,
}

/// A generated image stored on the local filesystem
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Path to the downloaded image file
    pub path: PathBuf,
}

/// Errors that can occur during image generation
#[derive(Debug, Error)]
pub enum ImageError {
    /// API key is missing or invalid
    #[error("Unauthorized: API key is missing or invalid. Please set the OPENAI_API_KEY environment variable")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Please wait and try again.")]
    RateLimitExceeded,

    /// Invalid request (e.g., empty prompt, unsupported size)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Downloading or storing the image failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for image generation
///
/// Implementations generate the image remotely, download it, and store it
/// locally, returning the stored path.
#[async_trait]
pub trait ImageGeneratorPort: Send + Sync {
    /// Generate an image and store it locally
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, ImageError>;
}
