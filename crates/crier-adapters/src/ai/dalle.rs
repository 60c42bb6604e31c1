//! DALL-E image adapter implementation
//!
//! Implements the ImageGeneratorPort trait for OpenAI's Images API. Generated
//! images are downloaded and stored in the local images directory so
//! publishers can attach them without depending on expiring remote URLs.

use async_trait::async_trait;
use chrono::Local;
use crier_core::api_key::SecretApiKey;
use crier_core::ports::image::{GeneratedImage, ImageError, ImageGeneratorPort, ImageRequest};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default image generation model
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Images API endpoint
const IMAGE_GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";

/// Maximum retry attempts for rate limiting
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Request timeout in seconds; image generation is slow
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// DALL-E image adapter
pub struct DalleAdapter {
    client: Client,
    api_key: SecretApiKey,
    model: String,
    images_dir: PathBuf,
}

impl DalleAdapter {
    /// Creates a new DALL-E adapter
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g., "dall-e-3")
    /// * `images_dir` - Directory where downloaded images are stored
    pub fn new(api_key: SecretApiKey, model: impl Into<String>, images_dir: PathBuf) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model: model.into(),
            images_dir,
        }
    }

    /// Returns the model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: &ImageRequest) -> ImageGenerationRequest {
        ImageGenerationRequest {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            n: 1,
            size: request.size.clone(),
            quality: request.quality.clone(),
            style: request.style.clone(),
        }
    }

    /// Requests image generation with retry logic, returning the remote URL
    async fn request_image_url(&self, request: &ImageGenerationRequest) -> Result<String, ImageError> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match self.send_single_request(request).await {
                Ok(url) => return Ok(url),
                Err(ImageError::RateLimitExceeded) => {
                    let backoff = Duration::from_millis(INITIAL_BACKOFF_MS * 2u64.pow(attempt));
                    warn!(
                        attempt = attempt + 1,
                        backoff_ms = backoff.as_millis(),
                        "Rate limited, retrying after backoff"
                    );
                    tokio::time::sleep(backoff).await;
                    last_error = Some(ImageError::RateLimitExceeded);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(ImageError::RateLimitExceeded))
    }

    async fn send_single_request(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<String, ImageError> {
        debug!(model = %self.model, "Sending request to Images API");

        let response = self
            .client
            .post(IMAGE_GENERATIONS_URL)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to Images API");
                ImageError::RequestFailed(e.to_string())
            })?;

        let status = response.status();

        if status.is_success() {
            let body: ImageGenerationResponse = response.json().await.map_err(|e| {
                error!(error = %e, "Failed to parse Images API response");
                ImageError::InvalidResponse(e.to_string())
            })?;

            body.data
                .into_iter()
                .next()
                .map(|item| item.url)
                .ok_or_else(|| ImageError::InvalidResponse("No image in response".to_string()))
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                401 => {
                    error!("Images API authentication failed");
                    Err(ImageError::Unauthorized)
                }
                429 => {
                    warn!("Images API rate limit exceeded");
                    Err(ImageError::RateLimitExceeded)
                }
                400 => {
                    error!(body = %error_body, "Images API invalid request");
                    Err(ImageError::InvalidRequest(error_body))
                }
                _ => {
                    error!(status = %status, body = %error_body, "Images API error");
                    Err(ImageError::RequestFailed(error_body))
                }
            }
        }
    }

    /// Downloads the generated image to the images directory
    async fn download_image(&self, url: &str, label: &str) -> Result<PathBuf, ImageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImageError::RequestFailed(format!(
                "Image download returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError::RequestFailed(e.to_string()))?;

        tokio::fs::create_dir_all(&self.images_dir).await?;

        let filename = format!("{}_{}.png", label, Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.images_dir.join(filename);
        tokio::fs::write(&path, &bytes).await?;

        info!(path = %path.display(), bytes = bytes.len(), "Stored generated image");
        Ok(path)
    }
}

#[async_trait]
impl ImageGeneratorPort for DalleAdapter {
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, ImageError> {
        let api_request = self.build_request(&request);
        let url = self.request_image_url(&api_request).await?;
        let path = self.download_image(&url, &request.label).await?;
        Ok(GeneratedImage { path })
    }
}

// === Request/Response Types ===

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    n: u32,
    size: String,
    quality: String,
    style: String,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_adapter() -> DalleAdapter {
        let key = SecretApiKey::new("sk-test-key".to_string()).unwrap();
        DalleAdapter::new(key, DEFAULT_IMAGE_MODEL, PathBuf::from("/tmp/crier-images"))
    }

    fn test_request() -> ImageRequest {
        ImageRequest {
            prompt: "Professional photograph of a modern laptop".to_string(),
            size: "1024x1024".to_string(),
            quality: "hd".to_string(),
            style: "vivid".to_string(),
            label: "web_design_tip".to_string(),
        }
    }

    #[test]
    fn test_adapter_creation() {
        let adapter = test_adapter();
        assert_eq!(adapter.model(), "dall-e-3");
    }

    #[test]
    fn test_build_request_structure() {
        let adapter = test_adapter();
        let request = adapter.build_request(&test_request());

        assert_eq!(request.model, "dall-e-3");
        assert_eq!(request.n, 1);
        assert_eq!(request.size, "1024x1024");
        assert_eq!(request.quality, "hd");
        assert_eq!(request.style, "vivid");
    }

    #[test]
    fn test_request_serialization() {
        let adapter = test_adapter();
        let request = adapter.build_request(&test_request());

        let json = serde_json::to_string(&request).expect("Failed to serialize");
        assert!(json.contains("dall-e-3"));
        assert!(json.contains("\"n\":1"));
        assert!(json.contains("vivid"));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "created": 1700000000,
            "data": [
                {"url": "https://example.com/generated.png", "revised_prompt": "A laptop"}
            ]
        }"#;

        let response: ImageGenerationResponse =
            serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].url, "https://example.com/generated.png");
    }

    #[test]
    fn test_empty_response_has_no_url() {
        let json = r#"{"created": 1700000000, "data": []}"#;
        let response: ImageGenerationResponse =
            serde_json::from_str(json).expect("Failed to deserialize");
        assert!(response.data.is_empty());
    }
}
