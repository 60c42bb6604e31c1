//! Instagram publisher
//!
//! Posts to an Instagram business account through the Graph API content
//! publishing flow. Instagram media containers need a public image URL, so
//! the image is first uploaded to the linked Facebook page as an unpublished
//! photo and its hosted URL is fed into the container.

use async_trait::async_trait;
use crier_core::api_key::SecretApiKey;
use crier_core::ports::publish::{
    OutboundPost, Platform, PublishError, PublishReceipt, PublisherPort,
};
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use super::{graph_api_error, GRAPH_API_BASE};

/// Request timeout in seconds; photo uploads can be slow
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Instagram business account publisher
pub struct InstagramAdapter {
    client: Client,
    access_token: SecretApiKey,
    page_id: String,
    account_id: String,
}

impl InstagramAdapter {
    /// Creates a new Instagram adapter
    ///
    /// # Arguments
    /// * `access_token` - Graph API access token shared with Facebook
    /// * `page_id` - Facebook page used to host the image
    /// * `account_id` - Instagram business account ID
    pub fn new(
        access_token: SecretApiKey,
        page_id: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            access_token,
            page_id: page_id.into(),
            account_id: account_id.into(),
        }
    }

    /// Uploads the image to the Facebook page without publishing it
    async fn upload_unpublished_photo(&self, image: &Path) -> Result<String, PublishError> {
        let bytes = tokio::fs::read(image).await?;
        let filename = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "post.png".to_string());

        let form = multipart::Form::new()
            .part(
                "source",
                multipart::Part::bytes(bytes)
                    .file_name(filename)
                    .mime_str("image/png")
                    .map_err(|e| {
                        PublishError::RequestFailed(Platform::Instagram, e.to_string())
                    })?,
            )
            .text("published", "false")
            .text("access_token", self.access_token.expose().to_string());

        let url = format!("{}/{}/photos", GRAPH_API_BASE, self.page_id);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PublishError::RequestFailed(Platform::Instagram, e.to_string()))?;

        if !response.status().is_success() {
            return Err(graph_api_error(Platform::Instagram, response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(Platform::Instagram, e.to_string()))?;

        Ok(body.id)
    }

    /// Resolves the hosted URL of an uploaded photo
    async fn fetch_image_url(&self, photo_id: &str) -> Result<String, PublishError> {
        let url = format!("{}/{}", GRAPH_API_BASE, photo_id);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("fields", "images"),
                ("access_token", self.access_token.expose()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::RequestFailed(Platform::Instagram, e.to_string()))?;

        if !response.status().is_success() {
            return Err(graph_api_error(Platform::Instagram, response).await);
        }

        let body: PhotoImagesResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(Platform::Instagram, e.to_string()))?;

        // The first entry is the largest rendition
        body.images
            .into_iter()
            .next()
            .map(|image| image.source)
            .ok_or_else(|| {
                PublishError::InvalidResponse(
                    Platform::Instagram,
                    "Uploaded photo has no hosted renditions".to_string(),
                )
            })
    }

    /// Creates an Instagram media container for the hosted image
    async fn create_media_container(
        &self,
        image_url: &str,
        caption: &str,
    ) -> Result<String, PublishError> {
        debug!(account_id = %self.account_id, "Creating Instagram media container");

        let url = format!("{}/{}/media", GRAPH_API_BASE, self.account_id);
        let response = self
            .client
            .post(&url)
            .form(&[
                ("image_url", image_url),
                ("caption", caption),
                ("access_token", self.access_token.expose()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::RequestFailed(Platform::Instagram, e.to_string()))?;

        if !response.status().is_success() {
            return Err(graph_api_error(Platform::Instagram, response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(Platform::Instagram, e.to_string()))?;

        Ok(body.id)
    }

    /// Publishes a previously created media container
    async fn publish_container(&self, creation_id: &str) -> Result<String, PublishError> {
        let url = format!("{}/{}/media_publish", GRAPH_API_BASE, self.account_id);
        let response = self
            .client
            .post(&url)
            .form(&[
                ("creation_id", creation_id),
                ("access_token", self.access_token.expose()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::RequestFailed(Platform::Instagram, e.to_string()))?;

        if !response.status().is_success() {
            return Err(graph_api_error(Platform::Instagram, response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(Platform::Instagram, e.to_string()))?;

        Ok(body.id)
    }
}

#[async_trait]
impl PublisherPort for InstagramAdapter {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn publish(&self, post: &OutboundPost) -> Result<PublishReceipt, PublishError> {
        // Instagram has no text-only posts
        let image = post
            .image
            .as_deref()
            .ok_or(PublishError::ImageRequired(Platform::Instagram))?;

        let photo_id = self.upload_unpublished_photo(image).await?;
        let image_url = self.fetch_image_url(&photo_id).await?;
        let creation_id = self.create_media_container(&image_url, &post.message).await?;
        let post_id = self.publish_container(&creation_id).await?;

        info!(%post_id, "Published to Instagram");
        Ok(PublishReceipt {
            platform: Platform::Instagram,
            post_id,
        })
    }
}

// === Response Types ===

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PhotoImagesResponse {
    images: Vec<PhotoRendition>,
}

#[derive(Debug, Deserialize)]
struct PhotoRendition {
    source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_adapter() -> InstagramAdapter {
        let token = SecretApiKey::new("fb-test-token".to_string()).unwrap();
        InstagramAdapter::new(token, "123456789", "987654321")
    }

    #[test]
    fn test_adapter_platform() {
        assert_eq!(test_adapter().platform(), Platform::Instagram);
    }

    #[tokio::test]
    async fn test_publish_without_image_is_rejected() {
        let adapter = test_adapter();
        let post = OutboundPost {
            message: "Text only".to_string(),
            image: None,
        };

        let result = adapter.publish(&post).await;
        assert!(matches!(
            result,
            Err(PublishError::ImageRequired(Platform::Instagram))
        ));
    }

    #[tokio::test]
    async fn test_publish_with_missing_image_file() {
        let adapter = test_adapter();
        let post = OutboundPost {
            message: "With image".to_string(),
            image: Some("/nonexistent/image.png".into()),
        };

        let result = adapter.publish(&post).await;
        assert!(matches!(result, Err(PublishError::ImageFile(_))));
    }

    #[test]
    fn test_upload_response_deserialization() {
        let json = r#"{"id": "17890000000000000"}"#;
        let response: UploadResponse = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(response.id, "17890000000000000");
    }

    #[test]
    fn test_photo_images_response_deserialization() {
        let json = r#"{
            "images": [
                {"height": 1024, "width": 1024, "source": "https://scontent.example/full.png"},
                {"height": 512, "width": 512, "source": "https://scontent.example/half.png"}
            ],
            "id": "photo_1"
        }"#;
        let response: PhotoImagesResponse =
            serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(response.images.len(), 2);
        assert_eq!(response.images[0].source, "https://scontent.example/full.png");
    }
}
