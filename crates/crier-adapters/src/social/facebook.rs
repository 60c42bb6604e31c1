//! Facebook page publisher
//!
//! Posts to a Facebook page through the Graph API. Posts with an image go to
//! the page's /photos edge as a multipart upload; text-only posts go to /feed.
//! The page access token is exchanged from the configured user token on each
//! publish, matching how the Graph API scopes page publishing permissions.

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

/// Facebook page publisher
pub struct FacebookAdapter {
    client: Client,
    access_token: SecretApiKey,
    page_id: String,
}

impl FacebookAdapter {
    /// Creates a new Facebook adapter
    ///
    /// # Arguments
    /// * `access_token` - Graph API user access token with page permissions
    /// * `page_id` - Target Facebook page ID
    pub fn new(access_token: SecretApiKey, page_id: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            access_token,
            page_id: page_id.into(),
        }
    }

    /// Exchanges the user token for the page access token
    async fn fetch_page_token(&self) -> Result<String, PublishError> {
        debug!(page_id = %self.page_id, "Fetching page access token");

        let url = format!("{}/{}", GRAPH_API_BASE, self.page_id);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("fields", "access_token"),
                ("access_token", self.access_token.expose()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::RequestFailed(Platform::Facebook, e.to_string()))?;

        if !response.status().is_success() {
            return Err(graph_api_error(Platform::Facebook, response).await);
        }

        let body: PageTokenResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(Platform::Facebook, e.to_string()))?;

        Ok(body.access_token)
    }

    /// Publishes a photo post to the page's /photos edge
    async fn publish_photo(
        &self,
        page_token: &str,
        message: &str,
        image: &Path,
    ) -> Result<String, PublishError> {
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
                        PublishError::RequestFailed(Platform::Facebook, e.to_string())
                    })?,
            )
            .text("message", message.to_string())
            .text("access_token", page_token.to_string());

        let url = format!("{}/{}/photos", GRAPH_API_BASE, self.page_id);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PublishError::RequestFailed(Platform::Facebook, e.to_string()))?;

        if !response.status().is_success() {
            return Err(graph_api_error(Platform::Facebook, response).await);
        }

        let body: PhotoPostResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(Platform::Facebook, e.to_string()))?;

        Ok(body.post_id.unwrap_or(body.id))
    }

    /// Publishes a text-only post to the page's /feed edge
    async fn publish_text(
        &self,
        page_token: &str,
        message: &str,
    ) -> Result<String, PublishError> {
        let url = format!("{}/{}/feed", GRAPH_API_BASE, self.page_id);
        let response = self
            .client
            .post(&url)
            .form(&[("message", message), ("access_token", page_token)])
            .send()
            .await
            .map_err(|e| PublishError::RequestFailed(Platform::Facebook, e.to_string()))?;

        if !response.status().is_success() {
            return Err(graph_api_error(Platform::Facebook, response).await);
        }

        let body: FeedPostResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(Platform::Facebook, e.to_string()))?;

        Ok(body.id)
    }
}

#[async_trait]
impl PublisherPort for FacebookAdapter {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    async fn publish(&self, post: &OutboundPost) -> Result<PublishReceipt, PublishError> {
        let page_token = self.fetch_page_token().await?;

        let post_id = match &post.image {
            Some(image) => self.publish_photo(&page_token, &post.message, image).await?,
            None => self.publish_text(&page_token, &post.message).await?,
        };

        info!(%post_id, "Published to Facebook");
        Ok(PublishReceipt {
            platform: Platform::Facebook,
            post_id,
        })
    }
}

// === Response Types ===

#[derive(Debug, Deserialize)]
struct PageTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct PhotoPostResponse {
    id: String,
    /// ID of the feed post wrapping the photo, when the API returns one
    post_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedPostResponse {
    id: String,
}
