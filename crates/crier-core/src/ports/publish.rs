//! Publisher port definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Social platform a publisher targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Facebook,
    Instagram,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Facebook => write!(f, "facebook"),
            Platform::Instagram => write!(f, "instagram"),
        }
    }
}

/// A fully composed post ready to publish
#[derive(Debug, Clone)]
pub struct OutboundPost {
    /// Complete message: body text followed by hashtags
    pub message: String,
    /// Locally stored image to attach, when one was generated
    pub image: Option<PathBuf>,
}

/// Confirmation of a successful publish
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    /// Platform the post landed on
    pub platform: Platform,
    /// Platform-assigned post identifier
    pub post_id: String,
}

/// Errors that can occur during publishing
#[derive(Debug, Error)]
pub enum PublishError {
    /// Required credentials are not configured
    #[error("Missing credentials for {0}: {1}")]
    MissingCredentials(Platform, String),

    /// The platform requires an image and none was provided
    #[error("{0} requires an image for posts and none was provided")]
    ImageRequired(Platform),

    /// The attached image file could not be read
    #[error("Image file error: {0}")]
    ImageFile(#[from] std::io::Error),

    /// Request failed before reaching the platform
    #[error("Request to {0} failed: {1}")]
    RequestFailed(Platform, String),

    /// The platform rejected the request
    #[error("{platform} API error (HTTP {status}): {message}")]
    ApiError {
        platform: Platform,
        status: u16,
        message: String,
    },

    /// The platform response could not be interpreted
    #[error("Invalid response from {0}: {1}")]
    InvalidResponse(Platform, String),
}

/// Port for publishing a composed post to one platform
#[async_trait]
pub trait PublisherPort: Send + Sync {
    /// The platform this publisher posts to
    fn platform(&self) -> Platform;

    /// Publish the post, returning the platform's post identifier
    async fn publish(&self, post: &OutboundPost) -> Result<PublishReceipt, PublishError>;
}
