//! Social platform publisher implementations
//!
//! Facebook and Instagram adapters implementing the PublisherPort trait.
//! Both speak the Facebook Graph API; Instagram publishing piggybacks on the
//! Facebook page for image hosting.

mod facebook;
mod instagram;

pub use facebook::FacebookAdapter;
pub use instagram::InstagramAdapter;

use crier_core::ports::publish::{Platform, PublishError};
use serde::Deserialize;

/// Graph API base URL, including the pinned version
pub(crate) const GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

/// Error envelope the Graph API wraps failures in
#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: String,
}

/// Converts a non-success Graph API response into a PublishError
///
/// The Graph API reports failures as a JSON error envelope; fall back to the
/// raw body when the envelope does not parse.
pub(crate) async fn graph_api_error(
    platform: Platform,
    response: reqwest::Response,
) -> PublishError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = serde_json::from_str::<GraphErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    PublishError::ApiError {
        platform,
        status,
        message,
    }
}
