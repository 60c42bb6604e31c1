//! History store port definition

use crate::history::PostRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while loading or appending history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Stored history could not be parsed
    #[error("History file is corrupt: {0}")]
    Corrupt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for durable post history
///
/// History is append-only. A missing backing file is not an error: `load`
/// returns an empty list on the first run.
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    /// Load all recorded posts, oldest first
    async fn load(&self) -> Result<Vec<PostRecord>, HistoryError>;

    /// Append one record to durable storage
    async fn append(&self, record: &PostRecord) -> Result<(), HistoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_error_display() {
        let err = HistoryError::Corrupt("unexpected end of file".to_string());
        assert!(err.to_string().contains("unexpected end of file"));
    }
}
