//! JSON file history store
//!
//! Implements the HistoryStorePort trait over a single JSON file holding the
//! append-only post history. A missing file reads as an empty history; a
//! file that exists but does not parse is reported as corrupt rather than
//! silently overwritten.

use async_trait::async_trait;
use crier_core::history::PostRecord;
use crier_core::ports::history::{HistoryError, HistoryStorePort};
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON file history store adapter
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    /// Creates a store backed by the given history file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the history file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<PostRecord>, HistoryError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(HistoryError::Io(e)),
        };

        serde_json::from_str(&contents).map_err(|e| HistoryError::Corrupt(e.to_string()))
    }

    async fn write_records(&self, records: &[PostRecord]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| HistoryError::Corrupt(e.to_string()))?;

        // Write-then-rename so a crash mid-write cannot truncate the history
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStorePort for JsonHistoryStore {
    async fn load(&self) -> Result<Vec<PostRecord>, HistoryError> {
        self.read_records().await
    }

    async fn append(&self, record: &PostRecord) -> Result<(), HistoryError> {
        let mut records = self.read_records().await?;
        records.push(record.clone());
        self.write_records(&records).await?;

        debug!(
            path = %self.path.display(),
            total = records.len(),
            "Appended post record"
        );
        Ok(())
    }
}
