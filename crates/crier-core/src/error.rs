//! Common error types for Crier
//!
//! This module provides centralized error handling for the Crier application.
//! All domain-specific errors are defined in their respective port modules and
//! re-exported here for convenience.

use thiserror::Error;

// Re-export domain-specific errors from ports
pub use crate::logging::LoggerError;
pub use crate::ports::content::ContentError;
pub use crate::ports::history::HistoryError;
pub use crate::ports::image::ImageError;
pub use crate::ports::publish::PublishError;

/// Top-level error type for Crier operations
///
/// This enum wraps all domain-specific errors and provides automatic conversion
/// via the `From` trait, enabling seamless error propagation with `?`.
#[derive(Debug, Error)]
pub enum CrierError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Content generation errors
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Image generation errors
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Publishing errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// History store errors
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Logger errors
    #[error("Logger error: {0}")]
    Logger(#[from] LoggerError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Parse error
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid value
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
