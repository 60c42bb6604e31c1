//! Logging infrastructure for Crier
//!
//! Provides structured logging with file output and rotation support.
//! Uses `tracing` for instrumentation and `tracing-subscriber` for formatting.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "crier.log";

/// Default maximum log file size in bytes (10 MB)
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Errors that can occur during logger initialization
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Failed to create log directory
    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(String),

    /// Failed to initialize the logger
    #[error("Failed to initialize logger: {0}")]
    InitializationFailed(String),

    /// Logger already initialized
    #[error("Logger has already been initialized")]
    AlreadyInitialized,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Error level - critical failures
    Error,
    /// Warn level - warnings and recoverable issues
    Warn,
    /// Info level - general information (default)
    #[default]
    Info,
    /// Debug level - detailed debugging information
    Debug,
    /// Trace level - very detailed tracing
    Trace,
}

impl LogLevel {
    /// Converts to tracing's LevelFilter
    pub fn to_level_filter(self) -> tracing::level_filters::LevelFilter {
        match self {
            LogLevel::Error => tracing::level_filters::LevelFilter::ERROR,
            LogLevel::Warn => tracing::level_filters::LevelFilter::WARN,
            LogLevel::Info => tracing::level_filters::LevelFilter::INFO,
            LogLevel::Debug => tracing::level_filters::LevelFilter::DEBUG,
            LogLevel::Trace => tracing::level_filters::LevelFilter::TRACE,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Configuration for the Crier logger
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Log level filter
    pub level: LogLevel,
    /// Whether to also log to stdout
    pub log_to_stdout: bool,
    /// Maximum log file size in bytes before rotation
    pub max_file_size: u64,
}

impl LoggerConfig {
    /// Creates a new LoggerConfig with the specified log directory
    pub fn new(log_dir: PathBuf) -> Self {
        Self {
            log_dir,
            level: LogLevel::Info,
            log_to_stdout: false,
            max_file_size: DEFAULT_MAX_SIZE_BYTES,
        }
    }

    /// Creates a LoggerConfig with the default log directory (~/.crier/logs/)
    pub fn with_default_dir() -> Self {
        let log_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".crier")
            .join("logs");
        Self::new(log_dir)
    }

    /// Sets the log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Enables logging to stdout in addition to file
    pub fn with_stdout(mut self, enabled: bool) -> Self {
        self.log_to_stdout = enabled;
        self
    }

    /// Sets the maximum file size before rotation
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Returns the log directory path
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Returns the full path to the log file
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(DEFAULT_LOG_FILE)
    }
}

/// Guard that keeps the logger alive
///
/// When dropped, the logger will be flushed and closed.
pub struct LoggerGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

impl LoggerGuard {
    fn new(guard: tracing_appender::non_blocking::WorkerGuard) -> Self {
        Self { _guard: guard }
    }
}

/// Initializes the Crier logger with the given configuration
///
/// # Arguments
/// * `config` - Logger configuration
///
/// # Returns
/// A `LoggerGuard` that must be kept alive for the duration of the program.
/// When the guard is dropped, the logger will be flushed.
///
/// # Errors
/// Returns `LoggerError` if initialization fails
///
/// # Example
/// ```ignore
/// let config = LoggerConfig::with_default_dir();
/// let _guard = init_logger(config)?;
/// tracing::info!("Logger initialized");
/// ```
pub fn init_logger(config: LoggerConfig) -> Result<LoggerGuard, LoggerError> {
    use std::fs;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // Ensure log directory exists
    if !config.log_dir.exists() {
        fs::create_dir_all(&config.log_dir).map_err(|e| {
            LoggerError::DirectoryCreationFailed(format!("{}: {}", config.log_dir.display(), e))
        })?;
    }

    // Create rolling file appender with daily rotation
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, DEFAULT_LOG_FILE);

    // Create non-blocking writer
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Build the subscriber
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crier={}", config.level)));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if config.log_to_stdout {
        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stdout_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed(e.to_string()))?;
    }

    tracing::info!(
        log_dir = %config.log_dir.display(),
        level = %config.level,
        "Crier logger initialized"
    );

    Ok(LoggerGuard::new(guard))
}
