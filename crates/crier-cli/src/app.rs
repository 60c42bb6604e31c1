//! Application initialization and lifecycle management
//!
//! Provides centralized initialization sequence and fatal error handling
//! for the Crier CLI application.

use anyhow::{Context, Result};
use crier_core::{
    init_logger, load_config, Config, DirectoryManager, LogLevel, LoggerConfig, LoggerGuard,
};
use std::panic;
use std::sync::Arc;
use tracing::error;

/// Application context holding initialized components
pub struct AppContext {
    /// Application configuration
    pub config: Arc<Config>,
    /// Logger guard (keeps logger alive)
    #[allow(dead_code)]
    logger_guard: Option<LoggerGuard>,
}

impl AppContext {
    /// Returns reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a directory manager for the configured data directory
    pub fn directories(&self) -> DirectoryManager {
        DirectoryManager::new(self.config.storage.data_dir.clone())
    }
}

/// Application initialization options
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Whether to initialize the logger
    pub init_logger: bool,
    /// Whether to create directory structure
    pub create_directories: bool,
    /// Log level override
    pub log_level: Option<LogLevel>,
}

impl InitOptions {
    /// Creates options for a publishing run (full initialization)
    pub fn publishing() -> Self {
        Self {
            init_logger: true,
            create_directories: true,
            log_level: Some(LogLevel::Info),
        }
    }

    /// Creates options for read-only commands (minimal initialization)
    pub fn command() -> Self {
        Self {
            init_logger: false,
            create_directories: true,
            log_level: None,
        }
    }
}

/// Initializes the Crier application
///
/// This function performs the following initialization sequence:
/// 1. Load configuration from `~/.crier/config.toml`
/// 2. Initialize directory structure (`~/.crier/`, `~/.crier/posts/`, etc.)
/// 3. Initialize logging (if requested)
/// 4. Set up panic hook for fatal error handling
///
/// # Arguments
/// * `options` - Initialization options
///
/// # Returns
/// * `Ok(AppContext)` - Initialized application context
/// * `Err` - Initialization failed
pub fn initialize(options: InitOptions) -> Result<AppContext> {
    // Step 1: Load configuration
    let config = load_config().context("Failed to load configuration")?;
    let config = Arc::new(config);

    // Step 2: Create directory structure
    if options.create_directories {
        let dir_manager = DirectoryManager::new(config.storage.data_dir.clone());
        dir_manager
            .initialize()
            .context("Failed to create directory structure")?;
    }

    // Step 3: Initialize logging
    let logger_guard = if options.init_logger {
        let log_level = options.log_level.unwrap_or(LogLevel::Info);
        let logger_config = LoggerConfig::new(config.storage.data_dir.join("logs"))
            .with_level(log_level)
            .with_max_file_size(10 * 1024 * 1024); // 10MB

        Some(init_logger(logger_config).context("Failed to initialize logger")?)
    } else {
        None
    };

    // Step 4: Set up panic hook for fatal errors
    setup_panic_hook(Arc::clone(&config));

    Ok(AppContext {
        config,
        logger_guard,
    })
}

/// Sets up a custom panic hook for fatal error handling
///
/// The panic hook logs the panic information and prints a user-friendly
/// error message pointing at the log file.
fn setup_panic_hook(config: Arc<Config>) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Log the panic
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };

        error!("FATAL ERROR at {}: {}", location, message);

        // Print user-friendly error message
        eprintln!();
        eprintln!("Crier encountered a fatal error and must exit.");
        eprintln!("Location: {}", location);
        eprintln!("Error: {}", message);
        eprintln!();
        eprintln!(
            "Please check the log file at: {}/logs/crier.log",
            config.storage.data_dir.display()
        );
        eprintln!();

        // Call the default hook for standard panic behavior
        default_hook(panic_info);
    }));
}
