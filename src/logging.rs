//! Logging infrastructure for the shared library
//!
//! This module provides configurable logging support built on `tracing`,
//! with a runtime debug toggle and helpers for sanitizing log messages so
//! sensitive values never reach the log output.

use std::sync::{Arc, Mutex, OnceLock};
use tracing::Level;

/// Global logging configuration
static LOGGING_CONFIG: OnceLock<Arc<Mutex<LoggingConfig>>> = OnceLock::new();

/// Logging configuration structure
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Whether debug logging is enabled
    pub debug_enabled: bool,
    /// Log level filter
    pub level: Level,
    /// Whether to include timestamps
    pub include_timestamps: bool,
    /// Whether to include thread information
    pub include_thread_info: bool,
    /// Custom log target prefix
    pub target_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug_enabled: false,
            level: Level::INFO,
            include_timestamps: true,
            include_thread_info: false,
            target_prefix: Some("datakit".to_string()),
        }
    }
}

/// Initialize the logging system
///
/// The `DEBUG` environment variable enables debug logging when set to any
/// value. Subsequent calls fail once the configuration has been stored.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = LoggingConfig::default();
    if std::env::var("DEBUG").is_ok() {
        config.debug_enabled = true;
        config.level = Level::DEBUG;
    }

    // Store the configuration globally
    LOGGING_CONFIG
        .set(Arc::new(Mutex::new(config.clone())))
        .map_err(|_| "Logging already initialized")?;

    setup_subscriber(&config)?;
    Ok(())
}

/// Update logging configuration
pub fn configure_logging(
    config: LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(global_config) = LOGGING_CONFIG.get() {
        if let Ok(mut stored_config) = global_config.lock() {
            *stored_config = config.clone();
        }
    }

    setup_subscriber(&config)?;

    if config.debug_enabled {
        tracing::info!("logging configuration updated: debug_enabled=true");
    }
    Ok(())
}

/// Enable or disable debug logging
pub fn set_debug_enabled(enabled: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(global_config) = LOGGING_CONFIG.get() {
        let config = if let Ok(mut stored_config) = global_config.lock() {
            stored_config.debug_enabled = enabled;
            stored_config.level = if enabled { Level::DEBUG } else { Level::INFO };
            stored_config.clone()
        } else {
            return Err("Failed to acquire logging config lock".into());
        };

        setup_subscriber(&config)?;

        if enabled {
            tracing::debug!("debug logging enabled");
        }
    }

    Ok(())
}

/// Check if debug logging is enabled
pub fn is_debug_enabled() -> bool {
    LOGGING_CONFIG
        .get()
        .and_then(|config| config.lock().ok())
        .map(|config| config.debug_enabled)
        .unwrap_or(false)
}

/// Get current logging configuration
pub fn get_config() -> LoggingConfig {
    LOGGING_CONFIG
        .get()
        .and_then(|config| config.lock().ok())
        .map(|config| config.clone())
        .unwrap_or_default()
}

/// Set up the tracing subscriber based on configuration
fn setup_subscriber(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // try_init keeps re-configuration non-fatal once a subscriber exists
    let _ = tracing_subscriber::fmt()
        .with_max_level(if config.debug_enabled {
            Level::DEBUG
        } else {
            config.level
        })
        .with_target(true)
        .with_thread_ids(config.include_thread_info)
        .with_thread_names(config.include_thread_info)
        .try_init();

    Ok(())
}

/// Helper function to sanitize log messages by removing sensitive data
pub fn sanitize_log_message(message: &str) -> String {
    let sensitive_patterns = [
        (r"password[=:\s]+[^\s]+", "password=***"),
        (r"token[=:\s]+[^\s]+", "token=***"),
        (r"key[=:\s]+[^\s]+", "key=***"),
        (r"secret[=:\s]+[^\s]+", "secret=***"),
    ];

    let mut sanitized = message.to_string();

    for (pattern, replacement) in &sensitive_patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            sanitized = re.replace_all(&sanitized, *replacement).to_string();
        }
    }

    sanitized
}

/// Logging macros for consistent usage throughout the library
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        tracing::info!($($arg)*);
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*);
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!($($arg)*);
    };
}
