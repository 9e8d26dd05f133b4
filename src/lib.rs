//! Datakit Shared Library
//!
//! This crate contains shared utilities used across datakit services: a
//! logging wrapper, string masking and validation helpers, a generic typed
//! data container with pluggable validation, and rudimentary file-backed
//! persistence with post-read/post-write processor hooks.
//!
//! # Features
//!
//! - **Data Containers**: A single-value container whose shape (string,
//!   list, tuple, integer, float, decimal, mapping) is fixed at construction
//! - **Validators**: Pluggable string and numeric-range validators gating
//!   every store
//! - **Masking**: Helpers for masking sensitive strings before display
//! - **Persistence**: Whole-file text I/O with an optional age-based cache
//! - **Configuration**: TOML-backed settings for logging and caching
//!
//! # Usage
//!
//! ```rust
//! use datakit_shared::container::{DataKind, GenericDataContainer};
//! use datakit_shared::validation::{StringRules, StringValidator};
//! use datakit_shared::value::Value;
//!
//! // Create a string container gated by a length rule
//! let rules = StringRules::default().min_length(4);
//! let mut container = GenericDataContainer::new("greeting", DataKind::String)
//!     .with_validator(Box::new(StringValidator::new(rules)));
//!
//! assert!(container.store(Value::from("hi"), None).is_err());
//! assert_eq!(container.store(Value::from("hello"), None).unwrap(), 5);
//! ```

pub mod config;
pub mod container;
pub mod logging;
pub mod masking;
pub mod persistence;
pub mod validation;
pub mod value;

// Re-export commonly used types for convenience
pub use container::{DataKind, GenericDataContainer};
pub use masking::{mask_sensitive_string, MaskOptions};
pub use validation::{
    is_valid_email, validate_string, DataValidator, NumberValidator, NumericRange, StringRules,
    StringValidator, ValidatorKind,
};
pub use value::Value;

// Re-export config functionality
pub use config::{default_config_path, CacheSettings, LoggingSettings, SharedConfig};

// Re-export persistence functionality
pub use persistence::{FileExistsProcessor, IoProcessor, ReadOptions, TextFileIO};

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types used throughout the library
pub mod error {
    use thiserror::Error;

    /// Common error type for shared library operations
    #[derive(Error, Debug)]
    pub enum SharedError {
        #[error("Construction error: {message}")]
        Construction { message: String },

        #[error("Validation error: {message}")]
        Validation { message: String },

        #[error("Conversion error: {message}")]
        Conversion { message: String },

        #[error("State error: {message}")]
        State { message: String },

        #[error("Serialization error: {message}")]
        Serialization { message: String },

        #[error("Configuration error: {message}")]
        Config { message: String },

        #[error("Internal error: {message}")]
        Internal { message: String },

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }

    impl From<anyhow::Error> for SharedError {
        fn from(error: anyhow::Error) -> Self {
            SharedError::Internal {
                message: error.to_string(),
            }
        }
    }

    /// Result type alias for shared library operations
    pub type SharedResult<T> = Result<T, SharedError>;
}

pub use error::{SharedError, SharedResult};

/// Library configuration and constants
pub mod constants {
    /// Default minimum length accepted by string validation
    pub const DEFAULT_MIN_STRING_LENGTH: usize = 1;

    /// Default maximum length accepted by string validation
    pub const DEFAULT_MAX_STRING_LENGTH: usize = 255;

    /// Default number of mask characters emitted for fixed-length masking
    pub const DEFAULT_MASK_LENGTH: usize = 8;

    /// Default mask character
    pub const DEFAULT_MASK_CHAR: char = '*';

    /// Default maximum age (seconds) of a cached file read
    pub const DEFAULT_CACHE_MAX_AGE_SECS: i64 = 900;

    /// Shape names accepted by `DataKind::from_name`
    pub const SUPPORTED_DATA_KINDS: &[&str] = &[
        "str", "list", "tuple", "int", "float", "decimal", "dict",
    ];
}
