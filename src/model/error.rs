//! Error types for masonry-grid.
//!
//! Layout computation is total and never fails; the taxonomy here covers the
//! edges of the system only.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error of the `mgrid` driver
//!   - [`InputError`] - Item file reading/decoding failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Subscriber setup failures
//! - [`FetchError`] - Failure reported by a caller-supplied fetcher
//!
//! # Recovery Strategy
//!
//! Fetch failures are **non-fatal**: the loader releases its lock, logs a
//! warning and waits for the next scroll/resize before trying again. Input and
//! config errors are fatal to the driver and propagate to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error of the command-line driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read or decode the item list.
    #[error("Failed to read items: {0}")]
    Input(#[from] InputError),

    /// Failed to load configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Failed to install the tracing subscriber.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] crate::logging::LoggingError),
}

/// Errors encountered when reading an item list from disk.
#[derive(Debug, Error)]
pub enum InputError {
    /// The item file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use masonry_grid::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// The file exists but is not a JSON array of items.
    #[error("Malformed item list in {path}: {reason}")]
    Malformed {
        /// The offending file.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a caller-supplied fetch function.
///
/// The loader never inspects the cause; it only logs it and hands it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Fetch failed: {message}")]
pub struct FetchError {
    /// Human-readable cause.
    pub message: String,
}

impl FetchError {
    /// Create a fetch error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
