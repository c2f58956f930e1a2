//! Error types for the bridge runtime.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while starting or running the bridge.
///
/// Per-frame decode failures are deliberately absent: they are dropped
/// inside the dispatch loop and never propagate.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Socket bind or receive failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Options file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        /// Path of the options file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Options file was not valid JSON for the config shape.
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        /// Path of the options file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// An environment-variable override had an unusable value.
    #[error("Invalid value for {var}: {message}")]
    InvalidEnv {
        /// Variable name.
        var: String,
        /// What was wrong with it.
        message: String,
    },
}
