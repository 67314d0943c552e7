//! Error types for the replay harness.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or running a scenario.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Scenario file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario is not valid YAML for the expected shape.
    #[error("invalid scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Report could not be rendered as JSON.
    #[error("failed to render report: {0}")]
    Json(#[from] serde_json::Error),

    /// An inbound step carries bytes that are not hex.
    #[error("step {step}: invalid hex frame '{frame}': {source}")]
    Hex {
        /// Zero-based step index.
        step: usize,
        /// Frame text as written in the scenario.
        frame: String,
        #[source]
        source: hex::FromHexError,
    },
}

/// Result type alias for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;
