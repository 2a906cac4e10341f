//! Error types for pathrev

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathrevError {
    /// An input path is missing, or the output path collides with a file.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to parse {}: {reason}", path.display())]
    InputParse { path: PathBuf, reason: String },

    /// The enrichment engine could not run or reported an error.
    #[error("Enrichment engine failed: {0}")]
    EngineFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PathrevError>;
