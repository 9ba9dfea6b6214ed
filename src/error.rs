//! Error types for loading design documents and settings

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a design document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read design document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse design document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while loading import settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
