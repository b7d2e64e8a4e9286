//! Error types for specification loading.

use std::path::PathBuf;
use thiserror::Error;

use examgen_model::{ConfigurationError, ParseError};

/// Errors raised while reading and decoding specification files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Specification file not found.
    #[error("specification file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// Extension with no decoder.
    #[error("unsupported specification format '{extension}' for {path} (expected .json, .toml, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to decode JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to decode YAML {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // === Specification Errors ===
    /// Markup in a text field could not be parsed.
    #[error("{path}: {source}")]
    Markup {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
