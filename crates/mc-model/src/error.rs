//! Error types for model vocabulary and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building lookup tables or loading configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A detailed zone was listed under two aggregate regions.
    #[error("zone '{zone}' is assigned to both '{first}' and '{second}'")]
    DuplicateZone {
        zone: String,
        first: String,
        second: String,
    },

    /// A technology rule with an empty pattern would match every resource.
    #[error("technology rule {index} has an empty pattern")]
    EmptyPattern { index: usize },

    /// A configuration value is out of range.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
