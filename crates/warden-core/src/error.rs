//! Centralized error types for Warden.

use thiserror::Error;

use crate::model::Party;

/// Main error type for Warden operations.
#[derive(Error, Debug)]
pub enum WardenError {
    /// The candidate war list could not be fetched; the whole cycle is void.
    #[error("Failed to fetch candidate wars: {0}")]
    CandidateFetch(#[source] Box<WardenError>),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to resolve name of {party}: {source}")]
    Resolution {
        party: Party,
        #[source]
        source: Box<WardenError>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] warden_redis::RedisError),

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for Warden operations.
pub type WardenResult<T> = Result<T, WardenError>;

impl WardenError {
    /// Create an upstream error.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a malformed record error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
