//! Error types for golfcal.

use thiserror::Error;

/// Errors that can occur while building the golf feed.
#[derive(Error, Debug)]
pub enum GolfCalError {
    /// A record is structurally invalid (bad date ordering, missing identifier).
    #[error("Invalid event '{id}': {reason}")]
    Validation { id: String, reason: String },

    /// Two records share an identifier after merging all sources.
    #[error("Duplicate event id: {0}")]
    DuplicateId(String),

    /// A record lacks a field required to produce a calendar entry.
    #[error("Cannot encode event '{id}': {reason}")]
    Encoding { id: String, reason: String },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GolfCalError {
    pub(crate) fn validation(id: &str, reason: impl Into<String>) -> Self {
        GolfCalError::Validation {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn encoding(id: &str, reason: impl Into<String>) -> Self {
        GolfCalError::Encoding {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for golfcal operations.
pub type GolfCalResult<T> = Result<T, GolfCalError>;
