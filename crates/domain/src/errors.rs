//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for FieldPulse
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum FieldPulseError {
    /// Unknown report, target or external system id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Lifecycle transition or edit not allowed from the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Preconditions unmet; every violated rule is listed
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FieldPulseError {
    /// Stable label suitable for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidState(_) => "invalid_state",
            Self::ValidationFailed(_) => "validation_failed",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Validation reasons, empty for every other variant.
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::ValidationFailed(reasons) => reasons,
            _ => &[],
        }
    }
}

/// Result type alias for FieldPulse operations
pub type Result<T> = std::result::Result<T, FieldPulseError>;
