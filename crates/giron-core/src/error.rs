//! Error types for the Giron application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Giron application.
///
/// Remote-call failures all collapse into the single [`GironError::Api`]
/// variant carrying a human-readable message; locally detected problems
/// get their own variants so callers can distinguish them from network
/// trouble.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GironError {
    /// Remote discussion-service call failed. The message is either
    /// `APIエラー: {status} - {body}` or a fixed per-operation fallback
    /// when no response was obtained.
    #[error("{0}")]
    Api(String),

    /// The strategy document was empty after trimming; detected before
    /// any network call is made.
    #[error("戦略文書が空です")]
    EmptyDocument,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid persona data (local validation)
    #[error("Invalid persona: {0}")]
    InvalidPersona(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GironError {
    /// Creates an Api error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a remote-call failure
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

impl From<std::io::Error> for GironError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GironError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GironError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for GironError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, GironError>`.
pub type Result<T> = std::result::Result<T, GironError>;
