//! Error types for the Folio client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Folio client.
///
/// Every remote operation collapses its failure causes (timeout, network,
/// non-2xx, malformed JSON) into exactly one of the operation kinds below,
/// carrying a message that can be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FolioError {
    /// The transport deadline expired before a response arrived
    #[error("{0}")]
    Timeout(String),

    /// DNS, connection or body read failure below the HTTP layer
    #[error("{0}")]
    Network(String),

    /// Login failed or an admin operation was attempted without a token
    #[error("{0}")]
    Auth(String),

    /// Fetching the portfolio document failed
    #[error("{0}")]
    Fetch(String),

    /// Pushing the portfolio document failed
    #[error("{0}")]
    Update(String),

    /// Uploading an asset failed
    #[error("{0}")]
    Upload(String),

    /// Submitting the contact form failed
    #[error("{0}")]
    Contact(String),

    /// Caller supplied an unparsable field path, target or value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Local session/config storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Fieldless discriminant of [`FolioError`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    Network,
    Auth,
    Fetch,
    Update,
    Upload,
    Contact,
    InvalidInput,
    Storage,
    Config,
    Serialization,
    Io,
    Internal,
}

impl FolioError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    pub fn update(message: impl Into<String>) -> Self {
        Self::Update(message.into())
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload(message.into())
    }

    pub fn contact(message: impl Into<String>) -> Self {
        Self::Contact(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Inspection
    // ============================================================================

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Network(_) => ErrorKind::Network,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Fetch(_) => ErrorKind::Fetch,
            Self::Update(_) => ErrorKind::Update,
            Self::Upload(_) => ErrorKind::Upload,
            Self::Contact(_) => ErrorKind::Contact,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Io { .. } => ErrorKind::Io,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns the human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Timeout(m)
            | Self::Network(m)
            | Self::Auth(m)
            | Self::Fetch(m)
            | Self::Update(m)
            | Self::Upload(m)
            | Self::Contact(m)
            | Self::InvalidInput(m)
            | Self::Storage(m)
            | Self::Config(m)
            | Self::Internal(m) => m,
            Self::Serialization { message, .. } | Self::Io { message } => message,
        }
    }

    /// Check if this is a transport-level error (timeout or network).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Network(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for FolioError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, FolioError>`.
pub type Result<T> = std::result::Result<T, FolioError>;
