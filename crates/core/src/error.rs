//! Error types for qatrack
//!
//! This module defines the error taxonomy used by every layer below the
//! executor. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! ## Kinds
//!
//! | Kind | Variants | Caller can recover |
//! |------|----------|--------------------|
//! | InvalidIdentifier | `InvalidIdentifier` | yes |
//! | InvalidInput | `InvalidInput`, `NoChanges` | yes |
//! | NotFound | `NotFound` | yes |
//! | QuotaExceeded | `QuotaExceeded` | yes |
//! | Internal | `Storage`, `Serialization`, `Io`, `Internal` | no |

use std::io;
use thiserror::Error;

/// Result type alias for qatrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed external identifier
    InvalidIdentifier,
    /// Missing fields, mismatched references, failed record validation
    InvalidInput,
    /// Operation targeted a document that does not exist
    NotFound,
    /// Plan admission refused
    QuotaExceeded,
    /// Store connectivity or invariant failure
    Internal,
}

/// Error types for qatrack
#[derive(Debug, Error)]
pub enum Error {
    /// External identifier could not be decoded
    #[error("invalid identifier '{value}': {reason}")]
    InvalidIdentifier {
        /// The rejected input
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Input rejected before touching the store
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Human-readable message
        message: String,
    },

    /// Partial update carried no fields
    #[error("no changes provided for {collection}")]
    NoChanges {
        /// Collection the update targeted
        collection: String,
    },

    /// No document matched
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity display name (e.g. "Project")
        entity: String,
        /// External identifier that was looked up
        id: String,
    },

    /// Plan admission refused
    #[error("quota exceeded: {message}")]
    QuotaExceeded {
        /// Active plan tier
        plan: String,
        /// Limit in effect for the tier
        limit: u64,
        /// Human-readable message
        message: String,
    },

    /// Backing store failure
    #[error("storage error: {message}")]
    Storage {
        /// Error message
        message: String,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// I/O error (snapshot and config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bug or invariant violation
    #[error("internal error: {message}")]
    Internal {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a NotFound error for an entity
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Error::Storage {
            message: message.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Classify this error into one of the five kinds
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            Error::InvalidInput { .. } | Error::NoChanges { .. } => ErrorKind::InvalidInput,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Error::Storage { .. }
            | Error::Serialization { .. }
            | Error::Io(_)
            | Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if the caller can act on this error (everything except Internal)
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization {
            message: e.to_string(),
        }
    }
}
