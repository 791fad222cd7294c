//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Classified**: Each variant maps to one client-facing status class

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Status |
/// |----------|----------|--------|
/// | Bad request | `InvalidId`, `InvalidInput`, `NoChanges` | 400 |
/// | Upgrade required | `QuotaExceeded` | 402 |
/// | Not found | `NotFound` | 404 |
/// | System | `Io`, `Serialization`, `Internal` | 500 |
///
/// The `Display` text is the client-facing detail message.
///
/// # Example
///
/// ```ignore
/// use qatrack_executor::{Command, Error, Executor};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(e @ Error::QuotaExceeded { .. }) => {
///         println!("{} ({})", e, e.status_code());
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Bad Request ====================
    /// External identifier is not well formed
    #[error("Invalid {entity} id")]
    InvalidId {
        /// Lower-case entity name ("project")
        entity: String,
        /// Rejected input
        value: String,
    },

    /// Input rejected
    #[error("{reason}")]
    InvalidInput {
        /// Detail message
        reason: String,
    },

    /// Partial update without any field
    #[error("No changes provided")]
    NoChanges,

    // ==================== Upgrade Required ====================
    /// Plan does not admit another record
    #[error("{reason}")]
    QuotaExceeded {
        /// Active plan tier
        plan: String,
        /// Limit in effect
        limit: u64,
        /// Detail message
        reason: String,
    },

    // ==================== Not Found ====================
    /// Target document does not exist
    #[error("{entity} not found")]
    NotFound {
        /// Entity display name ("Project")
        entity: String,
        /// External identifier looked up
        id: String,
    },

    // ==================== System Errors ====================
    /// I/O or storage error
    #[error("I/O error: {reason}")]
    Io {
        /// Detail message
        reason: String,
    },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization {
        /// Detail message
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Detail message
        reason: String,
    },
}

impl Error {
    /// HTTP-style status class for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidId { .. } | Error::InvalidInput { .. } | Error::NoChanges => 400,
            Error::QuotaExceeded { .. } => 402,
            Error::NotFound { .. } => 404,
            Error::Io { .. } | Error::Serialization { .. } | Error::Internal { .. } => 500,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidId { .. } => "InvalidId",
            Error::InvalidInput { .. } => "InvalidInput",
            Error::NoChanges => "NoChanges",
            Error::QuotaExceeded { .. } => "QuotaExceeded",
            Error::NotFound { .. } => "NotFound",
            Error::Io { .. } => "Io",
            Error::Serialization { .. } => "Serialization",
            Error::Internal { .. } => "Internal",
        }
    }

    /// True for the 4xx classes
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
