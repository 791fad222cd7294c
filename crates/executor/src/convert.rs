//! Error conversion from internal error types.
//!
//! This module provides conversions from engine errors to the executor's
//! [`Error`] type.

use crate::Error;
use qatrack_core::Error as CoreError;

/// Convert a core error to an executor Error.
///
/// Identifier failures that reach this point carry no entity; handlers that
/// accept an external id decode it themselves and name the entity.
impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidIdentifier { value, .. } => Error::InvalidId {
                entity: "document".to_string(),
                value,
            },
            CoreError::InvalidInput { message } => Error::InvalidInput { reason: message },
            CoreError::NoChanges { .. } => Error::NoChanges,
            CoreError::NotFound { entity, id } => Error::NotFound { entity, id },
            CoreError::QuotaExceeded {
                plan,
                limit,
                message,
            } => Error::QuotaExceeded {
                plan,
                limit,
                reason: message,
            },
            CoreError::Storage { message } => Error::Io { reason: message },
            CoreError::Io(e) => Error::Io {
                reason: e.to_string(),
            },
            CoreError::Serialization { message } => Error::Serialization { reason: message },
            CoreError::Internal { message } => Error::Internal { reason: message },
        }
    }
}

/// Convert a core result to an executor result.
pub fn convert_result<T>(result: qatrack_core::Result<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
