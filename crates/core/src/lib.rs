//! Core types and traits for qatrack
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Tagged union held by every document field
//! - ObjectId: Store-assigned identifier and its external codec
//! - Document / StoredDocument: Normalized and store-side documents
//! - Filter: Equality-conjunction filter
//! - DocumentStore: Trait separating the engine from the backend
//! - Error: Error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod id;
pub mod traits;
pub mod value;

pub use document::{
    strip_reserved, to_fields, Document, Fields, Filter, StoreSnapshot, StoredDocument,
    EXTERNAL_ID_FIELD, INTERNAL_ID_FIELD,
};
pub use error::{Error, ErrorKind, Result};
pub use id::ObjectId;
pub use traits::DocumentStore;
pub use value::Value;
