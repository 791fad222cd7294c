//! Document store abstraction
//!
//! This module defines the [`DocumentStore`] trait that separates the engine
//! from the backend holding the documents. Everything above this trait talks
//! in collections, filters and native identifiers; nothing above it knows how
//! documents are laid out.

use crate::document::{Fields, Filter, StoreSnapshot, StoredDocument};
use crate::error::Result;
use crate::id::ObjectId;

/// Backend holding schemaless documents grouped into collections
///
/// Collections come into existence on first write. Each method is one round
/// trip and mutates at most what its name says: single-document methods are
/// atomic per document, `delete_many` is atomic per collection.
///
/// Thread safety: All methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait DocumentStore: Send + Sync {
    /// Insert a document, assigning a fresh identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn insert(&self, collection: &str, fields: Fields) -> Result<ObjectId>;

    /// Insert only if `admit` accepts the collection's current document count
    ///
    /// The count and the insert happen under one lock, so no other writer to
    /// the collection can interleave. Returns `None` when refused.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn insert_if(
        &self,
        collection: &str,
        fields: Fields,
        admit: &dyn Fn(u64) -> bool,
    ) -> Result<Option<ObjectId>>;

    /// Read one document by identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<StoredDocument>>;

    /// Scan documents matching `filter` in store-native order
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>>;

    /// First document matching `filter`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDocument>> {
        Ok(self.find(collection, filter, Some(1))?.into_iter().next())
    }

    /// Merge `set` into the document with this identifier
    ///
    /// Returns the post-update document, or `None` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn update_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
        set: Fields,
    ) -> Result<Option<StoredDocument>>;

    /// Merge `set` into the first document matching `filter`, inserting
    /// `set` as a new document when none matches
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn upsert_one(&self, collection: &str, filter: &Filter, set: Fields)
        -> Result<StoredDocument>;

    /// Remove the document with this identifier; true if one was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn delete_by_id(&self, collection: &str, id: &ObjectId) -> Result<bool>;

    /// Remove every document matching `filter`; returns how many
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64>;

    /// Number of documents matching `filter`
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn count(&self, collection: &str, filter: &Filter) -> Result<u64>;

    /// Names of collections holding at least one document, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn collection_names(&self) -> Result<Vec<String>>;

    /// Copy the whole store
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be exported.
    fn export(&self) -> Result<StoreSnapshot>;
}
