//! Collection engine: typed record lifecycle over one collection
//!
//! `CollectionEngine<R>` is the mapping layer between typed records and the
//! schemaless store. It is generic over the record type; the collection name
//! comes from [`Record::COLLECTION`].
//!
//! | Operation | Fails with |
//! |-----------|------------|
//! | `list` | store errors only |
//! | `create` | `InvalidInput` (validation) |
//! | `update` | `InvalidInput`, `NoChanges`, `NotFound` |
//! | `delete` | `NotFound` (after any cascade already ran) |
//!
//! Identifiers arrive already decoded; decoding is the caller's boundary.

use qatrack_core::{Error, Filter, ObjectId, Result};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

use crate::adapter::DocumentAdapter;
use crate::cascade::CascadePolicy;
use crate::database::Database;
use crate::records::{Record, RecordPatch, Stored};

/// Lifecycle operations for one record type
#[derive(Debug, Clone)]
pub struct CollectionEngine<R: Record> {
    adapter: DocumentAdapter,
    cascade: CascadePolicy,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> CollectionEngine<R> {
    /// Engine with the default cascade policy
    pub fn new(db: &Arc<Database>) -> Self {
        Self {
            adapter: DocumentAdapter::new(Arc::clone(db)),
            cascade: CascadePolicy::default(),
            _record: PhantomData,
        }
    }

    /// Replace the cascade policy
    pub fn with_cascade(mut self, cascade: CascadePolicy) -> Self {
        self.cascade = cascade;
        self
    }

    /// The adapter this engine writes through
    pub fn adapter(&self) -> &DocumentAdapter {
        &self.adapter
    }

    /// Records matching `filter`, in store order
    pub fn list(&self, filter: &Filter, limit: Option<usize>) -> Result<Vec<Stored<R>>> {
        self.adapter
            .scan(R::COLLECTION, filter, limit)?
            .into_iter()
            .map(Stored::from_document)
            .collect()
    }

    /// One record by identifier
    pub fn get(&self, id: &ObjectId) -> Result<Option<Stored<R>>> {
        self.adapter
            .find_by_id(R::COLLECTION, id)?
            .map(Stored::from_document)
            .transpose()
    }

    /// Number of records matching `filter`
    pub fn count(&self, filter: &Filter) -> Result<u64> {
        self.adapter.count(R::COLLECTION, filter)
    }

    /// Insert a record unconditionally
    pub fn create(&self, record: &R) -> Result<Stored<R>> {
        record.validate()?;
        let doc = self.adapter.insert(R::COLLECTION, record.to_fields()?)?;
        info!(target: "qatrack::engine", collection = R::COLLECTION, id = %doc.id, "Created");
        Stored::from_document(doc)
    }

    /// Insert a record if `admit` accepts the current collection count
    ///
    /// Count and insert are one atomic step. Returns `None` when refused.
    pub fn create_admitted(
        &self,
        record: &R,
        admit: &dyn Fn(u64) -> bool,
    ) -> Result<Option<Stored<R>>> {
        record.validate()?;
        match self
            .adapter
            .insert_if(R::COLLECTION, record.to_fields()?, admit)?
        {
            Some(doc) => {
                info!(target: "qatrack::engine", collection = R::COLLECTION, id = %doc.id, "Created");
                Stored::from_document(doc).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Apply a partial update
    ///
    /// Only the keys the patch carries are written. An empty patch fails with
    /// `NoChanges` before the store is consulted.
    pub fn update<P>(&self, id: &ObjectId, patch: &P) -> Result<Stored<R>>
    where
        P: RecordPatch<Target = R>,
    {
        let fields = patch.to_fields()?;
        if fields.is_empty() {
            return Err(Error::NoChanges {
                collection: R::COLLECTION.to_string(),
            });
        }
        patch.validate()?;

        let doc = self
            .adapter
            .update_one(R::COLLECTION, id, fields)?
            .ok_or_else(|| Error::not_found(R::ENTITY, id.to_hex()))?;
        debug!(target: "qatrack::engine", collection = R::COLLECTION, id = %doc.id, "Updated");
        Stored::from_document(doc)
    }

    /// Delete a record, cascading to its dependents first
    ///
    /// Returns how many dependents the cascade removed.
    pub fn delete(&self, id: &ObjectId) -> Result<u64> {
        let cascaded = self.cascade.apply(&self.adapter, R::COLLECTION, id)?;
        if !self.adapter.delete_one(R::COLLECTION, id)? {
            return Err(Error::not_found(R::ENTITY, id.to_hex()));
        }
        info!(
            target: "qatrack::engine",
            collection = R::COLLECTION,
            id = %id,
            cascaded,
            "Deleted"
        );
        Ok(cascaded)
    }
}
