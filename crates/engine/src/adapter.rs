//! Document store adapter
//!
//! Collection-scoped primitives over the shared [`Database`]. Every method is
//! one store round trip (insert adds a read-back) and every document leaving
//! the adapter is normalized: identifier under `id` in external form, no
//! `_id`.
//!
//! The adapter also owns store-side defaults:
//! - `created_at` / `updated_at` stamped on insert unless supplied
//! - `updated_at` refreshed on partial update
//! - reserved identifier keys stripped from caller fields

use chrono::{SecondsFormat, Utc};
use qatrack_core::{
    strip_reserved, Document, Error, Fields, Filter, ObjectId, Result, Value,
};
use std::sync::Arc;
use tracing::debug;

use crate::database::Database;

/// Field stamped with the insert time
pub const CREATED_AT_FIELD: &str = "created_at";

/// Field stamped with the last write time
pub const UPDATED_AT_FIELD: &str = "updated_at";

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Collection-scoped access to the store
#[derive(Debug, Clone)]
pub struct DocumentAdapter {
    db: Arc<Database>,
}

impl DocumentAdapter {
    /// Create an adapter over a shared database handle
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// The underlying database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    fn prepare_insert(mut fields: Fields) -> Fields {
        strip_reserved(&mut fields);
        let now = now_rfc3339();
        fields
            .entry(CREATED_AT_FIELD.to_string())
            .or_insert_with(|| Value::from(now.clone()));
        fields
            .entry(UPDATED_AT_FIELD.to_string())
            .or_insert_with(|| Value::from(now));
        fields
    }

    fn read_back(&self, collection: &str, id: &ObjectId) -> Result<Document> {
        self.db
            .store()
            .find_by_id(collection, id)?
            .map(|doc| doc.normalize())
            .ok_or_else(|| {
                Error::internal(format!(
                    "document {} vanished from '{}' right after insert",
                    id, collection
                ))
            })
    }

    /// Insert a document and return it as persisted
    pub fn insert(&self, collection: &str, fields: Fields) -> Result<Document> {
        self.db.check_accepting()?;
        let id = self
            .db
            .store()
            .insert(collection, Self::prepare_insert(fields))?;
        self.db.after_write();
        debug!(target: "qatrack::db", collection, id = %id, "Inserted");
        self.read_back(collection, &id)
    }

    /// Insert only if `admit` accepts the collection's current count
    ///
    /// Count and insert are atomic with respect to other writers of the
    /// collection. Returns `None` when refused.
    pub fn insert_if(
        &self,
        collection: &str,
        fields: Fields,
        admit: &dyn Fn(u64) -> bool,
    ) -> Result<Option<Document>> {
        self.db.check_accepting()?;
        let Some(id) = self
            .db
            .store()
            .insert_if(collection, Self::prepare_insert(fields), admit)?
        else {
            debug!(target: "qatrack::db", collection, "Conditional insert refused");
            return Ok(None);
        };
        self.db.after_write();
        debug!(target: "qatrack::db", collection, id = %id, "Inserted (conditional)");
        self.read_back(collection, &id).map(Some)
    }

    /// Documents matching `filter`, in store-native order
    ///
    /// `limit` of `None` or `Some(0)` means no limit.
    pub fn scan(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Document>> {
        Ok(self
            .db
            .store()
            .find(collection, filter, limit)?
            .into_iter()
            .map(|doc| doc.normalize())
            .collect())
    }

    /// First document matching `filter`
    pub fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        Ok(self
            .db
            .store()
            .find_one(collection, filter)?
            .map(|doc| doc.normalize()))
    }

    /// Look up one document by native identifier
    pub fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<Document>> {
        Ok(self
            .db
            .store()
            .find_by_id(collection, id)?
            .map(|doc| doc.normalize()))
    }

    /// Merge `fields` into one document; `None` if nothing matched
    pub fn update_one(
        &self,
        collection: &str,
        id: &ObjectId,
        mut fields: Fields,
    ) -> Result<Option<Document>> {
        self.db.check_accepting()?;
        strip_reserved(&mut fields);
        fields.insert(UPDATED_AT_FIELD.to_string(), Value::from(now_rfc3339()));
        let updated = self.db.store().update_by_id(collection, id, fields)?;
        if updated.is_some() {
            self.db.after_write();
            debug!(target: "qatrack::db", collection, id = %id, "Updated");
        }
        Ok(updated.map(|doc| doc.normalize()))
    }

    /// Merge `fields` into the first match, inserting if none matches
    pub fn upsert_one(&self, collection: &str, filter: &Filter, mut fields: Fields) -> Result<Document> {
        self.db.check_accepting()?;
        strip_reserved(&mut fields);
        let doc = self.db.store().upsert_one(collection, filter, fields)?;
        self.db.after_write();
        debug!(target: "qatrack::db", collection, id = %doc.id, "Upserted");
        Ok(doc.normalize())
    }

    /// Remove one document; true if it existed
    pub fn delete_one(&self, collection: &str, id: &ObjectId) -> Result<bool> {
        self.db.check_accepting()?;
        let removed = self.db.store().delete_by_id(collection, id)?;
        if removed {
            self.db.after_write();
            debug!(target: "qatrack::db", collection, id = %id, "Deleted");
        }
        Ok(removed)
    }

    /// Remove every match; returns how many
    pub fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64> {
        self.db.check_accepting()?;
        let removed = self.db.store().delete_many(collection, filter)?;
        if removed > 0 {
            self.db.after_write();
            debug!(target: "qatrack::db", collection, removed, "Deleted many");
        }
        Ok(removed)
    }

    /// Number of matches
    pub fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        self.db.store().count(collection, filter)
    }

    /// Collections holding at least one document
    pub fn collection_names(&self) -> Result<Vec<String>> {
        self.db.store().collection_names()
    }
}
