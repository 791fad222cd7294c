//! Sharded document storage
//!
//! One shard per collection, held in a DashMap.
//! Writers to different collections never contend.
//!
//! # Design
//!
//! - DashMap: collection name → [`Shard`], shard-level locking
//! - BTreeMap inside a shard: identifier order is store-native scan order
//! - AtomicU64 version: bumped on every mutation, used to detect unsaved state
//!
//! # Atomicity
//!
//! Every method touches at most one shard and holds that shard's lock for its
//! whole duration, so single-collection operations (including `insert_if` and
//! `delete_many`) are atomic. Nothing spans collections.

use dashmap::DashMap;
use qatrack_core::{
    DocumentStore, Fields, Filter, ObjectId, Result, StoreSnapshot, StoredDocument,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Documents of one collection
#[derive(Debug, Default)]
pub struct Shard {
    pub(crate) docs: BTreeMap<ObjectId, Fields>,
}

impl Shard {
    /// Create a new empty shard
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of documents in this shard
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Check if shard is empty
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn matching<'a>(
        &'a self,
        filter: &'a Filter,
    ) -> impl Iterator<Item = (&'a ObjectId, &'a Fields)> + 'a {
        self.docs.iter().filter(move |(_, f)| filter.matches(f))
    }

    /// Insert under an identifier not yet present in this shard
    fn insert_fresh(&mut self, fields: Fields) -> ObjectId {
        let mut id = ObjectId::new();
        while self.docs.contains_key(&id) {
            id = ObjectId::new();
        }
        self.docs.insert(id, fields);
        id
    }
}

/// Sharded document store - DashMap by collection, BTreeMap within
///
/// # Example
///
/// ```ignore
/// use qatrack_storage::ShardedStore;
/// use qatrack_core::{DocumentStore, Filter};
///
/// let store = ShardedStore::new();
/// let id = store.insert("project", fields)?;
/// let all = store.find("project", &Filter::all(), None)?;
/// ```
#[derive(Debug, Default)]
pub struct ShardedStore {
    shards: DashMap<String, Shard>,
    version: AtomicU64,
}

impl ShardedStore {
    /// Create new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let store = Self::new();
        for (name, docs) in snapshot.collections {
            let mut shard = Shard::new();
            for doc in docs {
                shard.docs.insert(doc.id, doc.fields);
            }
            store.shards.insert(name, shard);
        }
        store
    }

    /// Mutation counter
    ///
    /// Increases on every write that changed something. Equal values mean
    /// equal contents.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    #[inline]
    fn bump(&self) {
        self.version.fetch_add(1, Ordering::AcqRel);
    }

    /// Get number of shards (collections, including emptied ones)
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Get total number of documents across all shards
    pub fn total_documents(&self) -> usize {
        self.shards.iter().map(|entry| entry.value().len()).sum()
    }
}

impl DocumentStore for ShardedStore {
    fn insert(&self, collection: &str, fields: Fields) -> Result<ObjectId> {
        let id = self
            .shards
            .entry(collection.to_string())
            .or_default()
            .insert_fresh(fields);
        self.bump();
        Ok(id)
    }

    fn insert_if(
        &self,
        collection: &str,
        fields: Fields,
        admit: &dyn Fn(u64) -> bool,
    ) -> Result<Option<ObjectId>> {
        let mut shard = self.shards.entry(collection.to_string()).or_default();
        if !admit(shard.len() as u64) {
            return Ok(None);
        }
        let id = shard.insert_fresh(fields);
        drop(shard);
        self.bump();
        Ok(Some(id))
    }

    fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<StoredDocument>> {
        Ok(self.shards.get(collection).and_then(|shard| {
            shard
                .docs
                .get(id)
                .map(|fields| StoredDocument::new(*id, fields.clone()))
        }))
    }

    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>> {
        let Some(shard) = self.shards.get(collection) else {
            return Ok(Vec::new());
        };
        // A zero limit means no limit
        let take = limit.filter(|n| *n > 0).unwrap_or(usize::MAX);
        Ok(shard
            .matching(filter)
            .take(take)
            .map(|(id, fields)| StoredDocument::new(*id, fields.clone()))
            .collect())
    }

    fn update_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
        set: Fields,
    ) -> Result<Option<StoredDocument>> {
        let Some(mut shard) = self.shards.get_mut(collection) else {
            return Ok(None);
        };
        let Some(fields) = shard.docs.get_mut(id) else {
            return Ok(None);
        };
        fields.extend(set);
        let updated = StoredDocument::new(*id, fields.clone());
        drop(shard);
        self.bump();
        Ok(Some(updated))
    }

    fn upsert_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Fields,
    ) -> Result<StoredDocument> {
        let mut shard = self.shards.entry(collection.to_string()).or_default();
        let existing = shard.matching(filter).map(|(id, _)| *id).next();
        let doc = match existing {
            Some(id) => {
                let fields = shard.docs.entry(id).or_default();
                fields.extend(set);
                StoredDocument::new(id, fields.clone())
            }
            None => {
                // New document carries the filter's equality clauses too
                let mut fields: Fields = filter
                    .clauses()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                fields.extend(set);
                let id = shard.insert_fresh(fields.clone());
                StoredDocument::new(id, fields)
            }
        };
        drop(shard);
        self.bump();
        Ok(doc)
    }

    fn delete_by_id(&self, collection: &str, id: &ObjectId) -> Result<bool> {
        let removed = self
            .shards
            .get_mut(collection)
            .map(|mut shard| shard.docs.remove(id).is_some())
            .unwrap_or(false);
        if removed {
            self.bump();
        }
        Ok(removed)
    }

    fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let removed = match self.shards.get_mut(collection) {
            Some(mut shard) => {
                let before = shard.docs.len();
                shard.docs.retain(|_, fields| !filter.matches(fields));
                (before - shard.docs.len()) as u64
            }
            None => 0,
        };
        if removed > 0 {
            self.bump();
        }
        Ok(removed)
    }

    fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        Ok(self
            .shards
            .get(collection)
            .map(|shard| shard.matching(filter).count() as u64)
            .unwrap_or(0))
    }

    fn collection_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .shards
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn export(&self) -> Result<StoreSnapshot> {
        let collections = self
            .shards
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| {
                let docs = entry
                    .value()
                    .docs
                    .iter()
                    .map(|(id, fields)| StoredDocument::new(*id, fields.clone()))
                    .collect();
                (entry.key().clone(), docs)
            })
            .collect();
        Ok(StoreSnapshot { collections })
    }
}
