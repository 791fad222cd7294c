//! Document types
//!
//! A document is an open mapping from field name to [`Value`] plus one
//! store-assigned identifier. Two representations exist:
//!
//! - [`StoredDocument`]: store-side, identifier in native form under `_id`
//! - [`Document`]: normalized, identifier in external form under `id`
//!
//! Normalization is the only way to get from one to the other; the internal
//! identifier field never appears in a [`Document`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::id::{self, ObjectId};
use crate::value::Value;

/// Name of the identifier field inside the store
pub const INTERNAL_ID_FIELD: &str = "_id";

/// Name of the identifier field exposed to callers
pub const EXTERNAL_ID_FIELD: &str = "id";

/// Field map of a document (identifier excluded)
pub type Fields = BTreeMap<String, Value>;

/// Remove the identifier keys a caller may not set
pub fn strip_reserved(fields: &mut Fields) {
    fields.remove(INTERNAL_ID_FIELD);
    fields.remove(EXTERNAL_ID_FIELD);
}

/// Document as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Native identifier
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Every other field
    #[serde(flatten)]
    pub fields: Fields,
}

impl StoredDocument {
    /// Create a stored document
    pub fn new(id: ObjectId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Rewrite the identifier into its external form under `id`
    pub fn normalize(self) -> Document {
        Document {
            id: id::encode(&self.id),
            fields: self.fields,
        }
    }
}

/// Normalized document, as returned to callers
///
/// Serializes flat: `{"id": "...", <fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// External identifier
    pub id: String,
    /// Every other field
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Look up a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Convert into a typed record through the serde data model
    pub fn into_record<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        let mut map = serde_json::Map::new();
        map.insert(
            EXTERNAL_ID_FIELD.to_string(),
            serde_json::Value::String(self.id),
        );
        for (k, v) in self.fields {
            map.insert(k, v.into());
        }
        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }
}

/// Convert any serializable record into a field map
///
/// Fails unless the record serializes to an object.
pub fn to_fields<T: Serialize>(record: &T) -> Result<Fields> {
    let json = serde_json::to_value(record)?;
    Value::from(json).into_object().ok_or_else(|| Error::Serialization {
        message: "record did not serialize to an object".to_string(),
    })
}

// =============================================================================
// Filter
// =============================================================================

/// Equality-conjunction filter
///
/// Matches a document when every clause `field == value` holds. A field the
/// document lacks compares equal to `Null`. The empty filter matches all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    clauses: BTreeMap<String, Value>,
}

impl Filter {
    /// Filter matching every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Single-clause filter
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// Add a clause
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.insert(field.into(), value.into());
        self
    }

    /// True when no clauses are present
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses in field order
    pub fn clauses(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.clauses.iter()
    }

    /// Evaluate against a field map
    pub fn matches(&self, fields: &Fields) -> bool {
        self.clauses.iter().all(|(field, expected)| match fields.get(field) {
            Some(actual) => actual == expected,
            None => expected.is_null(),
        })
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Full copy of a store's contents, keyed by collection
///
/// Collections keep store-native order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Documents per collection
    pub collections: BTreeMap<String, Vec<StoredDocument>>,
}

impl StoreSnapshot {
    /// Total number of documents
    pub fn document_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}
