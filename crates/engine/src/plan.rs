//! Plan tier and quota gate
//!
//! The plan is a singleton document in the `plan` collection holding one
//! field, `plan`, with value `free` or `pro`.
//!
//! ```text
//!   free ──upgrade──▶ pro ──upgrade──▶ pro
//! ```
//!
//! There is no downgrade. While `free`, each quota-governed collection admits
//! a new record only if it holds fewer than `free_project_limit` documents;
//! the check and the insert are one atomic store step. `pro` admits always.

use qatrack_core::{Error, Fields, Filter, Result, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::adapter::DocumentAdapter;
use crate::collection::CollectionEngine;
use crate::database::Database;
use crate::records::{Record, Stored, PROJECT_COLLECTION};

/// Collection holding the plan singleton
pub const PLAN_COLLECTION: &str = "plan";

/// Field of the plan singleton holding the tier
pub const PLAN_FIELD: &str = "plan";

/// Subscription tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Limited
    #[default]
    Free,
    /// Unlimited
    Pro,
}

impl PlanTier {
    /// Stored form
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Pro => "pro",
        }
    }

    /// Read the tier from a stored value
    ///
    /// Anything unrecognised counts as `free`.
    pub fn from_stored(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("pro") => PlanTier::Pro,
            Some("free") | None => PlanTier::Free,
            Some(other) => {
                warn!(target: "qatrack::engine", value = other, "Unknown plan value, treating as free");
                PlanTier::Free
            }
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collection whose growth is limited on the free plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaRule {
    /// Governed collection
    pub collection: String,
}

/// Reads the plan and admits or refuses creations
#[derive(Debug, Clone)]
pub struct QuotaGate {
    adapter: DocumentAdapter,
    free_limit: u64,
    rules: Vec<QuotaRule>,
}

impl QuotaGate {
    /// Gate governing the project collection, limit taken from the config
    pub fn new(db: &Arc<Database>) -> Self {
        Self {
            adapter: DocumentAdapter::new(Arc::clone(db)),
            free_limit: db.config().free_project_limit,
            rules: vec![QuotaRule {
                collection: PROJECT_COLLECTION.to_string(),
            }],
        }
    }

    /// Replace the governed collections
    pub fn with_rules(mut self, rules: Vec<QuotaRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Plan tier, creating the singleton as `free` if absent
    pub fn current(&self) -> Result<PlanTier> {
        if let Some(doc) = self.adapter.find_one(PLAN_COLLECTION, &Filter::all())? {
            return Ok(PlanTier::from_stored(doc.get(PLAN_FIELD)));
        }

        let mut fields = Fields::new();
        fields.insert(PLAN_FIELD.to_string(), Value::from(PlanTier::Free.as_str()));
        if self
            .adapter
            .insert_if(PLAN_COLLECTION, fields, &|count| count == 0)?
            .is_some()
        {
            info!(target: "qatrack::engine", plan = "free", "Plan record created");
        }

        // Another writer may have created it first; read whichever exists.
        let doc = self
            .adapter
            .find_one(PLAN_COLLECTION, &Filter::all())?
            .ok_or_else(|| Error::internal("plan record missing after creation"))?;
        Ok(PlanTier::from_stored(doc.get(PLAN_FIELD)))
    }

    /// Plan tier without creating anything; absent counts as `free`
    pub fn peek(&self) -> Result<PlanTier> {
        Ok(self
            .adapter
            .find_one(PLAN_COLLECTION, &Filter::all())?
            .map(|doc| PlanTier::from_stored(doc.get(PLAN_FIELD)))
            .unwrap_or_default())
    }

    /// Move to `pro`. Idempotent.
    pub fn upgrade(&self) -> Result<PlanTier> {
        let mut fields = Fields::new();
        fields.insert(PLAN_FIELD.to_string(), Value::from(PlanTier::Pro.as_str()));
        self.adapter
            .upsert_one(PLAN_COLLECTION, &Filter::all(), fields)?;
        info!(target: "qatrack::engine", plan = "pro", "Plan upgraded");
        Ok(PlanTier::Pro)
    }

    /// Limit in effect for `collection` under `tier`; `None` means unlimited
    pub fn limit_for(&self, tier: PlanTier, collection: &str) -> Option<u64> {
        match tier {
            PlanTier::Pro => None,
            PlanTier::Free => self
                .rules
                .iter()
                .any(|rule| rule.collection == collection)
                .then_some(self.free_limit),
        }
    }

    /// Create a record through the gate
    ///
    /// Fails with `QuotaExceeded` when the plan does not admit another record.
    pub fn create<R: Record>(&self, engine: &CollectionEngine<R>, record: &R) -> Result<Stored<R>> {
        let tier = self.peek()?;
        let Some(limit) = self.limit_for(tier, R::COLLECTION) else {
            return engine.create(record);
        };

        match engine.create_admitted(record, &|count| count < limit)? {
            Some(stored) => Ok(stored),
            None => {
                debug!(
                    target: "qatrack::engine",
                    collection = R::COLLECTION,
                    plan = %tier,
                    limit,
                    "Quota refused creation"
                );
                Err(quota_exceeded::<R>(tier, limit))
            }
        }
    }
}

fn quota_exceeded<R: Record>(tier: PlanTier, limit: u64) -> Error {
    let entity = R::ENTITY.to_lowercase();
    let noun = if limit == 1 {
        entity.clone()
    } else {
        format!("{}s", entity)
    };
    Error::QuotaExceeded {
        plan: tier.to_string(),
        limit,
        message: format!(
            "Free plan allows only {} {}. Upgrade to Pro for unlimited {}s.",
            limit, noun, entity
        ),
    }
}
