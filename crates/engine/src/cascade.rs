//! Cascade policy: dependent children go before their parent
//!
//! Rules are data. A rule says: when a document of `parent` is deleted, every
//! document of `child` whose `foreign_key` equals the parent's external
//! identifier (string comparison) is deleted first.
//!
//! Cascades are not transactional. Children removed before a failed parent
//! delete stay removed.

use qatrack_core::{id, Filter, ObjectId, Result};
use tracing::info;

use crate::adapter::DocumentAdapter;
use crate::records::{PROJECT_COLLECTION, TESTCASE_COLLECTION};

/// One parent → child dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeRule {
    /// Collection whose deletes trigger the rule
    pub parent: String,
    /// Collection holding the dependents
    pub child: String,
    /// Child field holding the parent's external identifier
    pub foreign_key: String,
}

impl CascadeRule {
    /// Create a rule
    pub fn new(
        parent: impl Into<String>,
        child: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            foreign_key: foreign_key.into(),
        }
    }
}

/// Set of cascade rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePolicy {
    rules: Vec<CascadeRule>,
}

impl Default for CascadePolicy {
    /// project → testcase on `project_id`
    fn default() -> Self {
        Self::new(vec![CascadeRule::new(
            PROJECT_COLLECTION,
            TESTCASE_COLLECTION,
            "project_id",
        )])
    }
}

impl CascadePolicy {
    /// Policy with the given rules
    pub fn new(rules: Vec<CascadeRule>) -> Self {
        Self { rules }
    }

    /// Policy that never cascades
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    /// All rules
    pub fn rules(&self) -> &[CascadeRule] {
        &self.rules
    }

    /// Rules triggered by deletes in `parent`
    pub fn rules_for<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a CascadeRule> + 'a {
        self.rules.iter().filter(move |rule| rule.parent == parent)
    }

    /// Delete the dependents of one parent document
    ///
    /// Returns the number of child documents removed. Does not touch the
    /// parent itself. Dependents of dependents are not followed.
    pub fn apply(
        &self,
        adapter: &DocumentAdapter,
        parent: &str,
        parent_id: &ObjectId,
    ) -> Result<u64> {
        let external = id::encode(parent_id);
        let mut removed = 0;
        for rule in self.rules_for(parent) {
            let n = adapter.delete_many(
                &rule.child,
                &Filter::eq(rule.foreign_key.as_str(), external.as_str()),
            )?;
            if n > 0 {
                info!(
                    target: "qatrack::engine",
                    parent = %rule.parent,
                    child = %rule.child,
                    parent_id = %external,
                    removed = n,
                    "Cascade delete"
                );
            }
            removed += n;
        }
        Ok(removed)
    }
}
