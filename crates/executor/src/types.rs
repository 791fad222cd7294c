//! Supporting types for commands and outputs.
//!
//! These types are used in output values. All types are serializable.

use qatrack_engine::PlanTier;
use serde::{Deserialize, Serialize};

/// Database information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// Crate version
    pub version: String,
    /// Logical database name
    pub database_name: String,
    /// Always `"ok"` when the handle answered
    pub connection_status: String,
    /// Whether the database writes a snapshot to disk
    pub persistent: bool,
    /// Collections holding at least one document
    pub collections: Vec<String>,
    /// Current plan tier
    pub plan: PlanTier,
}

/// Plan tier body: `{"plan": "free"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInfo {
    /// Current tier
    pub plan: PlanTier,
}

/// Delete acknowledgement: `{"status": "deleted"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteStatus {
    /// Always `"deleted"`
    pub status: String,
}

impl DeleteStatus {
    /// The acknowledgement
    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_string(),
        }
    }
}
