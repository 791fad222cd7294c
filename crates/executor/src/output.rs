//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is
//! deterministic: the same command always produces the same output variant.

use qatrack_engine::{Dashboard, Project, Stored, Testcase};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output`
/// variant. [`Output::into_body`] gives the bare client-facing JSON body.
///
/// # Example
///
/// ```text
/// use qatrack_executor::{Command, Output, Executor};
///
/// match executor.execute(Command::PlanGet)? {
///     Output::Plan(info) => println!("plan: {}", info.plan),
///     _ => unreachable!("PlanGet always returns Plan"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (flush)
    Unit,

    /// Liveness answer
    Pong {
        /// Crate version
        version: String,
    },

    /// Connection and store summary
    DatabaseInfo(DatabaseInfo),

    /// Plan tier
    Plan(PlanInfo),

    /// One project
    Project(Stored<Project>),

    /// Projects in store order
    Projects(Vec<Stored<Project>>),

    /// One testcase
    Testcase(Stored<Testcase>),

    /// Testcases in store order
    Testcases(Vec<Stored<Testcase>>),

    /// Delete acknowledgement
    Deleted(DeleteStatus),

    /// Aggregate counts
    Dashboard(Dashboard),
}

impl Output {
    /// The response body without the variant tag
    pub fn into_body(self) -> serde_json::Result<serde_json::Value> {
        match self {
            Output::Unit => Ok(serde_json::Value::Null),
            Output::Pong { version } => Ok(serde_json::json!({
                "message": "qatrack is running",
                "version": version,
            })),
            Output::DatabaseInfo(info) => serde_json::to_value(info),
            Output::Plan(plan) => serde_json::to_value(plan),
            Output::Project(p) => serde_json::to_value(p),
            Output::Projects(ps) => serde_json::to_value(ps),
            Output::Testcase(t) => serde_json::to_value(t),
            Output::Testcases(ts) => serde_json::to_value(ts),
            Output::Deleted(status) => serde_json::to_value(status),
            Output::Dashboard(dash) => serde_json::to_value(dash),
        }
    }
}
