//! Command enum defining all qatrack operations.
//!
//! Commands are the "instruction set" of qatrack. Every operation a client
//! can perform is represented as a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Pure data**: No closures or executable code
//!
//! Identifiers are carried in their external string form and decoded by the
//! handler, so a malformed id is reported as a bad request.

use qatrack_engine::{Project, ProjectUpdate, Testcase, TestcaseUpdate};
use serde::{Deserialize, Serialize};

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Database | 3 | Liveness, info, flush |
/// | Plan | 2 | Read and upgrade the plan tier |
/// | Project | 4 | Project lifecycle (creation is quota-gated) |
/// | Testcase | 4 | Testcase lifecycle |
/// | Dashboard | 1 | Aggregate counts |
///
/// # Example
///
/// ```ignore
/// use qatrack_executor::Command;
/// use qatrack_engine::Project;
///
/// let cmd = Command::ProjectCreate {
///     project: Project::new("Checkout"),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Database ====================
    /// Liveness check. Returns `Output::Pong`.
    Ping,

    /// Connection and store summary. Creates the plan record if absent.
    /// Returns `Output::DatabaseInfo`.
    Info,

    /// Persist the snapshot now. Returns `Output::Unit`.
    Flush,

    // ==================== Plan ====================
    /// Read the plan tier, creating it as `free` if absent.
    /// Returns `Output::Plan`.
    PlanGet,

    /// Move to `pro`. Idempotent. Returns `Output::Plan`.
    PlanUpgrade,

    // ==================== Project ====================
    /// All projects. Returns `Output::Projects`.
    ProjectList,

    /// Create a project through the quota gate. Returns `Output::Project`.
    ProjectCreate {
        /// Record to insert
        project: Project,
    },

    /// Partial update. Returns `Output::Project`.
    ProjectUpdate {
        /// External project id
        id: String,
        /// Fields to set
        update: ProjectUpdate,
    },

    /// Delete a project and its testcases. Returns `Output::Deleted`.
    ProjectDelete {
        /// External project id
        id: String,
    },

    // ==================== Testcase ====================
    /// Testcases of one project. Returns `Output::Testcases`.
    TestcaseList {
        /// External project id, compared as a string
        project_id: String,
    },

    /// Create a testcase under a project. Returns `Output::Testcase`.
    ///
    /// `project_id` must equal `testcase.project_id`. The project's
    /// existence is not checked.
    TestcaseCreate {
        /// External project id the request is addressed to
        project_id: String,
        /// Record to insert
        testcase: Testcase,
    },

    /// Partial update. Returns `Output::Testcase`.
    TestcaseUpdate {
        /// External testcase id
        id: String,
        /// Fields to set
        update: TestcaseUpdate,
    },

    /// Delete one testcase. Returns `Output::Deleted`.
    TestcaseDelete {
        /// External testcase id
        id: String,
    },

    // ==================== Dashboard ====================
    /// Totals and rates. Returns `Output::Dashboard`.
    Dashboard,
}

impl Command {
    /// Returns `true` if this command performs a write operation.
    ///
    /// `Info` and `PlanGet` are reads even though they may create the plan
    /// record on first use.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::Flush
                | Command::PlanUpgrade
                | Command::ProjectCreate { .. }
                | Command::ProjectUpdate { .. }
                | Command::ProjectDelete { .. }
                | Command::TestcaseCreate { .. }
                | Command::TestcaseUpdate { .. }
                | Command::TestcaseDelete { .. }
        )
    }

    /// Returns the variant name as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::Info => "Info",
            Command::Flush => "Flush",
            Command::PlanGet => "PlanGet",
            Command::PlanUpgrade => "PlanUpgrade",
            Command::ProjectList => "ProjectList",
            Command::ProjectCreate { .. } => "ProjectCreate",
            Command::ProjectUpdate { .. } => "ProjectUpdate",
            Command::ProjectDelete { .. } => "ProjectDelete",
            Command::TestcaseList { .. } => "TestcaseList",
            Command::TestcaseCreate { .. } => "TestcaseCreate",
            Command::TestcaseUpdate { .. } => "TestcaseUpdate",
            Command::TestcaseDelete { .. } => "TestcaseDelete",
            Command::Dashboard => "Dashboard",
        }
    }
}
