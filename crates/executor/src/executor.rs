//! The Executor - single entry point to the qatrack engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate engine operations and converts results to outputs.

use std::sync::Arc;

use qatrack_engine::Database;
use tracing::debug;

use crate::bridge::Primitives;
use crate::{Command, Output, Result};

/// The command executor - single entry point to the qatrack engine.
///
/// The Executor is **stateless**: it holds references to the engine
/// components but maintains no state of its own. All state lives in the
/// store.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use qatrack_executor::{Command, Executor};
/// use qatrack_engine::Database;
///
/// let executor = Executor::new(Database::ephemeral()?);
///
/// let plan = executor.execute(Command::PlanGet)?;
/// let results = executor.execute_many(vec![Command::ProjectList, Command::Dashboard]);
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    primitives: Arc<Primitives>,
}

impl Executor {
    /// Create a new executor over a shared database handle.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            primitives: Arc::new(Primitives::new(db)),
        }
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        debug!(target: "qatrack::executor", command = cmd.name(), "Execute");
        let p = &self.primitives;
        let result = match cmd {
            // Database
            Command::Ping => crate::handlers::database::ping(),
            Command::Info => crate::handlers::database::info(p),
            Command::Flush => crate::handlers::database::flush(p),

            // Plan
            Command::PlanGet => crate::handlers::plan::plan_get(p),
            Command::PlanUpgrade => crate::handlers::plan::plan_upgrade(p),

            // Project
            Command::ProjectList => crate::handlers::project::project_list(p),
            Command::ProjectCreate { project } => {
                crate::handlers::project::project_create(p, project)
            }
            Command::ProjectUpdate { id, update } => {
                crate::handlers::project::project_update(p, id, update)
            }
            Command::ProjectDelete { id } => crate::handlers::project::project_delete(p, id),

            // Testcase
            Command::TestcaseList { project_id } => {
                crate::handlers::testcase::testcase_list(p, project_id)
            }
            Command::TestcaseCreate {
                project_id,
                testcase,
            } => crate::handlers::testcase::testcase_create(p, project_id, testcase),
            Command::TestcaseUpdate { id, update } => {
                crate::handlers::testcase::testcase_update(p, id, update)
            }
            Command::TestcaseDelete { id } => crate::handlers::testcase::testcase_delete(p, id),

            // Dashboard
            Command::Dashboard => crate::handlers::dashboard::dashboard(p),
        };
        if let Err(ref e) = result {
            debug!(
                target: "qatrack::executor",
                code = e.code(),
                status = e.status_code(),
                error = %e,
                "Command failed"
            );
        }
        result
    }

    /// Execute multiple commands sequentially.
    ///
    /// Every command runs regardless of earlier failures.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// The database this executor runs against.
    pub fn database(&self) -> &Arc<Database> {
        &self.primitives.db
    }
}
