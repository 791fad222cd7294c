//! Database, plan and dashboard operations.

use super::Tracker;
use crate::types::*;
use crate::{Command, Error, Output, Result};
use qatrack_engine::{Dashboard, PlanTier};

impl Tracker {
    // =========================================================================
    // Database Operations (3)
    // =========================================================================

    /// Ping the database.
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Ping".into(),
            }),
        }
    }

    /// Get database info.
    pub fn info(&self) -> Result<DatabaseInfo> {
        match self.executor.execute(Command::Info)? {
            Output::DatabaseInfo(info) => Ok(info),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Info".into(),
            }),
        }
    }

    /// Flush the database to disk.
    pub fn flush(&self) -> Result<()> {
        match self.executor.execute(Command::Flush)? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Flush".into(),
            }),
        }
    }

    // =========================================================================
    // Plan Operations (2)
    // =========================================================================

    /// Current plan tier; creates the plan record as `free` if absent.
    pub fn plan(&self) -> Result<PlanTier> {
        match self.executor.execute(Command::PlanGet)? {
            Output::Plan(info) => Ok(info.plan),
            _ => Err(Error::Internal {
                reason: "Unexpected output for PlanGet".into(),
            }),
        }
    }

    /// Upgrade to `pro`. Idempotent.
    pub fn upgrade(&self) -> Result<PlanTier> {
        match self.executor.execute(Command::PlanUpgrade)? {
            Output::Plan(info) => Ok(info.plan),
            _ => Err(Error::Internal {
                reason: "Unexpected output for PlanUpgrade".into(),
            }),
        }
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Totals and pass/fail rates.
    pub fn dashboard(&self) -> Result<Dashboard> {
        match self.executor.execute(Command::Dashboard)? {
            Output::Dashboard(dash) => Ok(dash),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Dashboard".into(),
            }),
        }
    }
}
