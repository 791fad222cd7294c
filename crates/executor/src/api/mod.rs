//! High-level typed wrapper for the Executor.
//!
//! The [`Tracker`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`](crate::Command)/[`Output`](crate::Output)
//! enums with typed method calls.
//!
//! # Example
//!
//! ```text
//! use qatrack_executor::{Tracker, Project, Testcase, TestStatus, TestcaseUpdate};
//!
//! let tracker = Tracker::open("/path/to/data")?;
//!
//! let project = tracker.create_project(Project::new("Checkout"))?;
//! let tc = tracker.create_testcase(&project.id, Testcase::new(&project.id, "pay by card"))?;
//! tracker.update_testcase(&tc.id, TestcaseUpdate::status(TestStatus::Pass))?;
//!
//! println!("{:?}", tracker.dashboard()?);
//! ```

mod db;
mod project;
mod testcase;

use std::path::Path;
use std::sync::Arc;

use qatrack_engine::{Database, TrackerConfig};

use crate::convert::convert_result;
use crate::{Executor, Result};

/// High-level typed wrapper for tracker operations.
///
/// Cloning is cheap; clones share the database.
#[derive(Debug, Clone)]
pub struct Tracker {
    executor: Executor,
}

impl Tracker {
    /// Open a database at the given path.
    ///
    /// The database will be created if it doesn't exist. Settings come from
    /// `qatrack.toml` in that directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = convert_result(Database::open(path))?;
        Ok(Self::from_database(db))
    }

    /// Open a database at the given path with an explicit configuration.
    ///
    /// The config is written to `qatrack.toml` for subsequent opens.
    pub fn open_with_config<P: AsRef<Path>>(path: P, cfg: TrackerConfig) -> Result<Self> {
        let db = convert_result(Database::open_with_config(path, cfg))?;
        Ok(Self::from_database(db))
    }

    /// Create an in-memory database. Nothing is written to disk.
    pub fn ephemeral() -> Result<Self> {
        let db = convert_result(Database::ephemeral())?;
        Ok(Self::from_database(db))
    }

    /// Wrap an existing database handle.
    pub fn from_database(db: Arc<Database>) -> Self {
        Self {
            executor: Executor::new(db),
        }
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Stop accepting writes and persist.
    pub fn shutdown(&self) -> Result<()> {
        convert_result(self.executor.database().shutdown())
    }
}
