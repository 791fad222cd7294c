//! Testcase operations.

use super::Tracker;
use crate::{Command, Error, Output, Result};
use qatrack_engine::{Stored, Testcase, TestcaseUpdate};

impl Tracker {
    /// Testcases whose `project_id` equals `project_id`.
    pub fn list_testcases(&self, project_id: &str) -> Result<Vec<Stored<Testcase>>> {
        match self.executor.execute(Command::TestcaseList {
            project_id: project_id.to_string(),
        })? {
            Output::Testcases(testcases) => Ok(testcases),
            _ => Err(Error::Internal {
                reason: "Unexpected output for TestcaseList".into(),
            }),
        }
    }

    /// Create a testcase under `project_id`.
    ///
    /// Fails with `InvalidInput` if `testcase.project_id` differs.
    pub fn create_testcase(&self, project_id: &str, testcase: Testcase) -> Result<Stored<Testcase>> {
        match self.executor.execute(Command::TestcaseCreate {
            project_id: project_id.to_string(),
            testcase,
        })? {
            Output::Testcase(t) => Ok(t),
            _ => Err(Error::Internal {
                reason: "Unexpected output for TestcaseCreate".into(),
            }),
        }
    }

    /// Apply a partial update to a testcase.
    pub fn update_testcase(&self, id: &str, update: TestcaseUpdate) -> Result<Stored<Testcase>> {
        match self.executor.execute(Command::TestcaseUpdate {
            id: id.to_string(),
            update,
        })? {
            Output::Testcase(t) => Ok(t),
            _ => Err(Error::Internal {
                reason: "Unexpected output for TestcaseUpdate".into(),
            }),
        }
    }

    /// Delete one testcase.
    pub fn delete_testcase(&self, id: &str) -> Result<()> {
        match self.executor.execute(Command::TestcaseDelete { id: id.to_string() })? {
            Output::Deleted(_) => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for TestcaseDelete".into(),
            }),
        }
    }
}
