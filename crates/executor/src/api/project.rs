//! Project operations.

use super::Tracker;
use crate::{Command, Error, Output, Result};
use qatrack_engine::{Project, ProjectUpdate, Stored};

impl Tracker {
    /// All projects, in store order.
    pub fn list_projects(&self) -> Result<Vec<Stored<Project>>> {
        match self.executor.execute(Command::ProjectList)? {
            Output::Projects(projects) => Ok(projects),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ProjectList".into(),
            }),
        }
    }

    /// Create a project.
    ///
    /// On the free plan this fails with `QuotaExceeded` once the project
    /// limit is reached.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let p = tracker.create_project(Project::new("Checkout"))?;
    /// println!("created {}", p.id);
    /// ```
    pub fn create_project(&self, project: Project) -> Result<Stored<Project>> {
        match self.executor.execute(Command::ProjectCreate { project })? {
            Output::Project(p) => Ok(p),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ProjectCreate".into(),
            }),
        }
    }

    /// Apply a partial update to a project.
    pub fn update_project(&self, id: &str, update: ProjectUpdate) -> Result<Stored<Project>> {
        match self.executor.execute(Command::ProjectUpdate {
            id: id.to_string(),
            update,
        })? {
            Output::Project(p) => Ok(p),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ProjectUpdate".into(),
            }),
        }
    }

    /// Delete a project and every testcase referencing it.
    pub fn delete_project(&self, id: &str) -> Result<()> {
        match self.executor.execute(Command::ProjectDelete { id: id.to_string() })? {
            Output::Deleted(_) => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ProjectDelete".into(),
            }),
        }
    }
}
