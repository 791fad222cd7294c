//! Session wrapper with project context.
//!
//! Holds the `Tracker` handle and the current project, which testcase
//! commands use when no project id is given.

use qatrack_executor::{Command, Output, Result, Tracker};

/// Wraps the database handle and tracks current context.
pub struct SessionState {
    tracker: Tracker,
    project: Option<String>,
}

impl SessionState {
    /// Create a new SessionState from a Tracker handle.
    pub fn new(tracker: Tracker, project: Option<String>) -> Self {
        Self { tracker, project }
    }

    /// Execute a command via the executor.
    pub fn execute(&mut self, cmd: Command) -> Result<Output> {
        let deleted_project = match &cmd {
            Command::ProjectDelete { id } => Some(id.clone()),
            _ => None,
        };
        let output = self.tracker.executor().execute(cmd)?;
        // Drop the context once its project is gone
        if deleted_project.is_some() && deleted_project == self.project {
            self.project = None;
        }
        Ok(output)
    }

    /// Current project id, if any.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Switch project context. `None` clears it.
    pub fn set_project(&mut self, project: Option<String>) {
        self.project = project;
    }

    /// Build the REPL prompt string.
    pub fn prompt(&self) -> String {
        match &self.project {
            Some(p) => format!("qatrack:{}> ", p),
            None => "qatrack> ".to_string(),
        }
    }

    /// Persist and release the database.
    pub fn shutdown(&self) -> Result<()> {
        self.tracker.shutdown()
    }
}
