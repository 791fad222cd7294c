//! Common test utilities for executor tests

#![allow(dead_code)]

use std::sync::Arc;

use qatrack_engine::Database;
use qatrack::{Command, Executor, Output, Project, Stored, Testcase, Tracker};

/// Create an executor with an in-memory database
pub fn create_executor() -> Executor {
    let db = Database::ephemeral().unwrap();
    Executor::new(db)
}

/// Create a Tracker with an in-memory database
pub fn create_tracker() -> Tracker {
    Tracker::ephemeral().unwrap()
}

/// Create a database for shared use
pub fn create_db() -> Arc<Database> {
    Database::ephemeral().unwrap()
}

/// Create a project through the executor, panicking on failure
pub fn create_project(executor: &Executor, name: &str) -> Stored<Project> {
    match executor
        .execute(Command::ProjectCreate {
            project: Project::new(name),
        })
        .unwrap()
    {
        Output::Project(p) => p,
        other => panic!("Expected Output::Project, got {:?}", other),
    }
}

/// Create a testcase under `project_id`, panicking on failure
pub fn create_testcase(executor: &Executor, project_id: &str, name: &str) -> Stored<Testcase> {
    match executor
        .execute(Command::TestcaseCreate {
            project_id: project_id.to_string(),
            testcase: Testcase::new(project_id, name),
        })
        .unwrap()
    {
        Output::Testcase(t) => t,
        other => panic!("Expected Output::Testcase, got {:?}", other),
    }
}

/// Extract testcases from Output::Testcases
pub fn extract_testcases(output: Output) -> Vec<Stored<Testcase>> {
    match output {
        Output::Testcases(ts) => ts,
        other => panic!("Expected Output::Testcases, got {:?}", other),
    }
}
