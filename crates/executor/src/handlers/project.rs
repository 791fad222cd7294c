//! Project command handlers.

use std::sync::Arc;

use qatrack_core::Filter;
use qatrack_engine::{Project, ProjectUpdate};

use crate::bridge::{parse_id, Primitives};
use crate::convert::convert_result;
use crate::types::DeleteStatus;
use crate::{Output, Result};

/// Handle ProjectList command.
pub fn project_list(p: &Arc<Primitives>) -> Result<Output> {
    let projects = convert_result(p.projects.list(&Filter::all(), None))?;
    Ok(Output::Projects(projects))
}

/// Handle ProjectCreate command.
pub fn project_create(p: &Arc<Primitives>, project: Project) -> Result<Output> {
    let stored = convert_result(p.quota.create(&p.projects, &project))?;
    Ok(Output::Project(stored))
}

/// Handle ProjectUpdate command.
pub fn project_update(p: &Arc<Primitives>, id: String, update: ProjectUpdate) -> Result<Output> {
    let oid = parse_id::<Project>(&id)?;
    let stored = convert_result(p.projects.update(&oid, &update))?;
    Ok(Output::Project(stored))
}

/// Handle ProjectDelete command.
///
/// Testcases referencing the project are removed first.
pub fn project_delete(p: &Arc<Primitives>, id: String) -> Result<Output> {
    let oid = parse_id::<Project>(&id)?;
    convert_result(p.projects.delete(&oid))?;
    Ok(Output::Deleted(DeleteStatus::deleted()))
}
