//! Testcase command handlers.

use std::sync::Arc;

use qatrack_core::Filter;
use qatrack_engine::{Testcase, TestcaseUpdate};

use crate::bridge::{parse_id, Primitives};
use crate::convert::convert_result;
use crate::types::DeleteStatus;
use crate::{Error, Output, Result};

/// Handle TestcaseList command.
pub fn testcase_list(p: &Arc<Primitives>, project_id: String) -> Result<Output> {
    let filter = Filter::eq("project_id", project_id);
    let testcases = convert_result(p.testcases.list(&filter, None))?;
    Ok(Output::Testcases(testcases))
}

/// Handle TestcaseCreate command.
pub fn testcase_create(
    p: &Arc<Primitives>,
    project_id: String,
    testcase: Testcase,
) -> Result<Output> {
    if project_id != testcase.project_id {
        return Err(Error::InvalidInput {
            reason: "Project id mismatch".to_string(),
        });
    }
    let stored = convert_result(p.testcases.create(&testcase))?;
    Ok(Output::Testcase(stored))
}

/// Handle TestcaseUpdate command.
pub fn testcase_update(
    p: &Arc<Primitives>,
    id: String,
    update: TestcaseUpdate,
) -> Result<Output> {
    let oid = parse_id::<Testcase>(&id)?;
    let stored = convert_result(p.testcases.update(&oid, &update))?;
    Ok(Output::Testcase(stored))
}

/// Handle TestcaseDelete command.
pub fn testcase_delete(p: &Arc<Primitives>, id: String) -> Result<Output> {
    let oid = parse_id::<Testcase>(&id)?;
    convert_result(p.testcases.delete(&oid))?;
    Ok(Output::Deleted(DeleteStatus::deleted()))
}
