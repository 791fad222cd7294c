//! Plan command handlers.

use std::sync::Arc;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::types::PlanInfo;
use crate::{Output, Result};

/// Handle PlanGet command.
pub fn plan_get(p: &Arc<Primitives>) -> Result<Output> {
    let plan = convert_result(p.quota.current())?;
    Ok(Output::Plan(PlanInfo { plan }))
}

/// Handle PlanUpgrade command.
pub fn plan_upgrade(p: &Arc<Primitives>) -> Result<Output> {
    let plan = convert_result(p.quota.upgrade())?;
    Ok(Output::Plan(PlanInfo { plan }))
}
