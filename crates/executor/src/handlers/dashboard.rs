//! Dashboard command handler.

use std::sync::Arc;

use qatrack_engine::Dashboard;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle Dashboard command.
pub fn dashboard(p: &Arc<Primitives>) -> Result<Output> {
    let dash = convert_result(Dashboard::compute(&p.adapter))?;
    Ok(Output::Dashboard(dash))
}
