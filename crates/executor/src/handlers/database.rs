//! Database-level command handlers.

use std::sync::Arc;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::types::DatabaseInfo;
use crate::{Output, Result};

/// Handle Ping command.
pub fn ping() -> Result<Output> {
    Ok(Output::Pong {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle Info command.
///
/// Reads the plan the way `PlanGet` does, so the plan record exists
/// afterwards.
pub fn info(p: &Arc<Primitives>) -> Result<Output> {
    let plan = convert_result(p.quota.current())?;
    let collections = convert_result(p.adapter.collection_names())?;
    Ok(Output::DatabaseInfo(DatabaseInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        database_name: p.db.name(),
        connection_status: "ok".to_string(),
        persistent: !p.db.is_ephemeral(),
        collections,
        plan,
    }))
}

/// Handle Flush command.
pub fn flush(p: &Arc<Primitives>) -> Result<Output> {
    convert_result(p.db.flush())?;
    Ok(Output::Unit)
}
