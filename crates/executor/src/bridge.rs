//! Bridge module: direct access to engine components.
//!
//! - [`Primitives`]: Holds the database and every engine component built on it
//! - [`parse_id`]: Decodes an external identifier at the request boundary

use std::sync::Arc;

use qatrack_core::ObjectId;
use qatrack_engine::{
    CollectionEngine, Database, DocumentAdapter, Project, QuotaGate, Record, Testcase,
};

use crate::{Error, Result};

/// Direct access to all engine components.
///
/// Built once per executor from the shared database handle.
#[derive(Debug, Clone)]
pub struct Primitives {
    /// The underlying database
    pub db: Arc<Database>,
    /// Raw collection access (info, dashboard)
    pub adapter: DocumentAdapter,
    /// Project lifecycle
    pub projects: CollectionEngine<Project>,
    /// Testcase lifecycle
    pub testcases: CollectionEngine<Testcase>,
    /// Plan tier and admission
    pub quota: QuotaGate,
}

impl Primitives {
    /// Create primitives from a database instance.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            adapter: DocumentAdapter::new(Arc::clone(&db)),
            projects: CollectionEngine::new(&db),
            testcases: CollectionEngine::new(&db),
            quota: QuotaGate::new(&db),
            db,
        }
    }
}

/// Decode the external id of an `R`, naming the entity on failure.
pub fn parse_id<R: Record>(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| Error::InvalidId {
        entity: R::ENTITY.to_lowercase(),
        value: id.to_string(),
    })
}
