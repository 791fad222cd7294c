//! Record engine for qatrack
//!
//! This crate sits between the executor and the document store:
//! - Database: the one shared store handle, open/flush/shutdown
//! - DocumentAdapter: collection-scoped primitives, identifier normalization
//! - CollectionEngine: typed create/list/update/delete over one collection
//! - QuotaGate: plan tier and admission of new records
//! - CascadePolicy: dependent deletes
//! - Dashboard: aggregate counts
//!
//! The engine is the only component that knows about:
//! - Record types and their collections
//! - Plan rules
//! - Parent/child relationships

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod cascade;
pub mod collection;
pub mod dashboard;
pub mod database;
pub mod plan;
pub mod records;

pub use adapter::{DocumentAdapter, CREATED_AT_FIELD, UPDATED_AT_FIELD};
pub use cascade::{CascadePolicy, CascadeRule};
pub use collection::CollectionEngine;
pub use dashboard::Dashboard;
pub use database::{Database, DurabilityMode, TrackerConfig, CONFIG_FILE_NAME};
pub use plan::{PlanTier, QuotaGate, QuotaRule, PLAN_COLLECTION, PLAN_FIELD};
pub use records::{
    Project, ProjectUpdate, Record, RecordPatch, Stored, TestStatus, Testcase, TestcaseUpdate,
    PROJECT_COLLECTION, TESTCASE_COLLECTION,
};
