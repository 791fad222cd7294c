//! # qatrack Executor
//!
//! The public API for qatrack, a project and testcase record service.
//!
//! This is the only crate users need to import. It provides:
//! - [`Tracker`] - Typed methods for every operation
//! - [`Command`]/[`Output`] - Low-level command interface (for front ends)
//! - [`Error`] - Failures with an HTTP-style status class
//!
//! ## Quick Start
//!
//! ```text
//! use qatrack_executor::{Tracker, Project, Testcase};
//!
//! let tracker = Tracker::open("/path/to/data")?;
//!
//! let project = tracker.create_project(Project::new("Checkout"))?;
//! tracker.create_testcase(&project.id, Testcase::new(&project.id, "pay by card"))?;
//!
//! for tc in tracker.list_testcases(&project.id)? {
//!     println!("{} {}", tc.id, tc.status);
//! }
//! ```
//!
//! ## Plans
//!
//! A single plan record gates project creation. On `free` only
//! `free_project_limit` projects may exist; `pro` is unlimited.

#![warn(missing_docs)]

mod api;
pub(crate) mod bridge;
mod command;
mod convert;
mod error;
mod executor;
mod output;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::Tracker;
pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use types::*;

// Re-export Value from qatrack_core so users don't need to import it
pub use qatrack_core::Value;

// Re-export record and configuration types so users don't need qatrack-engine directly
pub use qatrack_engine::{
    Dashboard, DurabilityMode, PlanTier, Project, ProjectUpdate, Stored, TestStatus, Testcase,
    TestcaseUpdate, TrackerConfig,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
