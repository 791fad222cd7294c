//! qatrack - embedded record service for QA projects and testcases
//!
//! Projects group testcases; each testcase carries a Pass/Fail/Pending
//! status. A single plan record (`free` or `pro`) limits how many projects
//! may exist, and a dashboard summarizes pass and fail rates.
//!
//! # Quick Start
//!
//! ```ignore
//! use qatrack::{Tracker, Project, Testcase, TestStatus};
//!
//! // Create an in-memory database
//! let tracker = Tracker::ephemeral()?;
//!
//! let project = tracker.create_project(Project::new("Checkout"))?;
//! tracker.create_testcase(
//!     &project.id,
//!     Testcase::new(&project.id, "pay by card").with_status(TestStatus::Pass),
//! )?;
//!
//! let dash = tracker.dashboard()?;
//! assert_eq!(dash.pass_rate, 100.0);
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`] which provides a command-based API.
//! The [`Tracker`] struct provides a convenient high-level interface.
//!
//! Internal implementation details (storage, engine) are not exposed - only
//! the executor API is public.

// Re-export the public API from qatrack-executor
pub use qatrack_executor::*;
