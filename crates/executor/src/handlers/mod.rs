//! Command handlers organized by category.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `database` | Ping, Info, Flush |
//! | `plan` | PlanGet, PlanUpgrade |
//! | `project` | ProjectList, ProjectCreate, ProjectUpdate, ProjectDelete |
//! | `testcase` | TestcaseList, TestcaseCreate, TestcaseUpdate, TestcaseDelete |
//! | `dashboard` | Dashboard |

pub mod dashboard;
pub mod database;
pub mod plan;
pub mod project;
pub mod testcase;
