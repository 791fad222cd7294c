//! Aggregate counts across projects and testcases

use qatrack_core::{Filter, Result};
use serde::{Deserialize, Serialize};

use crate::adapter::DocumentAdapter;
use crate::records::{TestStatus, PROJECT_COLLECTION, TESTCASE_COLLECTION};

/// Totals and pass/fail rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Number of projects
    pub total_projects: u64,
    /// Number of testcases
    pub total_testcases: u64,
    /// Testcases with status Pass
    pub pass_count: u64,
    /// Testcases with status Fail
    pub fail_count: u64,
    /// Testcases with status Pending
    pub pending_count: u64,
    /// Percentage of testcases passing, one decimal place
    pub pass_rate: f64,
    /// Percentage of testcases failing, one decimal place
    pub fail_rate: f64,
}

impl Dashboard {
    /// Count everything now
    ///
    /// The counts are separate reads and may straddle concurrent writes.
    pub fn compute(adapter: &DocumentAdapter) -> Result<Self> {
        let status_count = |status: TestStatus| {
            adapter.count(TESTCASE_COLLECTION, &Filter::eq("status", status.as_str()))
        };

        let total_projects = adapter.count(PROJECT_COLLECTION, &Filter::all())?;
        let total_testcases = adapter.count(TESTCASE_COLLECTION, &Filter::all())?;
        let pass_count = status_count(TestStatus::Pass)?;
        let fail_count = status_count(TestStatus::Fail)?;
        let pending_count = status_count(TestStatus::Pending)?;

        Ok(Self {
            total_projects,
            total_testcases,
            pass_count,
            fail_count,
            pending_count,
            pass_rate: rate(pass_count, total_testcases),
            fail_rate: rate(fail_count, total_testcases),
        })
    }
}

/// `part / total` as a percentage rounded to one decimal; 0 when total is 0
///
/// Exact halves round to even (6.25 gives 6.2).
pub fn rate(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = part as f64 / total as f64 * 100.0;
    (pct * 10.0).round_ties_even() / 10.0
}
