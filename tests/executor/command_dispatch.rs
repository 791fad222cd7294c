//! Command Dispatch Tests
//!
//! Every command reaches its handler and returns the expected Output variant.

use crate::common::*;
use qatrack::{
    Command, DeleteStatus, Output, PlanInfo, PlanTier, ProjectUpdate, TestStatus, TestcaseUpdate,
};

// ============================================================================
// Database
// ============================================================================

#[test]
fn ping_returns_version() {
    let executor = create_executor();
    match executor.execute(Command::Ping).unwrap() {
        Output::Pong { version } => assert_eq!(version, env!("CARGO_PKG_VERSION")),
        other => panic!("Expected Pong, got {:?}", other),
    }
}

#[test]
fn info_reports_database_and_creates_plan() {
    let executor = create_executor();
    match executor.execute(Command::Info).unwrap() {
        Output::DatabaseInfo(info) => {
            assert_eq!(info.database_name, "appdb");
            assert_eq!(info.connection_status, "ok");
            assert!(!info.persistent);
            assert_eq!(info.plan, PlanTier::Free);
            assert_eq!(info.collections, vec!["plan".to_string()]);
        }
        other => panic!("Expected DatabaseInfo, got {:?}", other),
    }
}

#[test]
fn flush_returns_unit() {
    let executor = create_executor();
    assert_eq!(executor.execute(Command::Flush).unwrap(), Output::Unit);
}

// ============================================================================
// Plan
// ============================================================================

#[test]
fn plan_get_then_upgrade() {
    let executor = create_executor();
    assert_eq!(
        executor.execute(Command::PlanGet).unwrap(),
        Output::Plan(PlanInfo {
            plan: PlanTier::Free
        })
    );
    assert_eq!(
        executor.execute(Command::PlanUpgrade).unwrap(),
        Output::Plan(PlanInfo { plan: PlanTier::Pro })
    );
    assert_eq!(
        executor.execute(Command::PlanGet).unwrap(),
        Output::Plan(PlanInfo { plan: PlanTier::Pro })
    );
}

// ============================================================================
// Project
// ============================================================================

#[test]
fn project_crud_round() {
    let executor = create_executor();
    let p = create_project(&executor, "Checkout");

    match executor.execute(Command::ProjectList).unwrap() {
        Output::Projects(ps) => assert_eq!(ps, vec![p.clone()]),
        other => panic!("Expected Projects, got {:?}", other),
    }

    match executor
        .execute(Command::ProjectUpdate {
            id: p.id.clone(),
            update: ProjectUpdate {
                name: None,
                description: Some(Some("payments".into())),
            },
        })
        .unwrap()
    {
        Output::Project(updated) => {
            assert_eq!(updated.id, p.id);
            assert_eq!(updated.description.as_deref(), Some("payments"));
        }
        other => panic!("Expected Project, got {:?}", other),
    }

    assert_eq!(
        executor
            .execute(Command::ProjectDelete { id: p.id.clone() })
            .unwrap(),
        Output::Deleted(DeleteStatus::deleted())
    );
    assert_eq!(
        executor.execute(Command::ProjectList).unwrap(),
        Output::Projects(vec![])
    );
}

// ============================================================================
// Testcase
// ============================================================================

#[test]
fn testcase_crud_round() {
    let executor = create_executor();
    let p = create_project(&executor, "p");
    let t = create_testcase(&executor, &p.id, "login");
    assert_eq!(t.status, TestStatus::Pending);
    assert_eq!(t.project_id, p.id);

    let listed = extract_testcases(
        executor
            .execute(Command::TestcaseList {
                project_id: p.id.clone(),
            })
            .unwrap(),
    );
    assert_eq!(listed, vec![t.clone()]);

    match executor
        .execute(Command::TestcaseUpdate {
            id: t.id.clone(),
            update: TestcaseUpdate::status(TestStatus::Pass),
        })
        .unwrap()
    {
        Output::Testcase(updated) => assert_eq!(updated.status, TestStatus::Pass),
        other => panic!("Expected Testcase, got {:?}", other),
    }

    executor
        .execute(Command::TestcaseDelete { id: t.id.clone() })
        .unwrap();
    assert!(extract_testcases(
        executor
            .execute(Command::TestcaseList { project_id: p.id })
            .unwrap()
    )
    .is_empty());
}

#[test]
fn testcase_list_of_unknown_project_is_empty() {
    let executor = create_executor();
    let listed = extract_testcases(
        executor
            .execute(Command::TestcaseList {
                project_id: "not-even-an-id".into(),
            })
            .unwrap(),
    );
    assert!(listed.is_empty());
}

#[test]
fn project_delete_cascades_through_executor() {
    let executor = create_executor();
    let p = create_project(&executor, "p");
    create_testcase(&executor, &p.id, "a");
    create_testcase(&executor, &p.id, "b");

    executor
        .execute(Command::ProjectDelete { id: p.id.clone() })
        .unwrap();

    match executor.execute(Command::Dashboard).unwrap() {
        Output::Dashboard(d) => {
            assert_eq!(d.total_projects, 0);
            assert_eq!(d.total_testcases, 0);
        }
        other => panic!("Expected Dashboard, got {:?}", other),
    }
}

// ============================================================================
// Dashboard
// ============================================================================

#[test]
fn dashboard_reflects_statuses() {
    let executor = create_executor();
    let p = create_project(&executor, "p");
    for (name, status) in [
        ("a", TestStatus::Pass),
        ("b", TestStatus::Pass),
        ("c", TestStatus::Fail),
        ("d", TestStatus::Pending),
    ] {
        let t = create_testcase(&executor, &p.id, name);
        executor
            .execute(Command::TestcaseUpdate {
                id: t.id,
                update: TestcaseUpdate::status(status),
            })
            .unwrap();
    }

    match executor.execute(Command::Dashboard).unwrap() {
        Output::Dashboard(d) => {
            assert_eq!(d.total_testcases, 4);
            assert_eq!(d.pass_count, 2);
            assert_eq!(d.fail_count, 1);
            assert_eq!(d.pending_count, 1);
            assert_eq!(d.pass_rate, 50.0);
            assert_eq!(d.fail_rate, 25.0);
        }
        other => panic!("Expected Dashboard, got {:?}", other),
    }
}

#[test]
fn executors_share_database() {
    let db = create_db();
    let a = qatrack::Executor::new(db.clone());
    let b = qatrack::Executor::new(db);

    let p = create_project(&a, "shared");
    match b.execute(Command::ProjectList).unwrap() {
        Output::Projects(ps) => assert_eq!(ps[0].id, p.id),
        other => panic!("Expected Projects, got {:?}", other),
    }
}
