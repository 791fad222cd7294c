//! Error Handling Tests
//!
//! Error conditions in the executor layer and their status classes.

use crate::common::*;
use qatrack::{Command, Error, Project, ProjectUpdate, Testcase, TestcaseUpdate, TestStatus};

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn malformed_project_id_is_bad_request() {
    let executor = create_executor();

    for cmd in [
        Command::ProjectDelete { id: "xyz".into() },
        Command::ProjectUpdate {
            id: "xyz".into(),
            update: ProjectUpdate {
                name: Some("n".into()),
                description: None,
            },
        },
    ] {
        let err = executor.execute(cmd).unwrap_err();
        assert_eq!(err.to_string(), "Invalid project id");
        assert_eq!(err.status_code(), 400);
    }
}

#[test]
fn malformed_testcase_id_is_bad_request() {
    let executor = create_executor();

    for bad in ["", "65a1f0c2e4b0a1b2c3d4e5f", "zz a1f0c2e4b0a1b2c3d4e5f6", "65a1f0c2"] {
        for cmd in [
            Command::TestcaseDelete { id: bad.into() },
            Command::TestcaseUpdate {
                id: bad.into(),
                update: TestcaseUpdate {
                    status: Some(TestStatus::Pass),
                    ..TestcaseUpdate::default()
                },
            },
        ] {
            let err = executor.execute(cmd).unwrap_err();
            assert!(matches!(err, Error::InvalidId { .. }), "input {:?}", bad);
            assert_eq!(err.to_string(), "Invalid testcase id");
            assert_eq!(err.status_code(), 400);
        }
    }
}

// ============================================================================
// Not found
// ============================================================================

#[test]
fn missing_records_are_404() {
    let executor = create_executor();
    let ghost = "65a1f0c2e4b0a1b2c3d4e5f6".to_string();

    let err = executor
        .execute(Command::ProjectDelete { id: ghost.clone() })
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "Project not found");

    let err = executor
        .execute(Command::TestcaseUpdate {
            id: ghost,
            update: TestcaseUpdate::status(TestStatus::Fail),
        })
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "Testcase not found");
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn empty_update_is_no_changes() {
    let executor = create_executor();
    let p = create_project(&executor, "p");

    let err = executor
        .execute(Command::ProjectUpdate {
            id: p.id,
            update: ProjectUpdate::default(),
        })
        .unwrap_err();
    assert!(matches!(err, Error::NoChanges));
    assert_eq!(err.to_string(), "No changes provided");
    assert_eq!(err.status_code(), 400);
}

#[test]
fn project_id_mismatch_rejected() {
    let executor = create_executor();
    let err = executor
        .execute(Command::TestcaseCreate {
            project_id: "a".into(),
            testcase: Testcase::new("b", "t"),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Project id mismatch");
    assert_eq!(err.status_code(), 400);
}

#[test]
fn blank_name_rejected() {
    let executor = create_executor();
    let err = executor
        .execute(Command::ProjectCreate {
            project: Project::new(""),
        })
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

// ============================================================================
// Quota
// ============================================================================

#[test]
fn second_free_project_is_payment_required() {
    let executor = create_executor();
    create_project(&executor, "first");

    let err = executor
        .execute(Command::ProjectCreate {
            project: Project::new("second"),
        })
        .unwrap_err();
    assert_eq!(err.status_code(), 402);
    assert_eq!(
        err.to_string(),
        "Free plan allows only 1 project. Upgrade to Pro for unlimited projects."
    );
    assert!(err.is_client_error());
}

#[test]
fn upgrade_lifts_quota() {
    let executor = create_executor();
    create_project(&executor, "first");
    executor.execute(Command::PlanUpgrade).unwrap();
    create_project(&executor, "second");
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn writes_after_shutdown_are_server_errors() {
    let tracker = create_tracker();
    tracker.shutdown().unwrap();

    let err = tracker.create_project(Project::new("late")).unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(!err.is_client_error());
}
