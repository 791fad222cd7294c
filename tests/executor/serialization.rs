//! Serialization Tests
//!
//! The JSON shapes clients see: command payloads, response bodies, errors.

use crate::common::*;
use qatrack::{Command, Error, Output, Project, ProjectUpdate, TestStatus, TestcaseUpdate};
use serde_json::json;

#[test]
fn command_json_shape() {
    let cmd: Command = serde_json::from_value(json!({
        "ProjectCreate": { "project": { "name": "Checkout", "description": "payments" } }
    }))
    .unwrap();
    assert_eq!(
        cmd,
        Command::ProjectCreate {
            project: Project::new("Checkout").with_description("payments"),
        }
    );

    let unit: Command = serde_json::from_value(json!("Dashboard")).unwrap();
    assert_eq!(unit, Command::Dashboard);
}

#[test]
fn unknown_command_fields_rejected() {
    let result: Result<Command, _> = serde_json::from_value(json!({
        "ProjectDelete": { "id": "x", "cascade": false }
    }));
    assert!(result.is_err());
}

#[test]
fn testcase_status_defaults_to_pending() {
    let cmd: Command = serde_json::from_value(json!({
        "TestcaseCreate": {
            "project_id": "p",
            "testcase": { "project_id": "p", "name": "login" }
        }
    }))
    .unwrap();
    match cmd {
        Command::TestcaseCreate { testcase, .. } => {
            assert_eq!(testcase.status, TestStatus::Pending);
            assert_eq!(testcase.description, None);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn invalid_status_rejected() {
    let result: Result<TestcaseUpdate, _> = serde_json::from_value(json!({ "status": "Done" }));
    assert!(result.is_err());
}

#[test]
fn update_distinguishes_null_from_absent() {
    let absent: ProjectUpdate = serde_json::from_value(json!({ "name": "n" })).unwrap();
    assert_eq!(absent.description, None);

    let null: ProjectUpdate = serde_json::from_value(json!({ "description": null })).unwrap();
    assert_eq!(null.description, Some(None));
}

#[test]
fn stored_record_body_is_flat() {
    let executor = create_executor();
    let p = create_project(&executor, "Checkout");
    let t = create_testcase(&executor, &p.id, "login");

    let body = Output::Testcase(t.clone()).into_body().unwrap();
    assert_eq!(body["id"], json!(t.id));
    assert_eq!(body["project_id"], json!(p.id));
    assert_eq!(body["name"], json!("login"));
    assert_eq!(body["status"], json!("Pending"));
    assert!(body["created_at"].is_string());
    assert!(body.get("_id").is_none());
    assert!(body.get("record").is_none());
}

#[test]
fn pong_body() {
    let body = Output::Pong {
        version: "1.2.3".into(),
    }
    .into_body()
    .unwrap();
    assert_eq!(
        body,
        json!({ "message": "qatrack is running", "version": "1.2.3" })
    );
}

#[test]
fn plan_and_delete_bodies() {
    let executor = create_executor();
    let plan = executor.execute(Command::PlanGet).unwrap().into_body().unwrap();
    assert_eq!(plan, json!({ "plan": "free" }));

    let p = create_project(&executor, "p");
    let deleted = executor
        .execute(Command::ProjectDelete { id: p.id })
        .unwrap()
        .into_body()
        .unwrap();
    assert_eq!(deleted, json!({ "status": "deleted" }));
}

#[test]
fn dashboard_body_keys() {
    let executor = create_executor();
    let body = executor
        .execute(Command::Dashboard)
        .unwrap()
        .into_body()
        .unwrap();
    for key in [
        "total_projects",
        "total_testcases",
        "pass_count",
        "fail_count",
        "pending_count",
        "pass_rate",
        "fail_rate",
    ] {
        assert!(body.get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn errors_serialize_with_variant_tag() {
    let err = Error::NotFound {
        entity: "Project".into(),
        id: "abc".into(),
    };
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value, json!({ "NotFound": { "entity": "Project", "id": "abc" } }));
    let back: Error = serde_json::from_value(value).unwrap();
    assert_eq!(back, err);
}
