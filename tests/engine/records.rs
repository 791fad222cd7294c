//! Record Lifecycle Tests
//!
//! Create, read, partial update and validation of projects and testcases.

use crate::common::*;
use qatrack_core::Error;

fn oid(id: &str) -> ObjectId {
    ObjectId::parse_str(id).unwrap()
}

#[test]
fn create_stamps_timestamps() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db);

    let p = projects.create(&Project::new("p")).unwrap();
    let created = p.created_at.clone().expect("created_at");
    assert_eq!(p.created_at, p.updated_at);
    assert!(chrono_like(&created), "{}", created);
}

fn chrono_like(s: &str) -> bool {
    s.len() >= 20 && s.contains('T')
}

#[test]
fn update_refreshes_updated_at_only() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db);
    let p = projects.create(&Project::new("p")).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let updated = projects
        .update(
            &oid(&p.id),
            &ProjectUpdate {
                name: Some("renamed".into()),
                description: None,
            },
        )
        .unwrap();

    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.created_at, p.created_at);
    assert_ne!(updated.updated_at, p.updated_at);
}

#[test]
fn update_leaves_absent_fields() {
    let db = ephemeral();
    let testcases = CollectionEngine::<Testcase>::new(&db);
    let t = testcases
        .create(&Testcase::new("p", "login").with_description("happy path"))
        .unwrap();

    let updated = testcases
        .update(&oid(&t.id), &TestcaseUpdate::status(TestStatus::Fail))
        .unwrap();

    assert_eq!(updated.name, "login");
    assert_eq!(updated.description.as_deref(), Some("happy path"));
    assert_eq!(updated.status, TestStatus::Fail);
}

#[test]
fn explicit_null_clears_description() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db);
    let p = projects
        .create(&Project::new("p").with_description("old"))
        .unwrap();

    let update: ProjectUpdate = serde_json::from_str(r#"{"description": null}"#).unwrap();
    let updated = projects.update(&oid(&p.id), &update).unwrap();
    assert_eq!(updated.description, None);
}

#[test]
fn empty_update_is_no_changes() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db);

    // Checked before existence
    let err = projects
        .update(&ObjectId::new(), &ProjectUpdate::default())
        .unwrap_err();
    assert!(matches!(err, Error::NoChanges { .. }));
}

#[test]
fn update_of_missing_record_is_not_found() {
    let db = ephemeral();
    let testcases = CollectionEngine::<Testcase>::new(&db);

    let err = testcases
        .update(&ObjectId::new(), &TestcaseUpdate::status(TestStatus::Pass))
        .unwrap_err();
    assert_eq!(err.to_string(), "Testcase not found");
}

#[test]
fn blank_names_rejected() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db);
    let testcases = CollectionEngine::<Testcase>::new(&db);

    assert!(matches!(
        projects.create(&Project::new("   ")).unwrap_err(),
        Error::InvalidInput { .. }
    ));
    assert!(testcases.create(&Testcase::new("p", "")).is_err());
    assert_eq!(projects.count(&Filter::all()).unwrap(), 0);
}

#[test]
fn list_filters_by_project() {
    let db = ephemeral();
    let testcases = CollectionEngine::<Testcase>::new(&db);
    seed_testcase(&testcases, "p1", "a", TestStatus::Pass);
    seed_testcase(&testcases, "p2", "b", TestStatus::Pass);
    seed_testcase(&testcases, "p1", "c", TestStatus::Pass);

    let names: Vec<String> = testcases
        .list(&Filter::eq("project_id", "p1"), None)
        .unwrap()
        .into_iter()
        .map(|t| t.record.name)
        .collect();
    assert_eq!(names, vec!["a", "c"]);

    assert!(testcases
        .list(&Filter::eq("project_id", "nope"), None)
        .unwrap()
        .is_empty());
}
