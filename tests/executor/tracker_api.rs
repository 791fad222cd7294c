//! Tracker API Tests
//!
//! The typed wrapper end to end, including persistence through reopen.

use crate::common::*;
use qatrack::{
    DurabilityMode, PlanTier, Project, ProjectUpdate, TestStatus, Testcase, TestcaseUpdate,
    Tracker, TrackerConfig,
};

#[test]
fn ping_and_info() {
    let tracker = create_tracker();
    assert!(!tracker.ping().unwrap().is_empty());

    let info = tracker.info().unwrap();
    assert_eq!(info.database_name, "appdb");
    assert!(!info.persistent);
}

#[test]
fn full_workflow() {
    let tracker = create_tracker();
    assert_eq!(tracker.plan().unwrap(), PlanTier::Free);

    let project = tracker
        .create_project(Project::new("Checkout").with_description("payments"))
        .unwrap();
    let card = tracker
        .create_testcase(&project.id, Testcase::new(&project.id, "pay by card"))
        .unwrap();
    tracker
        .create_testcase(
            &project.id,
            Testcase::new(&project.id, "pay by invoice").with_status(TestStatus::Fail),
        )
        .unwrap();

    tracker
        .update_testcase(&card.id, TestcaseUpdate::status(TestStatus::Pass))
        .unwrap();

    let dash = tracker.dashboard().unwrap();
    assert_eq!(dash.total_projects, 1);
    assert_eq!(dash.total_testcases, 2);
    assert_eq!(dash.pass_rate, 50.0);
    assert_eq!(dash.fail_rate, 50.0);

    let renamed = tracker
        .update_project(
            &project.id,
            ProjectUpdate {
                name: Some("Checkout v2".into()),
                description: None,
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Checkout v2");
    assert_eq!(renamed.description.as_deref(), Some("payments"));

    tracker.delete_project(&project.id).unwrap();
    assert!(tracker.list_projects().unwrap().is_empty());
    assert!(tracker.list_testcases(&project.id).unwrap().is_empty());
}

#[test]
fn quota_then_upgrade() {
    let tracker = create_tracker();
    tracker.create_project(Project::new("one")).unwrap();
    assert!(tracker.create_project(Project::new("two")).is_err());

    assert_eq!(tracker.upgrade().unwrap(), PlanTier::Pro);
    tracker.create_project(Project::new("two")).unwrap();
    assert_eq!(tracker.list_projects().unwrap().len(), 2);
}

#[test]
fn delete_testcase_leaves_project() {
    let tracker = create_tracker();
    let p = tracker.create_project(Project::new("p")).unwrap();
    let t = tracker
        .create_testcase(&p.id, Testcase::new(&p.id, "t"))
        .unwrap();

    tracker.delete_testcase(&t.id).unwrap();
    assert!(tracker.delete_testcase(&t.id).is_err());
    assert_eq!(tracker.list_projects().unwrap().len(), 1);
}

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let project_id = {
        let tracker = Tracker::open(dir.path()).unwrap();
        let p = tracker.create_project(Project::new("kept")).unwrap();
        tracker
            .create_testcase(&p.id, Testcase::new(&p.id, "t").with_status(TestStatus::Pass))
            .unwrap();
        tracker.upgrade().unwrap();
        tracker.shutdown().unwrap();
        p.id
    };

    let tracker = Tracker::open(dir.path()).unwrap();
    assert!(tracker.info().unwrap().persistent);
    assert_eq!(tracker.plan().unwrap(), PlanTier::Pro);
    assert_eq!(tracker.list_projects().unwrap()[0].id, project_id);
    assert_eq!(
        tracker.list_testcases(&project_id).unwrap()[0].status,
        TestStatus::Pass
    );
}

#[test]
fn drop_flushes_without_explicit_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    {
        let tracker = Tracker::open(dir.path()).unwrap();
        tracker.create_project(Project::new("kept")).unwrap();
    }

    let tracker = Tracker::open(dir.path()).unwrap();
    assert_eq!(tracker.list_projects().unwrap().len(), 1);
}

#[test]
fn open_with_config_applies_settings() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = TrackerConfig {
        database_name: "qa".into(),
        durability: "always".into(),
        free_project_limit: 2,
    };
    let tracker = Tracker::open_with_config(dir.path(), cfg).unwrap();
    let db = tracker.executor().database();
    assert_eq!(db.durability_mode(), DurabilityMode::Always);

    tracker.create_project(Project::new("a")).unwrap();
    tracker.create_project(Project::new("b")).unwrap();
    assert!(tracker.create_project(Project::new("c")).is_err());
    assert!(dir.path().join("qa.json").exists());
}

#[test]
fn clones_share_state() {
    let a = create_tracker();
    let b = a.clone();
    a.create_project(Project::new("p")).unwrap();
    assert_eq!(b.list_projects().unwrap().len(), 1);
}
