//! Plan Quota Tests
//!
//! The plan singleton and project admission under free and pro.

use crate::common::*;
use qatrack_core::Error;

#[test]
fn plan_created_lazily_as_free() {
    let db = ephemeral();
    let adapter = DocumentAdapter::new(db.clone());
    let gate = QuotaGate::new(&db);

    assert_eq!(adapter.count("plan", &Filter::all()).unwrap(), 0);
    assert_eq!(gate.current().unwrap(), PlanTier::Free);
    assert_eq!(gate.current().unwrap(), PlanTier::Free);
    assert_eq!(adapter.count("plan", &Filter::all()).unwrap(), 1);
}

#[test]
fn peek_does_not_create_plan() {
    let db = ephemeral();
    let adapter = DocumentAdapter::new(db.clone());

    assert_eq!(QuotaGate::new(&db).peek().unwrap(), PlanTier::Free);
    assert_eq!(adapter.count("plan", &Filter::all()).unwrap(), 0);
}

#[test]
fn free_plan_admits_one_project() {
    let db = ephemeral();
    let gate = QuotaGate::new(&db);
    let projects = CollectionEngine::<Project>::new(&db);

    gate.create(&projects, &Project::new("first")).unwrap();
    let err = gate.create(&projects, &Project::new("second")).unwrap_err();

    match err {
        Error::QuotaExceeded { plan, limit, message } => {
            assert_eq!(plan, "free");
            assert_eq!(limit, 1);
            assert_eq!(
                message,
                "Free plan allows only 1 project. Upgrade to Pro for unlimited projects."
            );
        }
        other => panic!("expected QuotaExceeded, got {:?}", other),
    }
    assert_eq!(projects.count(&Filter::all()).unwrap(), 1);
}

#[test]
fn deleting_frees_a_slot() {
    let db = ephemeral();
    let gate = QuotaGate::new(&db);
    let projects = CollectionEngine::<Project>::new(&db);

    let p = gate.create(&projects, &Project::new("first")).unwrap();
    projects.delete(&ObjectId::parse_str(&p.id).unwrap()).unwrap();

    assert!(gate.create(&projects, &Project::new("second")).is_ok());
}

#[test]
fn pro_plan_is_unlimited() {
    let db = ephemeral();
    let gate = QuotaGate::new(&db);
    let projects = CollectionEngine::<Project>::new(&db);

    assert_eq!(gate.upgrade().unwrap(), PlanTier::Pro);
    assert_eq!(gate.upgrade().unwrap(), PlanTier::Pro);
    for i in 0..10 {
        gate.create(&projects, &Project::new(format!("p{}", i))).unwrap();
    }
    assert_eq!(projects.count(&Filter::all()).unwrap(), 10);
    assert_eq!(gate.current().unwrap(), PlanTier::Pro);
}

#[test]
fn configured_limit_applies() {
    let db = Database::ephemeral_with_config(TrackerConfig {
        free_project_limit: 3,
        ..TrackerConfig::default()
    })
    .unwrap();
    let gate = QuotaGate::new(&db);
    let projects = CollectionEngine::<Project>::new(&db);

    for i in 0..3 {
        gate.create(&projects, &Project::new(format!("p{}", i))).unwrap();
    }
    let err = gate.create(&projects, &Project::new("p3")).unwrap_err();
    assert!(err.to_string().contains("3 projects"), "{}", err);
}

#[test]
fn testcases_are_not_limited() {
    let db = ephemeral();
    let testcases = CollectionEngine::<Testcase>::new(&db);
    let gate = QuotaGate::new(&db);

    for i in 0..5 {
        gate.create(&testcases, &Testcase::new("p", format!("t{}", i)))
            .unwrap();
    }
    assert_eq!(gate.limit_for(PlanTier::Free, "testcase"), None);
    assert_eq!(gate.limit_for(PlanTier::Free, "project"), Some(1));
}

#[test]
fn upgrade_persists_across_reopen() {
    let mut test_db = TestDb::new();
    test_db.quota().upgrade().unwrap();
    test_db.reopen();
    assert_eq!(test_db.quota().current().unwrap(), PlanTier::Pro);
}
