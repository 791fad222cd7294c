//! Cascading Delete Tests
//!
//! Deleting a project removes the testcases that reference it.

use crate::common::*;
use qatrack_core::Error;
use qatrack_engine::CascadePolicy;

fn oid(id: &str) -> ObjectId {
    ObjectId::parse_str(id).unwrap()
}

#[test]
fn project_delete_removes_its_testcases_only() {
    let db = ephemeral_pro();
    let projects = CollectionEngine::<Project>::new(&db);
    let testcases = CollectionEngine::<Testcase>::new(&db);

    let a = projects.create(&Project::new("a")).unwrap();
    let b = projects.create(&Project::new("b")).unwrap();
    for i in 0..3 {
        seed_testcase(&testcases, &a.id, &format!("a{}", i), TestStatus::Pending);
    }
    seed_testcase(&testcases, &b.id, "b0", TestStatus::Pass);

    let removed = projects.delete(&oid(&a.id)).unwrap();
    assert_eq!(removed, 3);

    assert_eq!(projects.count(&Filter::all()).unwrap(), 1);
    let left = testcases.list(&Filter::all(), None).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].project_id, b.id);
}

#[test]
fn missing_project_is_not_found() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db);

    let err = projects.delete(&ObjectId::new()).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(err.to_string(), "Project not found");
}

#[test]
fn orphans_of_missing_project_are_still_removed() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db);
    let testcases = CollectionEngine::<Testcase>::new(&db);

    let ghost = ObjectId::new();
    seed_testcase(&testcases, &ghost.to_hex(), "orphan", TestStatus::Fail);

    assert!(projects.delete(&ghost).is_err());
    assert_eq!(testcases.count(&Filter::all()).unwrap(), 0);
}

#[test]
fn testcase_delete_does_not_cascade() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db);
    let testcases = CollectionEngine::<Testcase>::new(&db);

    let p = projects.create(&Project::new("p")).unwrap();
    let t = seed_testcase(&testcases, &p.id, "t", TestStatus::Pass);

    assert_eq!(testcases.delete(&oid(&t.id)).unwrap(), 0);
    assert_eq!(projects.count(&Filter::all()).unwrap(), 1);
}

#[test]
fn cascade_can_be_disabled() {
    let db = ephemeral();
    let projects = CollectionEngine::<Project>::new(&db).with_cascade(CascadePolicy::none());
    let testcases = CollectionEngine::<Testcase>::new(&db);

    let p = projects.create(&Project::new("p")).unwrap();
    seed_testcase(&testcases, &p.id, "t", TestStatus::Pass);

    assert_eq!(projects.delete(&oid(&p.id)).unwrap(), 0);
    assert_eq!(testcases.count(&Filter::all()).unwrap(), 1);
}

#[test]
fn cascade_persists_across_reopen() {
    let mut test_db = TestDb::new();
    {
        let projects = test_db.projects();
        let p = projects.create(&Project::new("p")).unwrap();
        seed_testcase(&test_db.testcases(), &p.id, "t", TestStatus::Pass);
        projects.delete(&oid(&p.id)).unwrap();
    }

    test_db.reopen();
    assert_eq!(test_db.testcases().count(&Filter::all()).unwrap(), 0);
}
