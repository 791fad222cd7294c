//! Concurrency Tests
//!
//! Parallel writers must not break the plan singleton or the project quota.

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_plan_reads_create_one_record() {
    let db = ephemeral();
    let n = 16;
    let barrier = Arc::new(Barrier::new(n));

    let handles: Vec<_> = (0..n)
        .map(|_| {
            let db = db.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                QuotaGate::new(&db).current().unwrap()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), PlanTier::Free);
    }
    let adapter = DocumentAdapter::new(db);
    assert_eq!(adapter.count("plan", &Filter::all()).unwrap(), 1);
}

#[test]
fn concurrent_creates_respect_free_limit() {
    let db = ephemeral();
    let n = 16;
    let barrier = Arc::new(Barrier::new(n));

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let db = db.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                let projects = CollectionEngine::<Project>::new(&db);
                let gate = QuotaGate::new(&db);
                barrier.wait();
                gate.create(&projects, &Project::new(format!("p{}", i))).is_ok()
            })
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(admitted, 1);
    assert_eq!(
        CollectionEngine::<Project>::new(&db)
            .count(&Filter::all())
            .unwrap(),
        1
    );
}

#[test]
fn concurrent_testcase_writers_all_land() {
    let db = ephemeral();
    let threads = 8;
    let per_thread = 50;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let db = db.clone();
            thread::spawn(move || {
                let testcases = CollectionEngine::<Testcase>::new(&db);
                for i in 0..per_thread {
                    testcases
                        .create(&Testcase::new("p", format!("t{}-{}", t, i)))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let dash = Dashboard::compute(&DocumentAdapter::new(db)).unwrap();
    assert_eq!(dash.total_testcases, (threads * per_thread) as u64);
    assert_eq!(dash.pending_count, dash.total_testcases);
}

#[test]
fn concurrent_writers_under_always_durability() {
    let test_db = TestDb::always();
    let threads = 8;
    let per_thread = 10;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let db = test_db.db.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                let testcases = CollectionEngine::<Testcase>::new(&db);
                barrier.wait();
                (0..per_thread)
                    .map(|i| testcases.create(&Testcase::new("p", format!("t{}-{}", t, i))))
                    .filter(|r| r.is_err())
                    .count()
            })
        })
        .collect();

    let failures: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(failures, 0);
    assert!(!test_db.db.is_dirty());

    let text = std::fs::read_to_string(test_db.snapshot_path()).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&text).unwrap();
    let on_disk = snapshot["collections"]["testcase"].as_array().unwrap().len();
    assert_eq!(on_disk, threads * per_thread);
    assert_eq!(test_db.testcases().count(&Filter::all()).unwrap(), on_disk as u64);
}
