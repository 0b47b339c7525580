//! Integration tests for the running-query descriptor.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use grid_query::{QueryCancel, RunningQueryInfo};

fn counting_hook() -> (Arc<AtomicUsize>, QueryCancel) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let cancel = QueryCancel::new(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (calls, cancel)
}

#[test]
fn long_query_threshold() {
    let info = RunningQueryInfo::new(1, "SELECT * FROM Person", "person", 1000, None);

    // Elapsed must strictly exceed the duration.
    assert!(info.long_query(5000, 3000));
    assert!(!info.long_query(4000, 3000));
    assert!(!info.long_query(3500, 3000));
    assert!(!info.long_query(1000, 0));
    assert!(info.long_query(1001, 0));
}

#[test]
fn long_query_saturates_on_extreme_clocks() {
    let info = RunningQueryInfo::new(2, "q", "c", i64::MIN, None);
    assert!(info.long_query(i64::MAX, i64::MAX - 1));

    let future = RunningQueryInfo::new(3, "q", "c", i64::MAX, None);
    assert!(!future.long_query(i64::MIN, 0));
}

#[test]
fn cancel_runs_the_hook_once() {
    let (calls, hook) = counting_hook();
    let info = RunningQueryInfo::new(4, "SELECT 1", "orders", 0, Some(hook));
    assert!(!info.is_cancelled());

    info.cancel();
    info.cancel();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(info.is_cancelled());
}

#[test]
fn cancel_from_many_threads() {
    let (calls, hook) = counting_hook();
    let info = Arc::new(RunningQueryInfo::new(5, "q", "c", 0, Some(hook)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let info = Arc::clone(&info);
            thread::spawn(move || info.cancel())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn descriptor_without_hook() {
    let info = RunningQueryInfo::new(6, "q", "c", 10, None);
    info.cancel();
    assert!(!info.is_cancelled());
    assert_eq!(info.id(), 6);
    assert_eq!(info.start_time(), 10);
}
