use futures::executor::block_on;
use lazyseq::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::thread;

#[tokio::test]
async fn test_once_first_drive_yields_elements() {
    let s = once(seq![1, 2, 3]);
    assert_eq!(collect(&s).await, vec![1, 2, 3]);
}

#[test]
#[should_panic(expected = "sequence can only be iterated once")]
fn test_once_second_drive_panics() {
    let s = once(seq![1, 2, 3]);
    assert_eq!(block_on(collect(&s)), vec![1, 2, 3]);
    let _ = block_on(collect(&s));
}

#[test]
fn test_once_clones_share_the_guard() {
    let s = once(seq![1]);
    let copy = s.clone();
    let _first = s.stream();
    let second = catch_unwind(AssertUnwindSafe(|| copy.stream()));
    assert!(second.is_err());
}

#[test]
fn test_once_guards_are_independent() {
    let a = once(seq![1]);
    let b = once(seq![2]);
    assert_eq!(block_on(collect(&a)), vec![1]);
    assert_eq!(block_on(collect(&b)), vec![2]);
}

#[test]
fn test_once_concurrent_drives_exactly_one_succeeds() {
    let s = once(seq![1, 2, 3]);
    let attempts = 8;
    let barrier = Arc::new(Barrier::new(attempts));

    let handles: Vec<_> = (0..attempts)
        .map(|_| {
            let s = s.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                catch_unwind(AssertUnwindSafe(|| block_on(collect(&s)))).ok()
            })
        })
        .collect();

    let successes: Vec<Vec<i32>> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(successes, vec![vec![1, 2, 3]]);
}

#[tokio::test]
async fn test_once_inside_pipeline() {
    let s = map(once(seq![1, 2]), |x| x * 2);
    assert_eq!(collect(&s).await, vec![2, 4]);
    let again = catch_unwind(AssertUnwindSafe(|| s.stream()));
    assert!(again.is_err());
}

#[tokio::test]
async fn test_cycle_over_once_panics_on_second_pass() {
    let s = take(cycle(once(seq![1, 2])), 3);
    let result = tokio::spawn(async move { collect(&s).await }).await;
    assert!(result.unwrap_err().is_panic());
}
