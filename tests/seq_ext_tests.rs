use lazyseq::*;
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_from_elements_and_collect() {
    let s = seq![1, 2, 3, 4];
    assert_eq!(s.collect().await, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_map() {
    let s = seq![1, 2, 3].map(|v| v * v);
    assert_eq!(s.collect().await, vec![1, 4, 9]);
}

#[tokio::test]
async fn test_map_to_other_type() {
    let s = seq!["a", "bb", "ccc"].map(|s| s.len());
    assert_eq!(s.collect().await, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_filter() {
    let s = seq![1, 2, 3, 4, 5].filter(|v| v % 2 == 0);
    assert_eq!(s.collect().await, vec![2, 4]);
}

#[tokio::test]
async fn test_take_and_limit() {
    assert_eq!(seq![10, 20, 30, 40].take(2).collect().await, vec![10, 20]);
    assert_eq!(count(0, 1).limit(3).collect().await, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_slice() {
    let s = seq![0, 1, 2, 3, 4, 5, 6].slice(1, 6, 2);
    assert_eq!(s.collect().await, vec![1, 3, 5]);
}

#[tokio::test]
async fn test_take_while() {
    let s = seq![1, 2, 3, 4, 1, 0].take_while(|&v| v < 4);
    assert_eq!(s.collect().await, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_drop_while() {
    let s = seq![0, 0, 1, 2, 0].drop_while(|&v| v == 0);
    assert_eq!(s.collect().await, vec![1, 2, 0]);
}

#[tokio::test]
async fn test_for_each() {
    let result = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&result);
    seq![1, 2, 3]
        .for_each(move |v| sink.lock().unwrap().push(v * 10))
        .await;
    assert_eq!(*result.lock().unwrap(), vec![10, 20, 30]);
}

#[tokio::test]
async fn test_from_channel() {
    let (tx, rx) = tokio::sync::mpsc::channel(3);
    tx.send(100).await.unwrap();
    tx.send(200).await.unwrap();
    tx.send(300).await.unwrap();
    drop(tx);

    assert_eq!(from_channel(rx).collect().await, vec![100, 200, 300]);
}

#[tokio::test]
async fn test_method_chain() {
    let s = count(1, 1)
        .filter(|v| v % 3 == 0)
        .map(|v| v * 2)
        .take(4);
    assert_eq!(s.collect().await, vec![6, 12, 18, 24]);
    // Building on a sequence leaves the original usable.
    assert_eq!(s.collect().await, vec![6, 12, 18, 24]);
}

#[tokio::test]
async fn test_cycle_chain_enumerate() {
    let s = seq![1, 2].chain(vec![seq![3]]).cycle().take(5).enumerate();
    assert_eq!(
        s.collect().await,
        vec![(0, 1), (1, 2), (2, 3), (3, 1), (4, 2)]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_zip_and_projections() {
    let pairs = seq!["a", "b", "c"].zip(&count(1, 1));
    assert_eq!(pairs.keys().collect().await, vec!["a", "b", "c"]);
    assert_eq!(pairs.values().collect().await, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_once_method() {
    let s = seq![7].once();
    assert_eq!(s.collect().await, vec![7]);
    let again = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| s.stream()));
    assert!(again.is_err());
}
