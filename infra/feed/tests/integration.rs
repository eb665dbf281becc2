use ihub_feed::{ChangeFeed, FeedError, FeedReceiverExt};

#[derive(Clone, Debug, PartialEq, Eq)]
struct TestChange(pub usize);

#[tokio::test]
async fn change_flow() {
    let feed = ChangeFeed::new();
    let mut rx = feed.observe::<TestChange>().unwrap();

    feed.emit(TestChange(42)).unwrap();

    let received = rx.next_change().await.unwrap();
    assert_eq!(*received, TestChange(42));
}

#[tokio::test]
async fn emit_without_observers_is_dropped() {
    let feed = ChangeFeed::new();
    let reached = feed.emit(TestChange(1)).unwrap();
    assert_eq!(reached, 0);
}

#[tokio::test]
async fn observer_lag_recovery() {
    let feed = ChangeFeed::new();
    let capacity = 2;
    let mut rx = feed.observe_with_capacity::<TestChange>(capacity).unwrap();

    let total = 100;
    for i in 0..total {
        feed.emit(TestChange(i)).unwrap();
    }

    let first = rx.next_change().await.expect("feed should still be open");
    assert!(
        first.0 >= total - capacity,
        "observer should skip to the fresh tail of the buffer, got {}",
        first.0
    );

    let second = rx.next_change().await.expect("should continue receiving");
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn multiple_observers_fan_out() {
    let feed = ChangeFeed::new();
    let mut rx1 = feed.observe::<TestChange>().unwrap();
    let mut rx2 = feed.observe::<TestChange>().unwrap();

    feed.emit(TestChange(100)).unwrap();

    assert_eq!(rx1.next_change().await.unwrap().0, 100);
    assert_eq!(rx2.next_change().await.unwrap().0, 100);
}

#[tokio::test]
async fn change_types_are_isolated() {
    #[derive(Clone, Debug, PartialEq, Eq)]
    struct OtherChange(pub usize);

    let feed = ChangeFeed::new();
    let mut rx_test = feed.observe::<TestChange>().unwrap();
    let mut rx_other = feed.observe::<OtherChange>().unwrap();

    feed.emit(TestChange(7)).unwrap();
    feed.emit(OtherChange(13)).unwrap();

    assert_eq!(rx_test.next_change().await.unwrap().0, 7);
    assert_eq!(rx_other.next_change().await.unwrap().0, 13);
}

#[tokio::test]
async fn queue_buffers_until_trigger_attaches() {
    let feed = ChangeFeed::new();

    // Writes land before the worker exists; they wait in the queue.
    feed.enqueue(TestChange(1)).unwrap();
    feed.enqueue(TestChange(2)).unwrap();

    let mut rx = feed.attach_trigger::<TestChange>(128).unwrap();
    assert_eq!(rx.next_change().await.unwrap().0, 1);
    assert_eq!(rx.next_change().await.unwrap().0, 2);
}

#[tokio::test]
async fn trigger_can_only_attach_once() {
    let feed = ChangeFeed::new();
    let _rx = feed.attach_trigger::<TestChange>(8).unwrap();

    let err = feed.attach_trigger::<TestChange>(8).unwrap_err();
    assert!(matches!(err, FeedError::TriggerTaken { .. }));
}

#[tokio::test]
async fn queue_full_is_reported() {
    let feed = ChangeFeed::new();
    let _rx = feed.attach_trigger::<TestChange>(1).unwrap();

    feed.enqueue(TestChange(1)).unwrap();
    let err = feed.enqueue(TestChange(2)).unwrap_err();
    assert!(matches!(err, FeedError::QueueFull { .. }));
}

#[tokio::test]
async fn kind_mismatch_is_rejected() {
    let feed = ChangeFeed::new();
    let _rx = feed.observe::<TestChange>().unwrap();

    let err = feed.enqueue(TestChange(1)).unwrap_err();
    assert!(matches!(err, FeedError::KindMismatch { .. }));
}

#[tokio::test]
async fn zero_capacity_is_rejected() {
    let feed = ChangeFeed::new();
    let err = feed.observe_with_capacity::<TestChange>(0).unwrap_err();
    assert!(matches!(err, FeedError::InvalidCapacity { .. }));
}

#[tokio::test]
async fn shutdown_closes_all_channels() {
    let feed = ChangeFeed::new();
    let mut rx = feed.observe::<TestChange>().unwrap();

    let closed = feed.shutdown();
    assert_eq!(closed, 1, "expected a single change channel to be closed");

    assert!(rx.next_change().await.is_none(), "observer should see feed closure");
}
