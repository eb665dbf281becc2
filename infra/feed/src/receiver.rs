use crate::feed::Change;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

/// An extension trait for change receivers to provide a more ergonomic API.
///
/// Broadcast observers recover from lag by skipping to the latest buffered
/// change instead of surfacing a lag error to the caller.
pub trait FeedReceiverExt<T> {
    /// Receive the next change, returning `None` when the feed is closed.
    fn next_change(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;
}

impl<T: Change> FeedReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn next_change(&mut self) -> Option<Arc<T>> {
        let mut skipped = 0u64;

        loop {
            match self.recv().await {
                Ok(change) => {
                    if skipped > 0 {
                        warn!(
                            change = std::any::type_name::<T>(),
                            skipped,
                            "Feed observer lagged; continuing from latest change"
                        );
                    }
                    return Some(change);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    skipped = skipped.saturating_add(n);
                    debug!(
                        change = std::any::type_name::<T>(),
                        skipped = n,
                        total_skipped = skipped,
                        "Feed observer lagged; accumulating skipped changes"
                    );
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl<T: Change> FeedReceiverExt<T> for mpsc::Receiver<Arc<T>> {
    async fn next_change(&mut self) -> Option<Arc<T>> {
        self.recv().await
    }
}
