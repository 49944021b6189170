//! Continuous snapshot producer over a [`ChangeBus`](crate::ChangeBus).

use std::sync::Arc;

use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::bus::TableChange;

/// Yields the snapshot current at subscription time, then the snapshot
/// attached to every later change.
///
/// A subscriber that falls behind the channel capacity skips straight to
/// the oldest change still buffered; since every change carries the full
/// table, nothing but intermediate states is lost.
pub struct Subscription<T> {
    pending: Option<Arc<Vec<T>>>,
    receiver: broadcast::Receiver<TableChange<T>>,
}

impl<T: Clone> Subscription<T> {
    pub(crate) fn new(initial: Vec<T>, receiver: broadcast::Receiver<TableChange<T>>) -> Self {
        Self {
            pending: Some(Arc::new(initial)),
            receiver,
        }
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the publishing side has been dropped.
    pub async fn next(&mut self) -> Option<Arc<Vec<T>>> {
        if let Some(initial) = self.pending.take() {
            return Some(initial);
        }
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change.snapshot),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Snapshot subscriber lagged, skipping ahead");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Adapt into a [`Stream`] of snapshots.
    pub fn into_stream(self) -> impl Stream<Item = Arc<Vec<T>>>
    where
        T: Send + Sync + 'static,
    {
        futures::stream::unfold(self, |mut sub| async move {
            let snapshot = sub.next().await?;
            Some((snapshot, sub))
        })
    }
}
