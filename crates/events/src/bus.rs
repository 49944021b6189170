//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! The store owning a table holds the single [`ChangeBus`] for it and
//! publishes one [`TableChange`] per committed mutation. Any number of
//! observers subscribe independently.

use std::sync::Arc;

use chrono::Utc;
use morty_core::types::{DbId, Timestamp};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::subscription::Subscription;

// ---------------------------------------------------------------------------
// TableChange
// ---------------------------------------------------------------------------

/// What happened to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeKind {
    /// A row was inserted or replaced.
    Upserted { id: DbId },
    /// A delete was requested; `removed` is false when the id was absent.
    Deleted { id: DbId, removed: bool },
    /// Every row was removed.
    Cleared { removed: u64 },
}

/// A committed mutation together with the table contents right after it.
#[derive(Debug, Clone)]
pub struct TableChange<T> {
    /// Table name, e.g. `"characters"`.
    pub table: &'static str,

    pub kind: ChangeKind,

    /// Full table contents after the mutation, in primary key order.
    pub snapshot: Arc<Vec<T>>,

    /// When the change was published (UTC).
    pub timestamp: Timestamp,
}

impl<T> TableChange<T> {
    pub fn new(table: &'static str, kind: ChangeKind, snapshot: Vec<T>) -> Self {
        Self {
            table,
            kind,
            snapshot: Arc::new(snapshot),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Single-producer, multi-consumer fan-out of table changes.
///
/// # Usage
///
/// ```rust
/// use morty_events::bus::{ChangeBus, ChangeKind, TableChange};
///
/// let bus: ChangeBus<String> = ChangeBus::default();
/// let _rx = bus.subscribe();
///
/// bus.publish(TableChange::new("characters", ChangeKind::Cleared { removed: 0 }, vec![]));
/// ```
pub struct ChangeBus<T> {
    sender: broadcast::Sender<TableChange<T>>,
}

impl<T: Clone + Send + Sync + 'static> ChangeBus<T> {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread changes are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change to all current subscribers.
    ///
    /// With no subscribers the change is dropped.
    pub fn publish(&self, change: TableChange<T>) {
        let receivers = self.sender.receiver_count();
        tracing::trace!(table = change.table, kind = ?change.kind, receivers, "Publishing table change");
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(change);
    }

    /// Raw receiver of every change published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<TableChange<T>> {
        self.sender.subscribe()
    }

    /// Snapshot stream starting with `initial`.
    ///
    /// Callers must obtain the receiver *before* reading `initial` so that
    /// no change committed in between is missed; this method does so by
    /// taking a closure that reads the snapshot.
    pub async fn watch<F, Fut, E>(&self, read_initial: F) -> Result<Subscription<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<T>, E>>,
    {
        let receiver = self.subscribe();
        let initial = read_initial().await?;
        Ok(Subscription::new(initial, receiver))
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ChangeBus<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus: ChangeBus<&'static str> = ChangeBus::default();
        let mut rx = bus.subscribe();

        bus.publish(TableChange::new(
            "characters",
            ChangeKind::Upserted { id: 7 },
            vec!["Rick"],
        ));

        let received = rx.recv().await.expect("should receive the change");
        assert_eq!(received.table, "characters");
        assert_eq!(received.kind, ChangeKind::Upserted { id: 7 });
        assert_eq!(*received.snapshot, vec!["Rick"]);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_change() {
        let bus: ChangeBus<u8> = ChangeBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        bus.publish(TableChange::new("t", ChangeKind::Cleared { removed: 3 }, vec![]));

        let c1 = rx1.recv().await.expect("subscriber 1 should receive");
        let c2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(c1.kind, c2.kind);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus: ChangeBus<u8> = ChangeBus::default();
        bus.publish(TableChange::new(
            "t",
            ChangeKind::Deleted { id: 1, removed: false },
            vec![],
        ));
    }

    #[test]
    fn change_kind_serializes_tagged() {
        let json = serde_json::to_value(ChangeKind::Deleted { id: 4, removed: true }).unwrap();
        assert_eq!(json["kind"], "deleted");
        assert_eq!(json["id"], 4);
        assert_eq!(json["removed"], true);
    }
}
