//! Observable local store for saved characters.
//!
//! [`LocalStore`] wraps [`CharacterRepo`] so that every committed mutation
//! is followed by a fresh snapshot of the whole table on the store's
//! [`ChangeBus`]. Observers get a [`Subscription`] that starts from the
//! current contents.

use morty_core::types::DbId;
use morty_events::{ChangeBus, ChangeKind, Subscription, TableChange};
use tokio::sync::Mutex;

use crate::models::character::{Character, CreateCharacter};
use crate::repositories::CharacterRepo;
use crate::DbPool;

/// Name of the table published with every change.
pub const CHARACTERS_TABLE: &str = "characters";

pub struct LocalStore {
    pool: DbPool,
    bus: ChangeBus<Character>,
    /// Held across mutate-then-publish so snapshots go out in commit order.
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            bus: ChangeBus::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Save a new character; the table assigns its id.
    pub async fn insert(&self, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let _guard = self.write_lock.lock().await;
        let row = CharacterRepo::create(&self.pool, input).await?;
        tracing::info!(id = row.id, name = %row.name, "Character saved");
        self.publish(ChangeKind::Upserted { id: row.id }).await;
        Ok(row)
    }

    /// Insert or replace the row with `row.id`.
    pub async fn upsert(&self, row: &Character) -> Result<Character, sqlx::Error> {
        let _guard = self.write_lock.lock().await;
        let saved = CharacterRepo::upsert(&self.pool, row).await?;
        tracing::info!(id = saved.id, name = %saved.name, "Character upserted");
        self.publish(ChangeKind::Upserted { id: saved.id }).await;
        Ok(saved)
    }

    /// Delete the row with `id`.
    ///
    /// Deleting an id that does not exist is not an error: it returns
    /// `false` and observers still receive the (unchanged) snapshot.
    pub async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let _guard = self.write_lock.lock().await;
        let removed = CharacterRepo::delete(&self.pool, id).await?;
        if removed {
            tracing::info!(id, "Character deleted");
        } else {
            tracing::debug!(id, "Delete of absent character ignored");
        }
        self.publish(ChangeKind::Deleted { id, removed }).await;
        Ok(removed)
    }

    /// Remove every saved character. Returns the number of rows removed.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let _guard = self.write_lock.lock().await;
        let removed = CharacterRepo::delete_all(&self.pool).await?;
        tracing::info!(removed, "Saved characters cleared");
        self.publish(ChangeKind::Cleared { removed }).await;
        Ok(removed)
    }

    /// Current table contents in id order.
    pub async fn snapshot(&self) -> Result<Vec<Character>, sqlx::Error> {
        CharacterRepo::list_all(&self.pool).await
    }

    pub async fn find(&self, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        CharacterRepo::find_by_id(&self.pool, id).await
    }

    /// Live view of the table: the current snapshot, then one per
    /// committed mutation.
    pub async fn observe_all(&self) -> Result<Subscription<Character>, sqlx::Error> {
        let _guard = self.write_lock.lock().await;
        self.bus.watch(|| CharacterRepo::list_all(&self.pool)).await
    }

    /// Re-read the table and broadcast it. The mutation has already
    /// committed, so a failed read is logged, not returned.
    async fn publish(&self, kind: ChangeKind) {
        match CharacterRepo::list_all(&self.pool).await {
            Ok(snapshot) => self.bus.publish(TableChange::new(CHARACTERS_TABLE, kind, snapshot)),
            Err(e) => {
                tracing::error!(error = %e, ?kind, "Failed to read snapshot after commit");
            }
        }
    }
}
