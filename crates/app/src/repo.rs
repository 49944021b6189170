//! Repository composing the remote API and the local store.
//!
//! The two sources are unrelated: remote data is a one-shot fetch, local
//! data a live view of the `characters` table. Nothing is merged or
//! transformed on the way through.

use std::sync::Arc;

use async_trait::async_trait;
use morty_core::types::DbId;
use morty_db::models::character::{Character, CreateCharacter};
use morty_db::LocalStore;
use morty_events::Subscription;
use morty_remote::{CharacterApi, CharacterPage, RemoteError};

#[async_trait]
pub trait MainRepo: Send + Sync {
    /// Fetch the remote character list once.
    async fn get_characters(&self) -> Result<CharacterPage, RemoteError>;

    /// Live view of the saved characters.
    async fn observe_local_characters(&self) -> Result<Subscription<Character>, sqlx::Error>;

    async fn insert_character(&self, input: &CreateCharacter) -> Result<Character, sqlx::Error>;

    async fn upsert_character(&self, row: &Character) -> Result<Character, sqlx::Error>;

    /// Returns `false` when no character had `id`.
    async fn delete_character(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn delete_all_characters(&self) -> Result<u64, sqlx::Error>;
}

/// [`MainRepo`] backed by [`CharacterApi`] and [`LocalStore`].
pub struct MainRepoImpl {
    api: CharacterApi,
    store: Arc<LocalStore>,
}

impl MainRepoImpl {
    pub fn new(api: CharacterApi, store: Arc<LocalStore>) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl MainRepo for MainRepoImpl {
    async fn get_characters(&self) -> Result<CharacterPage, RemoteError> {
        self.api.fetch_characters().await
    }

    async fn observe_local_characters(&self) -> Result<Subscription<Character>, sqlx::Error> {
        self.store.observe_all().await
    }

    async fn insert_character(&self, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        self.store.insert(input).await
    }

    async fn upsert_character(&self, row: &Character) -> Result<Character, sqlx::Error> {
        self.store.upsert(row).await
    }

    async fn delete_character(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.store.delete(id).await
    }

    async fn delete_all_characters(&self) -> Result<u64, sqlx::Error> {
        self.store.delete_all().await
    }
}
