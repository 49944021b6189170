#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use morty_app::repo::MainRepo;
use morty_core::types::DbId;
use morty_db::models::character::{Character, CreateCharacter};
use morty_db::LocalStore;
use morty_events::Subscription;
use morty_remote::{CharacterPage, RemoteCharacter, RemoteError};
use tokio::sync::Notify;

/// Upper bound for any single wait in these tests.
pub const WAIT: Duration = Duration::from_secs(5);

/// Scripted result of one `get_characters` call.
pub struct Fetch {
    pub result: Result<CharacterPage, u16>,
    pub gate: Option<Arc<Notify>>,
}

impl Fetch {
    pub fn page(names: &[&str]) -> Self {
        Self {
            result: Ok(page(names)),
            gate: None,
        }
    }

    pub fn failure(status: u16) -> Self {
        Self {
            result: Err(status),
            gate: None,
        }
    }

    /// Hold the response until `gate` is notified.
    pub fn gated(mut self, gate: &Arc<Notify>) -> Self {
        self.gate = Some(gate.clone());
        self
    }
}

/// [`MainRepo`] with scripted remote responses and a real in-memory store.
pub struct StubRepo {
    store: LocalStore,
    fetches: Mutex<VecDeque<Fetch>>,
    started: AtomicUsize,
}

impl StubRepo {
    pub async fn new(fetches: Vec<Fetch>) -> Arc<Self> {
        let pool = morty_db::create_pool("sqlite::memory:").await.unwrap();
        morty_db::run_migrations(&pool).await.unwrap();
        Arc::new(Self {
            store: LocalStore::new(pool),
            fetches: Mutex::new(fetches.into()),
            started: AtomicUsize::new(0),
        })
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Wait until `n` fetches have been issued.
    pub async fn wait_started(&self, n: usize) {
        tokio::time::timeout(WAIT, async {
            while self.started() < n {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("fetch should start");
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}

#[async_trait]
impl MainRepo for StubRepo {
    async fn get_characters(&self) -> Result<CharacterPage, RemoteError> {
        let fetch = self
            .fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Fetch::page(&[]));
        self.started.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = fetch.gate {
            gate.notified().await;
        }
        fetch.result.map_err(|status| RemoteError::ApiError {
            status,
            body: "scripted failure".to_string(),
        })
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

pub fn page(names: &[&str]) -> CharacterPage {
    CharacterPage {
        results: names.iter().map(|n| remote(n)).collect(),
        ..Default::default()
    }
}

pub fn remote(name: &str) -> RemoteCharacter {
    RemoteCharacter {
        name: name.to_string(),
        species: "Human".to_string(),
        gender: "Male".to_string(),
        status: "Alive".to_string(),
        kind: String::new(),
        origin: Default::default(),
        location: Default::default(),
        image: format!("https://example.test/{name}.jpeg"),
        id: None,
        episode: Vec::new(),
        url: None,
        created: None,
    }
}

pub fn draft(name: &str) -> CreateCharacter {
    CreateCharacter {
        name: name.to_string(),
        species: "Human".to_string(),
        gender: "Female".to_string(),
        status: "Alive".to_string(),
        kind: "Teenager".to_string(),
        created: "2024-05-01 12:00:00".to_string(),
        image: vec![0x47, 0x49, 0x46],
    }
}

pub fn names(rows: &[Character]) -> Vec<&str> {
    rows.iter().map(|c| c.name.as_str()).collect()
}
