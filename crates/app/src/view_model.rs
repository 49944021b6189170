//! View-state holder for the character screens.
//!
//! [`CharacterViewModel`] owns two independent observable slots:
//!
//! - the remote slot, a [`RemoteState`] that moves
//!   `Initial -> Loading -> Success | Error` once per fetch;
//! - the local slot, the latest snapshot of saved characters (empty until
//!   the first snapshot arrives).
//!
//! Mutations are fire-and-forget: the holder spawns the repository call
//! and the local slot catches up through the store's change notifications.
//! Every spawned task is aborted when the holder is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use morty_core::types::DbId;
use morty_db::models::character::{Character, CreateCharacter};
use morty_remote::CharacterPage;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

use crate::repo::MainRepo;

/// Message shown in place of the list when the fetch fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load characters";

/// State of the remote character list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteState {
    Initial,
    Loading,
    Success(CharacterPage),
    Error(String),
}

impl RemoteState {
    /// `true` once a fetch has completed either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, RemoteState::Success(_) | RemoteState::Error(_))
    }
}

pub struct CharacterViewModel {
    repo: Arc<dyn MainRepo>,
    remote: Arc<watch::Sender<RemoteState>>,
    local: Arc<watch::Sender<Vec<Character>>>,
    /// Bumped (under the remote slot's lock) by every fetch; a completing
    /// fetch only publishes if it is still the latest.
    fetch_generation: Arc<AtomicU64>,
    /// Number of local snapshots received so far. Only changed inside the
    /// local slot's `send_modify`.
    snapshots_received: Arc<AtomicU64>,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl CharacterViewModel {
    /// Build the holder and start loading both slots.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(repo: Arc<dyn MainRepo>) -> Self {
        let (remote, _) = watch::channel(RemoteState::Initial);
        let (local, _) = watch::channel(Vec::new());

        let vm = Self {
            repo,
            remote: Arc::new(remote),
            local: Arc::new(local),
            fetch_generation: Arc::new(AtomicU64::new(0)),
            snapshots_received: Arc::new(AtomicU64::new(0)),
            tasks: Mutex::new(Vec::new()),
        };
        vm.load_characters();
        vm.observe_local_characters();
        vm
    }

    // ---- observable slots ----

    /// Subscribe to the remote slot.
    pub fn remote_state(&self) -> watch::Receiver<RemoteState> {
        self.remote.subscribe()
    }

    /// Subscribe to the local slot.
    pub fn local_characters(&self) -> watch::Receiver<Vec<Character>> {
        self.local.subscribe()
    }

    pub fn current_remote(&self) -> RemoteState {
        self.remote.borrow().clone()
    }

    pub fn current_local(&self) -> Vec<Character> {
        self.local.borrow().clone()
    }

    /// Wait until the current fetch has completed and return its state.
    pub async fn settled_remote(&self) -> RemoteState {
        let mut rx = self.remote.subscribe();
        let settled = rx.wait_for(RemoteState::is_settled).await.map(|s| s.clone());
        // The sender lives in `self`, so the channel cannot close here.
        settled.unwrap_or_else(|_| self.current_remote())
    }

    /// Wait until a local snapshot has arrived that satisfies `predicate`.
    pub async fn wait_for_local<F>(&self, mut predicate: F) -> Vec<Character>
    where
        F: FnMut(&[Character]) -> bool,
    {
        let received = &self.snapshots_received;
        let mut rx = self.local.subscribe();
        let rows = rx
            .wait_for(|rows| received.load(Ordering::SeqCst) > 0 && predicate(rows))
            .await
            .map(|rows| rows.clone());
        rows.unwrap_or_else(|_| self.current_local())
    }

    // ---- intents ----

    /// Re-issue the remote fetch. The slot goes back to `Loading`; a fetch
    /// still in flight from before can no longer publish.
    pub fn refresh(&self) {
        self.load_characters();
    }

    pub fn insert_character(&self, input: CreateCharacter) -> JoinHandle<()> {
        let repo = self.repo.clone();
        self.spawn(async move {
            if let Err(e) = repo.insert_character(&input).await {
                tracing::error!(error = %e, name = %input.name, "Failed to insert character");
            }
        })
    }

    pub fn upsert_character(&self, row: Character) -> JoinHandle<()> {
        let repo = self.repo.clone();
        self.spawn(async move {
            if let Err(e) = repo.upsert_character(&row).await {
                tracing::error!(error = %e, id = row.id, "Failed to upsert character");
            }
        })
    }

    pub fn delete_character(&self, id: DbId) -> JoinHandle<()> {
        let repo = self.repo.clone();
        self.spawn(async move {
            if let Err(e) = repo.delete_character(id).await {
                tracing::error!(error = %e, id, "Failed to delete character");
            }
        })
    }

    pub fn delete_all_characters(&self) -> JoinHandle<()> {
        let repo = self.repo.clone();
        self.spawn(async move {
            if let Err(e) = repo.delete_all_characters().await {
                tracing::error!(error = %e, "Failed to delete all characters");
            }
        })
    }

    // ---- private helpers ----

    fn load_characters(&self) {
        let generation_counter = self.fetch_generation.clone();
        let mut generation = 0;
        self.remote.send_modify(|state| {
            generation = generation_counter.fetch_add(1, Ordering::SeqCst) + 1;
            *state = RemoteState::Loading;
        });

        let repo = self.repo.clone();
        let remote = self.remote.clone();
        self.spawn(async move {
            let next = match repo.get_characters().await {
                Ok(page) => {
                    tracing::info!(count = page.results.len(), "Characters loaded");
                    RemoteState::Success(page)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Character fetch failed");
                    RemoteState::Error(LOAD_FAILED_MESSAGE.to_string())
                }
            };

            let published = remote.send_if_modified(|state| {
                if generation_counter.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *state = next;
                true
            });
            if !published {
                tracing::debug!(generation, "Discarding superseded fetch result");
            }
        });
    }

    fn observe_local_characters(&self) {
        let repo = self.repo.clone();
        let local = self.local.clone();
        let received = self.snapshots_received.clone();
        self.spawn(async move {
            let mut subscription = match repo.observe_local_characters().await {
                Ok(sub) => sub,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to observe saved characters");
                    return;
                }
            };
            while let Some(snapshot) = subscription.next().await {
                // Counted under the slot's write lock so waiters never see
                // the count without the rows.
                local.send_modify(|rows| {
                    *rows = snapshot.as_ref().clone();
                    received.fetch_add(1, Ordering::SeqCst);
                });
            }
            tracing::debug!("Saved character observation ended");
        });
    }

    fn spawn<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle.abort_handle());
        handle
    }
}

impl Drop for CharacterViewModel {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(PoisonError::into_inner);
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}
