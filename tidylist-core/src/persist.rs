//! Persistence bridge between the todo store and a key-value store.
//!
//! Loads the persisted snapshot once at startup and writes a fresh snapshot
//! after every committed mutation. Saves are fire-and-forget: each commit
//! serializes the snapshot it was handed and queues the payload to a single
//! writer task, which issues the writes strictly in commit order. The
//! in-memory collection never waits on storage, and the last committed
//! snapshot is the one that ends up in the store.
//!
//! Neither load nor save failures escape this module. A failed load starts
//! the session with a fresh list; a failed save leaves the in-memory state
//! untouched and the next mutation's save reconciles the persisted copy.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::kv::KeyValueStore;
use crate::models::TodoItem;
use crate::store::{StoreObserver, TodoStore};

/// Key under which the serialized todo list is stored.
pub const STORAGE_KEY: &str = "@todos";

enum SaveRequest {
    Write(String),
    Flush(oneshot::Sender<()>),
}

/// Keeps a key-value store in step with the latest committed snapshot.
pub struct PersistenceSync {
    store: Arc<dyn KeyValueStore>,
    key: String,
    tx: mpsc::UnboundedSender<SaveRequest>,
}

impl PersistenceSync {
    /// Creates a sync against the default [`STORAGE_KEY`].
    ///
    /// Spawns the writer task, so this must be called from within a Tokio
    /// runtime.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Creates a sync that persists under a custom key.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(write_loop(Arc::clone(&store), key.clone(), rx));
        Self { store, key, tx }
    }

    /// Hydrates the todo store from the persisted snapshot, if any.
    ///
    /// An absent key is a valid first-run state and leaves the collection
    /// empty. Unreadable or unparsable data is logged and treated the same
    /// way, so the session starts with a fresh list rather than a
    /// half-parsed one.
    pub async fn load(&self, todos: &mut TodoStore) {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                warn!("failed to read persisted todos: {}", e);
                return;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => todos.hydrate(items),
            Err(e) => warn!("discarding unparsable todo data: {}", e),
        }
    }

    /// Returns the observer that schedules a save after each commit.
    ///
    /// Subscribe it with [`TodoStore::subscribe`]. Each commit serializes
    /// the snapshot it was handed at call time; a later commit never
    /// rewrites an earlier payload.
    pub fn hook(&self) -> SaveHook {
        SaveHook {
            tx: self.tx.clone(),
        }
    }

    /// Waits until every save queued so far has been attempted.
    ///
    /// Best-effort: writes that failed were already logged by the writer
    /// task and do not fail the flush.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(SaveRequest::Flush(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }
}

/// Commit observer that queues serialized snapshots for the writer task.
pub struct SaveHook {
    tx: mpsc::UnboundedSender<SaveRequest>,
}

impl StoreObserver for SaveHook {
    fn snapshot_committed(&self, items: &[TodoItem]) {
        let payload = match serde_json::to_string(items) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to serialize todos: {}", e);
                return;
            }
        };
        if self.tx.send(SaveRequest::Write(payload)).is_err() {
            warn!("persistence writer is gone, dropping save");
        }
    }
}

async fn write_loop(
    store: Arc<dyn KeyValueStore>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<SaveRequest>,
) {
    while let Some(request) = rx.recv().await {
        match request {
            SaveRequest::Write(payload) => {
                if let Err(e) = store.set(&key, &payload).await {
                    warn!("failed to persist todos: {}", e);
                }
            }
            SaveRequest::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
