//! Tidylist Core Library
//!
//! Todo state management and persistence sync shared by tidylist frontends.

pub mod kv;
pub mod models;
pub mod persist;
pub mod store;

pub use kv::{FileStore, KeyValueStore, KvError, MemoryStore};
pub use models::TodoItem;
pub use persist::{PersistenceSync, SaveHook, STORAGE_KEY};
pub use store::{StoreObserver, TodoStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
