//! Persistence for Rollbook.
//!
//! Keeps roll history in memory and mirrors it to a primary record store,
//! falling back to a key-value snapshot when the primary misbehaves. User
//! presets live in the same key-value store under their own key.

pub mod backend;
pub mod config;
pub mod error;
pub mod history;
pub mod named;

pub use backend::{
    FileKeyValueStore, JsonlRecordStore, KeyValueStore, MemoryKeyValueStore, MemoryRecordStore,
    RecordStore,
};
pub use config::{PrimaryFailurePolicy, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use history::{ActiveTier, AdapterState, Durability, HistoryStore};
pub use named::NamedRollStore;
