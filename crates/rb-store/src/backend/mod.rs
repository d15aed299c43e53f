//! Store contracts and their implementations.
//!
//! The primary tier is an asynchronous record store; the fallback tier is a
//! synchronous string key-value store. Both come in an in-memory flavor and
//! a file-backed one.

pub mod file;
pub mod memory;

pub use file::{FileKeyValueStore, JsonlRecordStore};
pub use memory::{MemoryKeyValueStore, MemoryRecordStore, RecordOp};

use std::sync::Arc;

use async_trait::async_trait;
use rb_core::Roll;

use crate::error::StoreResult;

/// The primary, asynchronous history store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Prepare the store for use. Must succeed before any other call.
    async fn init(&self) -> StoreResult<()>;

    /// Persist one roll.
    async fn add_roll(&self, roll: &Roll) -> StoreResult<()>;

    /// Every persisted roll, newest first.
    async fn get_all_rolls(&self) -> StoreResult<Vec<Roll>>;

    /// Delete every persisted roll.
    async fn clear_all_rolls(&self) -> StoreResult<()>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn init(&self) -> StoreResult<()> {
        (**self).init().await
    }

    async fn add_roll(&self, roll: &Roll) -> StoreResult<()> {
        (**self).add_roll(roll).await
    }

    async fn get_all_rolls(&self) -> StoreResult<Vec<Roll>> {
        (**self).get_all_rolls().await
    }

    async fn clear_all_rolls(&self) -> StoreResult<()> {
        (**self).clear_all_rolls().await
    }
}

/// The synchronous fallback store: string values under string keys.
pub trait KeyValueStore {
    /// The value under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Drop `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
