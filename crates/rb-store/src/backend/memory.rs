//! In-memory stores with switchable failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rb_core::Roll;

use super::{KeyValueStore, RecordStore};
use crate::error::{StoreError, StoreResult};

/// An operation on a [`RecordStore`] that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOp {
    /// `init`.
    Init,
    /// `add_roll`.
    Add,
    /// `get_all_rolls`.
    GetAll,
    /// `clear_all_rolls`.
    Clear,
}

/// A record store kept in memory, newest roll first.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    rolls: Mutex<Vec<Roll>>,
    initialized: AtomicBool,
    fail_init: AtomicBool,
    fail_add: AtomicBool,
    fail_get_all: AtomicBool,
    fail_clear: AtomicBool,
}

impl MemoryRecordStore {
    /// An empty, healthy store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with `rolls` in the given order.
    pub fn with_rolls(rolls: Vec<Roll>) -> Self {
        Self {
            rolls: Mutex::new(rolls),
            ..Self::default()
        }
    }

    /// A store where every operation fails.
    pub fn unavailable() -> Self {
        let store = Self::new();
        for op in [RecordOp::Init, RecordOp::Add, RecordOp::GetAll, RecordOp::Clear] {
            store.fail(op, true);
        }
        store
    }

    /// Make `op` fail (or succeed again).
    pub fn fail(&self, op: RecordOp, failing: bool) {
        self.flag(op).store(failing, Ordering::SeqCst);
    }

    /// Copy of the stored rolls.
    pub fn snapshot(&self) -> Vec<Roll> {
        self.rolls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn flag(&self, op: RecordOp) -> &AtomicBool {
        match op {
            RecordOp::Init => &self.fail_init,
            RecordOp::Add => &self.fail_add,
            RecordOp::GetAll => &self.fail_get_all,
            RecordOp::Clear => &self.fail_clear,
        }
    }

    fn check(&self, op: RecordOp) -> StoreResult<()> {
        if self.flag(op).load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{op:?} rejected")));
        }
        if op != RecordOp::Init && !self.initialized.load(Ordering::SeqCst) {
            return Err(StoreError::NotInitialized);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn init(&self) -> StoreResult<()> {
        self.check(RecordOp::Init)?;
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn add_roll(&self, roll: &Roll) -> StoreResult<()> {
        self.check(RecordOp::Add)?;
        self.rolls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, roll.clone());
        Ok(())
    }

    async fn get_all_rolls(&self) -> StoreResult<Vec<Roll>> {
        self.check(RecordOp::GetAll)?;
        Ok(self.snapshot())
    }

    async fn clear_all_rolls(&self) -> StoreResult<()> {
        self.check(RecordOp::Clear)?;
        self.rolls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

/// A key-value store kept in memory.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryKeyValueStore {
    /// An empty, healthy store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail (or succeed again).
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Read a value directly, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("key-value store rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check()?;
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check()?;
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.check()?;
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
