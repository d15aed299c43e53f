//! File-backed stores.
//!
//! History records go to a JSON-lines file, one roll per line, appended in
//! roll order. Key-value entries are one `<key>.json` file each.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rb_core::Roll;
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{KeyValueStore, RecordStore};
use crate::error::{StoreError, StoreResult};

/// Primary history store in a JSON-lines file.
#[derive(Debug)]
pub struct JsonlRecordStore {
    path: PathBuf,
    initialized: AtomicBool,
}

impl JsonlRecordStore {
    /// File name used inside the data directory.
    pub const FILE_NAME: &'static str = "history.jsonl";

    /// A store writing to `<dir>/history.jsonl`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(Self::FILE_NAME))
    }

    /// A store writing to `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_initialized(&self) -> StoreResult<()> {
        if self.initialized.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }
}

#[async_trait]
impl RecordStore for JsonlRecordStore {
    async fn init(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn add_roll(&self, roll: &Roll) -> StoreResult<()> {
        self.ensure_initialized()?;
        let mut line = serde_json::to_string(roll)?;
        line.push('\n');
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn get_all_rolls(&self) -> StoreResult<Vec<Roll>> {
        self.ensure_initialized()?;
        let content = fs::read_to_string(&self.path).await?;
        let mut rolls = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<Roll>)
            .collect::<Result<Vec<_>, _>>()?;
        rolls.reverse();
        Ok(rolls)
    }

    async fn clear_all_rolls(&self) -> StoreResult<()> {
        self.ensure_initialized()?;
        fs::write(&self.path, b"").await?;
        Ok(())
    }
}

/// Fallback store keeping each key in `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory that is then renamed
/// over the key file.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// A store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Readers see the old value or the new one, never a partial write.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
