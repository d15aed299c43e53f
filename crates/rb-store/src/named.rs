//! User-named roll presets.
//!
//! The whole list lives under one key as a JSON array and every operation
//! reads and rewrites it. Names are not unique: saving a name twice keeps
//! both entries, and deleting a name removes every entry carrying it.

use rb_core::NamedRollPreset;
use tracing::{debug, warn};

use crate::backend::KeyValueStore;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Preset list persisted in a key-value store.
#[derive(Debug)]
pub struct NamedRollStore<K> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> NamedRollStore<K> {
    /// A preset store using the configured presets key.
    pub fn new(store: K, config: &StoreConfig) -> Self {
        Self {
            store,
            key: config.presets_key.clone(),
        }
    }

    /// Every saved preset, oldest first. Missing or malformed data reads as
    /// an empty list.
    pub fn list(&self) -> Vec<NamedRollPreset> {
        match self.try_list() {
            Ok(presets) => presets,
            Err(e) => {
                warn!(error = %e, key = %self.key, "failed to load named rolls");
                Vec::new()
            }
        }
    }

    /// Presets named `name`.
    pub fn find(&self, name: &str) -> Vec<NamedRollPreset> {
        self.list().into_iter().filter(|p| p.name == name).collect()
    }

    /// Append a preset. Returns whether the list was written.
    pub fn save(&self, preset: NamedRollPreset) -> bool {
        let mut presets = self.list();
        debug!(name = %preset.name, "saving named roll");
        presets.push(preset);
        self.write(&presets)
    }

    /// Remove every preset named `name`. Returns how many were removed, or
    /// zero when the list could not be written.
    pub fn delete(&self, name: &str) -> usize {
        let mut presets = self.list();
        let before = presets.len();
        presets.retain(|p| p.name != name);
        let removed = before - presets.len();
        if self.write(&presets) { removed } else { 0 }
    }

    /// Drop the stored list entirely. Returns whether the key was removed.
    pub fn clear_all(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, key = %self.key, "failed to clear named rolls");
                false
            }
        }
    }

    fn try_list(&self) -> StoreResult<Vec<NamedRollPreset>> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, presets: &[NamedRollPreset]) -> bool {
        let result = serde_json::to_string(presets)
            .map_err(StoreError::from)
            .and_then(|json| self.store.set(&self.key, &json));
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, key = %self.key, "failed to save named rolls");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rb_core::{DiceGroupSpec, DiceKind};

    use super::*;
    use crate::backend::MemoryKeyValueStore;
    use crate::config::PRESETS_KEY;

    fn preset(name: &str, count: u32) -> NamedRollPreset {
        NamedRollPreset::new(name, vec![DiceGroupSpec::new(DiceKind::D10, count)], 2)
    }

    fn names(presets: &[NamedRollPreset]) -> Vec<&str> {
        presets.iter().map(|p| p.name.as_str()).collect()
    }

    fn store() -> (Arc<MemoryKeyValueStore>, NamedRollStore<Arc<MemoryKeyValueStore>>) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let named = NamedRollStore::new(kv.clone(), &StoreConfig::default());
        (kv, named)
    }

    #[test]
    fn empty_when_absent() {
        let (_, named) = store();
        assert!(named.list().is_empty());
    }

    #[test]
    fn save_appends_in_order() {
        let (kv, named) = store();
        assert!(named.save(preset("Alpha", 1)));
        assert!(named.save(preset("Beta", 2)));
        assert_eq!(names(&named.list()), vec!["Alpha", "Beta"]);
        assert!(kv.raw(PRESETS_KEY).unwrap().contains("\"Beta\""));
    }

    #[test]
    fn save_then_delete_restores_list() {
        let (_, named) = store();
        named.save(preset("Alpha", 1));
        let before = named.list();

        named.save(preset("Beta", 2));
        assert_eq!(named.delete("Beta"), 1);
        assert_eq!(named.list(), before);
    }

    #[test]
    fn duplicate_names_coexist_and_delete_together() {
        let (_, named) = store();
        named.save(preset("Twin", 1));
        named.save(preset("Other", 1));
        named.save(preset("Twin", 3));
        assert_eq!(named.find("Twin").len(), 2);

        assert_eq!(named.delete("Twin"), 2);
        assert_eq!(names(&named.list()), vec!["Other"]);
    }

    #[test]
    fn delete_missing_name_is_noop() {
        let (_, named) = store();
        named.save(preset("Alpha", 1));
        assert_eq!(named.delete("Nope"), 0);
        assert_eq!(names(&named.list()), vec!["Alpha"]);
    }

    #[test]
    fn malformed_data_reads_as_empty() {
        let (kv, named) = store();
        kv.set(PRESETS_KEY, "[{\"name\": 5}]").unwrap();
        assert!(named.list().is_empty());

        assert!(named.save(preset("Fresh", 1)));
        assert_eq!(names(&named.list()), vec!["Fresh"]);
    }

    #[test]
    fn reads_presets_written_by_hand() {
        let (kv, named) = store();
        let raw = serde_json::json!([{
            "name": "Hex",
            "dice": [{ "type": "d6", "count": 1 }],
            "modifier": 0,
            "description": "+necrotic",
        }]);
        kv.set(PRESETS_KEY, &raw.to_string()).unwrap();
        let presets = named.list();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].dice, vec![DiceGroupSpec::new(DiceKind::D6, 1)]);
        assert_eq!(presets[0].description.as_deref(), Some("+necrotic"));
    }

    #[test]
    fn clear_all_removes_key() {
        let (kv, named) = store();
        named.save(preset("Alpha", 1));
        assert!(named.clear_all());
        assert!(kv.raw(PRESETS_KEY).is_none());
        assert!(named.list().is_empty());
    }

    #[test]
    fn failing_store_degrades() {
        let (kv, named) = store();
        named.save(preset("Alpha", 1));
        kv.fail(true);
        assert!(named.list().is_empty());
        assert!(!named.save(preset("Beta", 1)));
        assert_eq!(named.delete("Alpha"), 0);
        kv.fail(false);
        assert_eq!(names(&named.list()), vec!["Alpha"]);
    }
}
