//! Roll history with a primary tier and a fallback snapshot.
//!
//! The in-memory list is what callers render; the stores only mirror it.
//! At startup the adapter tries the primary store and settles on one tier:
//!
//! ```text
//! Uninitialized --init+load ok--> Ready(Primary)
//! Uninitialized --any failure---> Ready(Fallback)
//! Ready(Primary) --write failure, DemoteToFallback--> Ready(Fallback)
//! ```
//!
//! Store failures are logged and never returned. When the primary rejects a
//! write the whole list is written to the fallback as a JSON snapshot.

use rb_core::Roll;
use tracing::{debug, info, warn};

use crate::backend::{KeyValueStore, RecordStore};
use crate::config::{PrimaryFailurePolicy, StoreConfig};
use crate::error::{StoreError, StoreResult};

/// The tier writes go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTier {
    /// The asynchronous record store.
    Primary,
    /// The key-value snapshot.
    Fallback,
}

/// Lifecycle of a [`HistoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    /// `initialize` has not run yet.
    Uninitialized,
    /// Loaded and writing to the given tier.
    Ready(ActiveTier),
}

/// Where a change ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// Written to the primary store.
    Primary,
    /// Written to the fallback snapshot.
    Fallback,
    /// Only the in-memory list reflects it.
    Volatile,
}

/// Newest-first roll history mirrored to a primary and a fallback store.
#[derive(Debug)]
pub struct HistoryStore<P, K> {
    primary: P,
    fallback: K,
    config: StoreConfig,
    state: AdapterState,
    rolls: Vec<Roll>,
}

impl<P: RecordStore, K: KeyValueStore> HistoryStore<P, K> {
    /// An adapter that has not loaded anything yet.
    pub fn new(primary: P, fallback: K, config: StoreConfig) -> Self {
        Self {
            primary,
            fallback,
            config,
            state: AdapterState::Uninitialized,
            rolls: Vec::new(),
        }
    }

    /// Create an adapter and load the history.
    pub async fn open(primary: P, fallback: K, config: StoreConfig) -> Self {
        let mut store = Self::new(primary, fallback, config);
        store.initialize().await;
        store
    }

    /// Load the history, choosing the active tier. Runs once.
    pub async fn initialize(&mut self) {
        if self.state != AdapterState::Uninitialized {
            debug!(state = ?self.state, "history already initialized");
            return;
        }

        match self.load_primary().await {
            Ok(mut rolls) => {
                rolls.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                info!(count = rolls.len(), "loaded roll history from primary store");
                self.rolls = rolls;
                self.state = AdapterState::Ready(ActiveTier::Primary);
            }
            Err(e) => {
                warn!(error = %e, "primary history store unavailable, using fallback");
                self.rolls = self.load_snapshot();
                info!(count = self.rolls.len(), "loaded roll history from fallback snapshot");
                self.state = AdapterState::Ready(ActiveTier::Fallback);
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AdapterState {
        self.state
    }

    /// The tier writes currently go to, once initialized.
    pub fn active_tier(&self) -> Option<ActiveTier> {
        match self.state {
            AdapterState::Ready(tier) => Some(tier),
            AdapterState::Uninitialized => None,
        }
    }

    /// Rolls, newest first.
    pub fn rolls(&self) -> &[Roll] {
        &self.rolls
    }

    /// Number of rolls.
    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Find a roll by id.
    pub fn get(&self, id: &str) -> Option<&Roll> {
        self.rolls.iter().find(|r| r.id == id)
    }

    /// Prepend a roll and persist it to the active tier.
    pub async fn add(&mut self, roll: Roll) -> Durability {
        self.rolls.insert(0, roll);

        if self.state != AdapterState::Ready(ActiveTier::Primary) {
            return self.write_snapshot();
        }

        match self.primary.add_roll(&self.rolls[0]).await {
            Ok(()) => Durability::Primary,
            Err(e) => {
                warn!(error = %e, id = %self.rolls[0].id, "failed to save roll to primary store");
                if self.config.failure_policy == PrimaryFailurePolicy::DemoteToFallback {
                    info!("switching roll history to fallback store");
                    self.state = AdapterState::Ready(ActiveTier::Fallback);
                }
                self.write_snapshot()
            }
        }
    }

    /// Empty the history and both tiers.
    ///
    /// The primary is asked to clear whatever the active tier, and the
    /// fallback snapshot is always removed, so neither tier replays the
    /// cleared rolls on the next load.
    pub async fn clear(&mut self) -> Durability {
        self.rolls.clear();

        let primary = match self.primary.clear_all_rolls().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to clear primary store");
                false
            }
        };
        let fallback = match self.fallback.remove(&self.config.history_key) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to remove fallback history snapshot");
                false
            }
        };

        match (primary, fallback) {
            (true, _) => Durability::Primary,
            (false, true) => Durability::Fallback,
            (false, false) => Durability::Volatile,
        }
    }

    async fn load_primary(&self) -> StoreResult<Vec<Roll>> {
        self.primary.init().await?;
        self.primary.get_all_rolls().await
    }

    fn load_snapshot(&self) -> Vec<Roll> {
        let raw = match self.fallback.get(&self.config.history_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read fallback history snapshot");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "discarding malformed fallback history snapshot");
            Vec::new()
        })
    }

    fn write_snapshot(&self) -> Durability {
        let result = serde_json::to_string(&self.rolls)
            .map_err(StoreError::from)
            .and_then(|json| self.fallback.set(&self.config.history_key, &json));
        match result {
            Ok(()) => {
                debug!(count = self.rolls.len(), "wrote fallback history snapshot");
                Durability::Fallback
            }
            Err(e) => {
                warn!(error = %e, "failed to write fallback history snapshot");
                Durability::Volatile
            }
        }
    }
}
