//! Configuration for the history and preset stores.
//!
//! Stored as JSON with camelCase keys; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Default fallback key holding the JSON history snapshot.
pub const HISTORY_KEY: &str = "diceRollHistory";

/// Default key holding the JSON list of user presets.
pub const PRESETS_KEY: &str = "customDiceRolls";

/// What the history adapter does after a failed primary write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryFailurePolicy {
    /// Stay on the primary tier and try it again on the next add.
    #[default]
    RetryEveryCall,
    /// Switch to the fallback tier for the rest of the session.
    DemoteToFallback,
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Fallback key for the history snapshot.
    pub history_key: String,
    /// Key for the user preset list.
    pub presets_key: String,
    /// Reaction to primary write failures.
    pub failure_policy: PrimaryFailurePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_key: HISTORY_KEY.to_string(),
            presets_key: PRESETS_KEY.to_string(),
            failure_policy: PrimaryFailurePolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Parse a configuration from JSON, filling absent fields with defaults.
    pub fn from_json(raw: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Set the history snapshot key.
    pub fn with_history_key(mut self, key: impl Into<String>) -> Self {
        self.history_key = key.into();
        self
    }

    /// Set the preset list key.
    pub fn with_presets_key(mut self, key: impl Into<String>) -> Self {
        self.presets_key = key.into();
        self
    }

    /// Set the primary failure policy.
    pub fn with_failure_policy(mut self, policy: PrimaryFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
