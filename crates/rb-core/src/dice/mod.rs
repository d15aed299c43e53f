//! Dice kinds, groups, and the randomness behind them.
//!
//! The set of die shapes is closed: d4, d6, d8, d10, d12, d20 and d100.
//! Groups pair a kind with a count, and roll into a list of face values.

pub mod group;
pub mod source;

pub use group::{DiceGroupResult, DiceGroupSpec};
pub use source::{RandomSource, StdRandom};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A polyhedral die shape.
///
/// Serialized as its lowercase label (`"d6"`), which is also the label used
/// in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiceKind {
    /// Four-sided die.
    #[serde(rename = "d4")]
    D4,
    /// Six-sided die.
    #[serde(rename = "d6")]
    D6,
    /// Eight-sided die.
    #[serde(rename = "d8")]
    D8,
    /// Ten-sided die.
    #[serde(rename = "d10")]
    D10,
    /// Twelve-sided die.
    #[serde(rename = "d12")]
    D12,
    /// Twenty-sided die.
    #[serde(rename = "d20")]
    D20,
    /// Percentile die (1-100).
    #[serde(rename = "d100")]
    D100,
}

impl DiceKind {
    /// Every kind, smallest first. This is the display order of selectors.
    pub const ALL: [DiceKind; 7] = [
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// The lowercase label used in expressions, e.g. `"d20"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::D4 => "d4",
            Self::D6 => "d6",
            Self::D8 => "d8",
            Self::D10 => "d10",
            Self::D12 => "d12",
            Self::D20 => "d20",
            Self::D100 => "d100",
        }
    }

    /// Parse a kind from a label like `"d20"` or `"D6"`.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == lower)
            .ok_or_else(|| CoreError::UnknownDie(s.trim().to_string()))
    }
}

impl std::fmt::Display for DiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DiceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}
