//! Dice group requests and their rolled results.

use serde::{Deserialize, Serialize};

use super::DiceKind;
use super::source::RandomSource;
use crate::error::{CoreError, CoreResult};

/// A request to roll `count` dice of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceGroupSpec {
    /// The die shape.
    #[serde(rename = "type")]
    pub kind: DiceKind,
    /// How many dice to roll.
    pub count: u32,
}

impl DiceGroupSpec {
    /// Create a group of `count` dice of `kind`.
    pub fn new(kind: DiceKind, count: u32) -> Self {
        Self { kind, count }
    }

    /// Whether this group rolls nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Roll every die in the group.
    pub fn roll(&self, source: &mut impl RandomSource) -> DiceGroupResult {
        let sides = self.kind.sides();
        let results = (0..self.count).map(|_| source.roll_die(sides)).collect();
        DiceGroupResult {
            kind: self.kind,
            count: self.count,
            results,
        }
    }

    /// Parse a group from `"2d6"`, or `"d20"` for a single die.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim().to_lowercase();
        let split = trimmed
            .find('d')
            .ok_or_else(|| CoreError::InvalidGroup(s.trim().to_string()))?;
        let (count_str, label) = trimmed.split_at(split);
        let count = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse::<u32>()
                .map_err(|_| CoreError::InvalidGroup(s.trim().to_string()))?
        };
        let kind = DiceKind::parse(label)?;
        Ok(Self { kind, count })
    }
}

impl std::fmt::Display for DiceGroupSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.kind)
    }
}

impl std::str::FromStr for DiceGroupSpec {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

/// The outcome of rolling one dice group.
///
/// `results` holds exactly `count` face values, each within the die's range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceGroupResult {
    /// The die shape that was rolled.
    #[serde(rename = "type")]
    pub kind: DiceKind,
    /// Number of dice rolled.
    pub count: u32,
    /// Face values in roll order.
    pub results: Vec<u32>,
}

impl DiceGroupResult {
    /// Sum of the face values.
    pub fn sum(&self) -> i64 {
        self.results.iter().map(|&v| i64::from(v)).sum()
    }

    /// The request this result was rolled from.
    pub fn spec(&self) -> DiceGroupSpec {
        DiceGroupSpec {
            kind: self.kind,
            count: self.count,
        }
    }
}
