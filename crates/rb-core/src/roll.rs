//! Roll records and the generator that produces them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::NamedRollPreset;
use crate::dice::{DiceGroupResult, DiceGroupSpec, DiceKind, RandomSource, StdRandom};
use crate::format::format_expression;

/// One completed roll, as shown in and persisted to the history.
///
/// `total` always equals `modifier` plus the sum of every group's results,
/// and `expression` is exactly what [`format_expression`] yields for the
/// groups and modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roll {
    /// Unique identifier (a v4 UUID).
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Rolled groups in the order they were requested.
    #[serde(rename = "diceGroups")]
    pub groups: Vec<DiceGroupResult>,
    /// Sum of all die results plus the modifier.
    pub total: i64,
    /// Flat bonus or penalty.
    pub modifier: i32,
    /// Canonical expression, e.g. `2d6 + 1d4 + 3`.
    pub expression: String,
    /// Preset name, when rolled from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the dice did not match any preset at roll time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_custom: Option<bool>,
}

impl Roll {
    /// Build a roll from already-rolled groups, deriving total and expression.
    pub fn assemble(
        id: String,
        timestamp: i64,
        groups: Vec<DiceGroupResult>,
        modifier: i32,
    ) -> Self {
        let total = groups.iter().map(DiceGroupResult::sum).sum::<i64>() + i64::from(modifier);
        let specs: Vec<DiceGroupSpec> = groups.iter().map(DiceGroupResult::spec).collect();
        let expression = format_expression(&specs, modifier);
        Self {
            id,
            timestamp,
            groups,
            total,
            modifier,
            expression,
            name: None,
            is_custom: None,
        }
    }

    /// The dice that were requested, without results.
    pub fn specs(&self) -> Vec<DiceGroupSpec> {
        self.groups.iter().map(DiceGroupResult::spec).collect()
    }

    /// Timestamp as a UTC date-time, if it is in range.
    pub fn rolled_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Whether the stored total matches the groups and modifier.
    pub fn is_consistent(&self) -> bool {
        let sum: i64 = self.groups.iter().map(DiceGroupResult::sum).sum();
        self.total == sum + i64::from(self.modifier)
            && self.expression == format_expression(&self.specs(), self.modifier)
            && self.groups.iter().all(|g| {
                g.results.len() == g.count as usize
                    && g.results.iter().all(|v| (1..=g.kind.sides()).contains(v))
            })
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, self.total)
    }
}

/// Rolls dice groups into [`Roll`] records.
#[derive(Debug, Clone, Default)]
pub struct RollGenerator<R = StdRandom> {
    source: R,
}

impl<R: RandomSource> RollGenerator<R> {
    /// Create a generator drawing from `source`.
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Roll `count` dice of one kind.
    ///
    /// Always yields exactly one group, which is empty when `count` is zero.
    /// The custom flag is left unset.
    pub fn roll_single(&mut self, kind: DiceKind, count: u32, modifier: i32) -> Roll {
        let group = DiceGroupSpec::new(kind, count).roll(&mut self.source);
        Self::stamp(vec![group], modifier)
    }

    /// Roll several groups at once.
    ///
    /// Groups with a zero count are dropped; the rest keep their order.
    /// With nothing left the roll is just the modifier.
    pub fn roll_multiple(
        &mut self,
        specs: &[DiceGroupSpec],
        modifier: i32,
        is_custom: bool,
    ) -> Roll {
        let groups = specs
            .iter()
            .filter(|spec| !spec.is_empty())
            .map(|spec| spec.roll(&mut self.source))
            .collect();
        let mut roll = Self::stamp(groups, modifier);
        roll.is_custom = Some(is_custom);
        roll
    }

    /// Roll the same dice and modifier again as a fresh entry.
    ///
    /// A single-group roll goes through [`roll_single`](Self::roll_single),
    /// anything else through [`roll_multiple`](Self::roll_multiple).
    pub fn reroll(&mut self, original: &Roll) -> Roll {
        match original.groups.as_slice() {
            [group] => self.roll_single(group.kind, group.count, original.modifier),
            groups => {
                let specs: Vec<DiceGroupSpec> = groups.iter().map(DiceGroupResult::spec).collect();
                self.roll_multiple(&specs, original.modifier, false)
            }
        }
    }

    /// Roll a named preset, carrying its name onto the roll.
    pub fn roll_preset(&mut self, preset: &NamedRollPreset) -> Roll {
        let mut roll = self.roll_multiple(&preset.dice, preset.modifier, false);
        roll.name = Some(preset.name.clone());
        roll
    }

    fn stamp(groups: Vec<DiceGroupResult>, modifier: i32) -> Roll {
        Roll::assemble(
            uuid::Uuid::new_v4().to_string(),
            Utc::now().timestamp_millis(),
            groups,
            modifier,
        )
    }
}
