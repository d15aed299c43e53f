//! Per-kind dice counters for building a multi-group roll.

use crate::dice::{DiceGroupSpec, DiceKind};
use crate::format::format_expression;

/// Highest count a single selector accepts.
pub const MAX_COUNT: u32 = 100;

/// One counter per die kind, all starting at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceSelection {
    counts: [u32; DiceKind::ALL.len()],
}

impl Default for DiceSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceSelection {
    /// An empty selection.
    pub fn new() -> Self {
        Self {
            counts: [0; DiceKind::ALL.len()],
        }
    }

    fn index(kind: DiceKind) -> usize {
        DiceKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or_default()
    }

    /// Current count for `kind`.
    pub fn count(&self, kind: DiceKind) -> u32 {
        self.counts[Self::index(kind)]
    }

    /// Set the count for `kind`, clamped to `0..=MAX_COUNT`.
    pub fn set_count(&mut self, kind: DiceKind, count: i64) {
        let clamped = count.clamp(0, i64::from(MAX_COUNT));
        self.counts[Self::index(kind)] = u32::try_from(clamped).unwrap_or_default();
    }

    /// Add to the count for `kind`, clamped like [`set_count`](Self::set_count).
    pub fn add(&mut self, kind: DiceKind, count: i64) {
        let current = i64::from(self.count(kind));
        self.set_count(kind, current.saturating_add(count));
    }

    /// Reset every counter to zero.
    pub fn clear(&mut self) {
        self.counts = [0; DiceKind::ALL.len()];
    }

    /// Non-zero groups, smallest die first.
    pub fn active(&self) -> Vec<DiceGroupSpec> {
        DiceKind::ALL
            .iter()
            .zip(self.counts)
            .filter(|&(_, count)| count > 0)
            .map(|(&kind, count)| DiceGroupSpec::new(kind, count))
            .collect()
    }

    /// Whether any counter is above zero.
    pub fn has_active(&self) -> bool {
        self.counts.iter().any(|&c| c > 0)
    }

    /// The expression a roll of this selection would carry.
    pub fn preview(&self, modifier: i32) -> String {
        format_expression(&self.active(), modifier)
    }
}
