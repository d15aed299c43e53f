//! Structural matching of dice against preset catalogs.
//!
//! A candidate matches a preset when the modifiers are equal, both dice lists
//! have the same length, and every candidate group has some preset group with
//! the same kind and count. The per-element check is an existence test, not a
//! one-to-one pairing: `[1d6, 1d6]` matches a preset of `[1d6, 2d8]`.
//! Catalogs are small, so this is a plain linear scan.

use crate::catalog::{NamedRollPreset, RollCategory};
use crate::dice::DiceGroupSpec;

/// Whether `specs` + `modifier` structurally matches `preset`.
pub fn matches_preset(specs: &[DiceGroupSpec], modifier: i32, preset: &NamedRollPreset) -> bool {
    preset.modifier == modifier
        && preset.dice.len() == specs.len()
        && specs.iter().all(|spec| {
            preset
                .dice
                .iter()
                .any(|d| d.kind == spec.kind && d.count == spec.count)
        })
}

/// The first matching preset, searching the built-in catalog before the
/// user's own presets.
pub fn find_match<'a>(
    specs: &[DiceGroupSpec],
    modifier: i32,
    builtin: &'a [RollCategory],
    user: &'a [NamedRollPreset],
) -> Option<&'a NamedRollPreset> {
    builtin
        .iter()
        .flat_map(|category| category.rolls.iter())
        .chain(user.iter())
        .find(|preset| matches_preset(specs, modifier, preset))
}

/// Whether the dice match any preset in either catalog.
///
/// A roll that does not is "custom" and may be offered for saving.
pub fn is_predefined(
    specs: &[DiceGroupSpec],
    modifier: i32,
    builtin: &[RollCategory],
    user: &[NamedRollPreset],
) -> bool {
    find_match(specs, modifier, builtin, user).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::dice::DiceKind;

    fn spec(kind: DiceKind, count: u32) -> DiceGroupSpec {
        DiceGroupSpec::new(kind, count)
    }

    #[test]
    fn every_builtin_entry_matches_itself() {
        let builtin = catalog::builtin();
        for preset in builtin.iter().flat_map(|c| c.rolls.iter()) {
            assert!(
                is_predefined(&preset.dice, preset.modifier, &builtin, &[]),
                "{} did not match",
                preset.name
            );
        }
    }

    #[test]
    fn first_match_wins() {
        let builtin = catalog::builtin();
        let found = find_match(&[spec(DiceKind::D8, 1)], 0, &builtin, &[]).unwrap();
        assert_eq!(found.name, "Longsword");
    }

    #[test]
    fn modifier_must_match() {
        let builtin = catalog::builtin();
        assert!(!is_predefined(&[spec(DiceKind::D4, 3)], 2, &builtin, &[]));
        assert!(is_predefined(&[spec(DiceKind::D4, 3)], 3, &builtin, &[]));
    }

    #[test]
    fn length_must_match() {
        let preset = NamedRollPreset::new(
            "Pair",
            vec![spec(DiceKind::D6, 1), spec(DiceKind::D8, 1)],
            0,
        );
        assert!(!matches_preset(&[spec(DiceKind::D6, 1)], 0, &preset));
    }

    #[test]
    fn order_does_not_matter() {
        let preset = NamedRollPreset::new(
            "Pair",
            vec![spec(DiceKind::D6, 1), spec(DiceKind::D8, 2)],
            0,
        );
        assert!(matches_preset(&[spec(DiceKind::D8, 2), spec(DiceKind::D6, 1)], 0, &preset));
    }

    #[test]
    fn duplicate_candidates_can_share_one_preset_group() {
        let preset = NamedRollPreset::new(
            "Odd",
            vec![spec(DiceKind::D6, 1), spec(DiceKind::D8, 2)],
            0,
        );
        assert!(matches_preset(&[spec(DiceKind::D6, 1), spec(DiceKind::D6, 1)], 0, &preset));
    }

    #[test]
    fn user_catalog_is_searched() {
        let builtin = catalog::builtin();
        let candidate = [spec(DiceKind::D20, 2), spec(DiceKind::D4, 1)];
        assert!(!is_predefined(&candidate, 5, &builtin, &[]));

        let user = vec![NamedRollPreset::new("Smite+", candidate.to_vec(), 5)];
        let found = find_match(&candidate, 5, &builtin, &user).unwrap();
        assert_eq!(found.name, "Smite+");
    }

    #[test]
    fn empty_candidate_matches_modifier_only_preset() {
        let builtin = catalog::builtin();
        assert!(is_predefined(&[], 2, &builtin, &[]));
        assert!(!is_predefined(&[], 7, &builtin, &[]));
    }
}
