//! Named roll presets and the built-in catalog.
//!
//! The built-in catalog groups common D&D 5e damage and healing rolls into
//! categories. It is read-only; user presets live in a separate store.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceGroupSpec, DiceKind};
use crate::error::{CoreError, CoreResult};

/// A named combination of dice and a modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRollPreset {
    /// Display name; unique within the built-in catalog.
    pub name: String,
    /// Dice to roll, in order.
    pub dice: Vec<DiceGroupSpec>,
    /// Flat bonus or penalty.
    pub modifier: i32,
    /// Short rules reminder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NamedRollPreset {
    /// Create a preset without a description.
    pub fn new(name: impl Into<String>, dice: Vec<DiceGroupSpec>, modifier: i32) -> Self {
        Self {
            name: name.into(),
            dice,
            modifier,
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A titled group of presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCategory {
    /// Category title, e.g. "Weapons".
    pub name: String,
    /// Presets in display order.
    pub rolls: Vec<NamedRollPreset>,
}

impl RollCategory {
    /// Create a category.
    pub fn new(name: impl Into<String>, rolls: Vec<NamedRollPreset>) -> Self {
        Self {
            name: name.into(),
            rolls,
        }
    }
}

/// The built-in catalog, in display order.
pub fn builtin() -> Vec<RollCategory> {
    vec![
        weapons(),
        spells(),
        healing_spells(),
        class_features(),
        monster_abilities(),
    ]
}

/// Find a preset by name (case-insensitive) across categories.
pub fn find_preset<'a>(
    categories: &'a [RollCategory],
    name: &str,
) -> CoreResult<&'a NamedRollPreset> {
    let wanted = name.trim().to_lowercase();
    categories
        .iter()
        .flat_map(|category| category.rolls.iter())
        .find(|preset| preset.name.to_lowercase() == wanted)
        .ok_or_else(|| CoreError::PresetNotFound(name.trim().to_string()))
}

fn preset(name: &str, dice: &[(DiceKind, u32)], modifier: i32) -> NamedRollPreset {
    NamedRollPreset::new(
        name,
        dice.iter()
            .map(|&(kind, count)| DiceGroupSpec::new(kind, count))
            .collect(),
        modifier,
    )
}

/// Weapon damage dice.
fn weapons() -> RollCategory {
    RollCategory::new(
        "Weapons",
        vec![
            preset("Dagger", &[(DiceKind::D4, 1)], 0),
            preset("Shortsword", &[(DiceKind::D6, 1)], 0),
            preset("Longsword", &[(DiceKind::D8, 1)], 0),
            preset("Greatsword", &[(DiceKind::D6, 2)], 0),
            preset("Rapier", &[(DiceKind::D8, 1)], 0),
            preset("Greataxe", &[(DiceKind::D12, 1)], 0),
            preset("Light Crossbow", &[(DiceKind::D8, 1)], 0),
            preset("Heavy Crossbow", &[(DiceKind::D10, 1)], 0),
            preset("Longbow", &[(DiceKind::D8, 1)], 0),
            preset("Maul", &[(DiceKind::D6, 2)], 0),
        ],
    )
}

/// Damage spells at their base slot level.
fn spells() -> RollCategory {
    RollCategory::new(
        "Spells",
        vec![
            preset("Fireball (3rd)", &[(DiceKind::D6, 8)], 0).with_description("DEX save for half"),
            preset("Lightning Bolt (3rd)", &[(DiceKind::D6, 8)], 0)
                .with_description("DEX save for half"),
            preset("Magic Missile (1st)", &[(DiceKind::D4, 3)], 3)
                .with_description("3 missiles, 1d4+1 each"),
            preset("Scorching Ray (2nd)", &[(DiceKind::D6, 2)], 0)
                .with_description("Per ray (3 rays)"),
            preset("Eldritch Blast", &[(DiceKind::D10, 1)], 0).with_description("Per beam"),
            preset("Guiding Bolt (1st)", &[(DiceKind::D6, 4)], 0),
            preset("Inflict Wounds (1st)", &[(DiceKind::D10, 3)], 0),
            preset("Spiritual Weapon (2nd)", &[(DiceKind::D8, 1)], 0),
            preset("Disintegrate (6th)", &[(DiceKind::D6, 10)], 40),
        ],
    )
}

/// Healing spells; most add the caster's spellcasting modifier on top.
fn healing_spells() -> RollCategory {
    RollCategory::new(
        "Healing Spells",
        vec![
            preset("Cure Wounds (1st)", &[(DiceKind::D8, 1)], 0).with_description("+spell mod"),
            preset("Cure Wounds (2nd)", &[(DiceKind::D8, 2)], 0).with_description("+spell mod"),
            preset("Cure Wounds (3rd)", &[(DiceKind::D8, 3)], 0).with_description("+spell mod"),
            preset("Healing Word (1st)", &[(DiceKind::D4, 1)], 0).with_description("+spell mod"),
            preset("Healing Word (2nd)", &[(DiceKind::D4, 2)], 0).with_description("+spell mod"),
            preset("Heal (6th)", &[(DiceKind::D8, 7)], 0),
            preset("Mass Cure Wounds (5th)", &[(DiceKind::D8, 3)], 0)
                .with_description("+spell mod each"),
        ],
    )
}

/// Damage riders and resources granted by class features.
fn class_features() -> RollCategory {
    RollCategory::new(
        "Class Features",
        vec![
            preset("Sneak Attack (1st-2nd)", &[(DiceKind::D6, 1)], 0),
            preset("Sneak Attack (3rd-4th)", &[(DiceKind::D6, 2)], 0),
            preset("Sneak Attack (5th-6th)", &[(DiceKind::D6, 3)], 0),
            preset("Sneak Attack (7th-8th)", &[(DiceKind::D6, 4)], 0),
            preset("Divine Smite (1st)", &[(DiceKind::D8, 2)], 0)
                .with_description("+1d8 vs undead/fiend"),
            preset("Divine Smite (2nd)", &[(DiceKind::D8, 3)], 0)
                .with_description("+1d8 vs undead/fiend"),
            preset("Divine Smite (3rd)", &[(DiceKind::D8, 4)], 0)
                .with_description("+1d8 vs undead/fiend"),
            preset("Rage Damage (+2)", &[], 2),
            preset("Bardic Inspiration (d6)", &[(DiceKind::D6, 1)], 0),
            preset("Bardic Inspiration (d8)", &[(DiceKind::D8, 1)], 0),
        ],
    )
}

/// Common monster attacks and breath weapons.
fn monster_abilities() -> RollCategory {
    RollCategory::new(
        "Monster Abilities",
        vec![
            preset("Bite (Medium Beast)", &[(DiceKind::D6, 1)], 0),
            preset("Bite (Large Beast)", &[(DiceKind::D8, 1)], 0),
            preset("Claw Attack", &[(DiceKind::D4, 1)], 0),
            preset("Young Dragon Breath", &[(DiceKind::D6, 8)], 0)
                .with_description("DEX save for half"),
            preset("Adult Dragon Breath", &[(DiceKind::D6, 12)], 0)
                .with_description("DEX save for half"),
            preset("Troll Claw", &[(DiceKind::D6, 1)], 4),
            preset("Owlbear Claw", &[(DiceKind::D8, 2)], 0),
            preset("Giant Slam", &[(DiceKind::D6, 3)], 0),
        ],
    )
}
