//! Dice engine for Rollbook.
//!
//! Rolls polyhedral dice groups into history records, renders canonical
//! expressions such as `2d6 + 1d4 + 3`, and tells predefined rolls apart
//! from custom ones by matching against preset catalogs.

pub mod catalog;
pub mod dice;
pub mod error;
pub mod format;
pub mod matcher;
pub mod roll;
pub mod selection;

pub use catalog::{NamedRollPreset, RollCategory};
pub use dice::{DiceGroupResult, DiceGroupSpec, DiceKind, RandomSource, StdRandom};
pub use error::{CoreError, CoreResult};
pub use format::{describe_results, format_expression};
pub use matcher::{find_match, is_predefined};
pub use roll::{Roll, RollGenerator};
pub use selection::DiceSelection;
