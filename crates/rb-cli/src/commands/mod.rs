pub mod history;
pub mod presets;
pub mod roll;

use std::path::Path;

use colored::Colorize;
use rb_core::{NamedRollPreset, Roll, RollCategory, RollGenerator, StdRandom, describe_results};
use rb_store::{
    Durability, FileKeyValueStore, HistoryStore, JsonlRecordStore, NamedRollStore, StoreConfig,
};
use tracing::{debug, warn};

/// Optional store configuration inside the data directory.
const CONFIG_FILE: &str = "config.json";

/// Everything a command needs: stores, generator, and the built-in catalog.
pub struct Session {
    pub history: HistoryStore<JsonlRecordStore, FileKeyValueStore>,
    pub named: NamedRollStore<FileKeyValueStore>,
    pub generator: RollGenerator<StdRandom>,
    pub catalog: Vec<RollCategory>,
}

impl Session {
    /// Open the stores under `dir` and load the history.
    pub async fn open(dir: &Path, seed: Option<u64>) -> Self {
        let config = load_config(dir);
        let kv = FileKeyValueStore::new(dir.join("local"));
        let history =
            HistoryStore::open(JsonlRecordStore::in_dir(dir), kv.clone(), config.clone()).await;
        let named = NamedRollStore::new(kv, &config);
        let source = seed.map_or_else(StdRandom::from_entropy, StdRandom::seeded);
        debug!(
            dir = %dir.display(),
            tier = ?history.active_tier(),
            rolls = history.len(),
            "session opened"
        );

        Self {
            history,
            named,
            generator: RollGenerator::new(source),
            catalog: rb_core::catalog::builtin(),
        }
    }

    /// Saved user presets.
    pub fn user_presets(&self) -> Vec<NamedRollPreset> {
        self.named.list()
    }

    /// Store a fresh roll and print it.
    pub async fn record(&mut self, roll: Roll) {
        print_roll(&roll);
        let durability = self.history.add(roll).await;
        report(durability);
    }

    /// The history entry at a 1-based position.
    pub fn nth(&self, index: usize) -> Result<&Roll, String> {
        if self.history.is_empty() {
            return Err("no rolls in history".into());
        }
        index
            .checked_sub(1)
            .and_then(|i| self.history.rolls().get(i))
            .ok_or_else(|| {
                format!(
                    "no roll at position {index} (history has {})",
                    self.history.len()
                )
            })
    }
}

fn load_config(dir: &Path) -> StoreConfig {
    let path = dir.join(CONFIG_FILE);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoreConfig::default(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "cannot read config, using defaults");
            return StoreConfig::default();
        }
    };
    StoreConfig::from_json(&raw).unwrap_or_else(|e| {
        warn!(error = %e, path = %path.display(), "invalid config, using defaults");
        StoreConfig::default()
    })
}

/// Print a roll: expression and total, then the individual dice.
fn print_roll(roll: &Roll) {
    let title = match &roll.name {
        Some(name) => format!("{name}: {}", roll.expression),
        None => roll.expression.clone(),
    };
    println!("  {} = {}", title, roll.total.to_string().bold().yellow());

    let breakdown = describe_results(roll);
    if !breakdown.is_empty() {
        println!("  {}", breakdown.dimmed());
    }
    if roll.is_custom == Some(true) {
        println!("  {}", "custom roll; keep it with `rb save <name>`".italic());
    }
}

fn report(durability: Durability) {
    debug!(?durability, "roll recorded");
    match durability {
        Durability::Primary => {}
        Durability::Fallback => {
            eprintln!("  {}", "note: history written to fallback storage".yellow());
        }
        Durability::Volatile => {
            eprintln!("  {}", "warning: history could not be saved".red());
        }
    }
}
