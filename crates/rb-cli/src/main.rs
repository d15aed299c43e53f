//! CLI frontend for the Rollbook dice roller.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use rb_core::selection::MAX_COUNT;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rb",
    about = "Rollbook: a D&D 5e dice roller with persistent history",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding history and saved rolls (default: $RB_DATA_DIR or ./.rollbook)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll dice of a single kind (default: one die)
    Quick {
        /// Die kind, e.g. d20
        die: String,

        /// Number of dice (0 to 100)
        #[arg(
            short = 'n',
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_COUNT))
        )]
        count: u32,

        /// Flat modifier added to the total
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,
    },

    /// Roll a combination of dice, e.g. `rb roll 2d6 1d4 -m 3`
    Roll {
        /// Dice groups such as 2d6 or d20; repeated kinds add up, at most 100 per kind
        #[arg(required = true)]
        dice: Vec<String>,

        /// Flat modifier added to the total
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,
    },

    /// Roll a built-in or saved preset by name
    Preset {
        /// Preset name (case-insensitive for built-ins)
        name: String,
    },

    /// Roll an earlier entry again as a new one
    Reroll {
        /// History position, 1 = most recent
        #[arg(default_value_t = 1)]
        index: usize,
    },

    /// Show the roll history, newest first
    History {
        /// Show at most this many rolls
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete the whole roll history
    Clear,

    /// Browse built-in presets and saved rolls
    Catalog {
        /// Only show this category
        category: Option<String>,
    },

    /// Save a roll from the history as a named preset
    Save {
        /// Name for the preset
        name: String,

        /// History position to save, 1 = most recent
        #[arg(short, long, default_value_t = 1)]
        from: usize,

        /// Short description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete every saved preset with this name
    Delete {
        /// Preset name
        name: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("RB_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".rollbook"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut session = commands::Session::open(&data_dir(cli.data_dir), cli.seed).await;

    let result = match cli.command {
        Commands::Quick {
            die,
            count,
            modifier,
        } => commands::roll::quick(&mut session, &die, count, modifier).await,
        Commands::Roll { dice, modifier } => {
            commands::roll::multi(&mut session, &dice, modifier).await
        }
        Commands::Preset { name } => commands::presets::roll(&mut session, &name).await,
        Commands::Reroll { index } => commands::history::reroll(&mut session, index).await,
        Commands::History { limit } => commands::history::show(&session, limit),
        Commands::Clear => commands::history::clear(&mut session).await,
        Commands::Catalog { category } => commands::presets::catalog(&session, category.as_deref()),
        Commands::Save {
            name,
            from,
            description,
        } => commands::presets::save(&session, &name, from, description),
        Commands::Delete { name } => commands::presets::delete(&session, &name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
