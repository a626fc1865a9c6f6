//! Légume CLI.
//!
//! Build the rotation table from stored settings, tweak it from the command
//! line, and keep the settings around for the next run.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use legume::settings::random_seed;
use legume::{heading, load_settings, save_settings, Settings, SettingsStore};
use rotation_kernel::generate;

#[derive(Parser)]
#[command(name = "legume")]
#[command(about = "Fair, reproducible rotation tables for an evening of slots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings store file
    #[arg(long, env = "LEGUME_STORE", default_value = "legume-settings.json")]
    store: PathBuf,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and print the table.
    Generate {
        #[command(flatten)]
        overrides: Overrides,
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
        /// Store the settings used for this table
        #[arg(long)]
        save: bool,
    },

    /// Draw and store a new random seed.
    Reseed,

    /// Replace the candidates with a fresh draw from the vegetable vocabulary.
    Reroll,

    /// Print the stored settings.
    Show,
}

#[derive(Args)]
struct Overrides {
    /// Start time (HH:MM)
    #[arg(long)]
    start: Option<String>,
    /// End time (HH:MM); at or before the start means the next day
    #[arg(long)]
    end: Option<String>,
    /// Slot duration in minutes
    #[arg(short, long, allow_negative_numbers = true)]
    duration: Option<i64>,
    /// Random seed
    #[arg(short, long)]
    seed: Option<u32>,
    /// Pair probability in percent (0-100)
    #[arg(short, long)]
    mix: Option<u32>,
    /// Candidate (repeat for each one); replaces the stored list
    #[arg(short, long = "candidate")]
    candidates: Vec<String>,
    /// Replace the last slot with the closing marker
    #[arg(long)]
    end_with_all: Option<bool>,
}

impl Overrides {
    fn apply(self, settings: &mut Settings) {
        if let Some(start) = self.start {
            settings.start_time = start;
        }
        if let Some(end) = self.end {
            settings.end_time = end;
        }
        if let Some(duration) = self.duration {
            settings.duration = duration;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(mix) = self.mix {
            settings.mix = mix;
        }
        if !self.candidates.is_empty() {
            settings.candidates = self.candidates.join("\n");
        }
        if let Some(end_with_all) = self.end_with_all {
            settings.end_with_all = end_with_all;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so tables can be piped
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = SettingsStore::new(&cli.store);

    match cli.command {
        Commands::Generate {
            overrides,
            json,
            save,
        } => {
            let mut settings = load_settings(&store);
            overrides.apply(&mut settings);

            let config = settings.to_generation_config()?;
            let table = generate(&config)?;

            if save {
                save_settings(&store, &settings)?;
                info!(store = %store.path().display(), "Settings saved");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                println!("{}\n", heading(settings.seed));
                if table.is_empty() {
                    println!("Add at least three different candidates to build a table.");
                } else {
                    print!("{}", table);
                }
            }
        }

        Commands::Reseed => {
            let mut settings = load_settings(&store);
            settings.seed = random_seed();
            save_settings(&store, &settings)?;
            println!("{}", settings.seed);
        }

        Commands::Reroll => {
            let mut settings = load_settings(&store);
            settings.reroll_candidates();
            save_settings(&store, &settings)?;
            println!("{}", settings.candidates);
        }

        Commands::Show => {
            let settings = load_settings(&store);
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
