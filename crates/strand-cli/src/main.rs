//! CLI frontend for the Strand interactive fiction engine.

mod commands;
mod demo;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "strand",
    about = "An engine for choice-based interactive fiction",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the built-in demo story interactively
    Play {
        /// RNG seed for reproducible choice sampling
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Write the game to this save file on 'save' or 'quit'
        #[arg(long)]
        save: Option<PathBuf>,

        /// Restore the game from this save file before playing
        #[arg(long)]
        load: Option<PathBuf>,
    },

    /// List the demo story's situations and qualities
    Info,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { seed, save, load } => {
            commands::play::run(seed, save.as_deref(), load.as_deref())
        }
        Commands::Info => commands::info::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
