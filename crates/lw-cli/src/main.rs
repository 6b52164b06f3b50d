//! CLI frontend for the Lorewiki tournament engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lw",
    about = "Lorewiki tournament runner: bracket battles between roster entries",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a roster file and show the bracket it would produce
    Check {
        /// Roster file (JSON array of {"id", "title"})
        roster: PathBuf,
    },

    /// Shuffle a roster and show the first-round pairings
    Draw {
        /// Roster file (JSON array of {"id", "title"})
        roster: PathBuf,

        /// RNG seed for the shuffle
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Play a full tournament
    Run {
        /// Roster file (JSON array of {"id", "title"})
        roster: PathBuf,

        /// Win-probability file for simulated matches
        #[arg(short, long)]
        odds: Option<PathBuf>,

        /// RNG seed for the draw and simulation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Pick each winner interactively instead of simulating
        #[arg(short, long)]
        manual: bool,

        /// Print the final bracket as JSON
        #[arg(long)]
        json: bool,

        /// Only show this round's results (e.g. semifinals, qf, round-of-16)
        #[arg(short, long)]
        round: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { roster } => commands::check::run(&roster),
        Commands::Draw { roster, seed } => commands::draw::run(&roster, seed),
        Commands::Run {
            roster,
            odds,
            seed,
            manual,
            json,
            round,
        } => commands::run::run(&roster, odds.as_deref(), seed, manual, json, round.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
