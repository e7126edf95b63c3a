//! questionary CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "questionary", version, about = "Quiz format parser and statistics tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate questionary files
    Validate {
        /// Path to a .quiz file or a directory of them
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create starter config and a sample quiz
    Init,

    /// Fold a completed quiz result into the statistics
    Record {
        /// The quiz document the result belongs to
        #[arg(long)]
        quiz: PathBuf,

        /// Result record JSON
        #[arg(long)]
        result: PathBuf,

        /// Statistics file (overrides config)
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Show cumulative statistics
    Stats {
        /// Statistics file (overrides config)
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Export a result record
    Export {
        /// Result record JSON
        #[arg(long)]
        result: PathBuf,

        /// Output format: json, csv
        #[arg(long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Merge a statistics export into the current statistics
    Import {
        /// Statistics JSON previously produced by `stats --format json`
        #[arg(long)]
        file: PathBuf,

        /// Replace the current statistics instead of merging
        #[arg(long)]
        replace: bool,

        /// Statistics file (overrides config)
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Clear all statistics
    Reset {
        /// Statistics file (overrides config)
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("questionary=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
        Commands::Record {
            quiz,
            result,
            stats,
        } => commands::record::execute(quiz, result, stats),
        Commands::Stats { stats, format } => commands::stats::execute(stats, format),
        Commands::Export {
            result,
            format,
            output,
        } => commands::export::execute(result, format, output),
        Commands::Import {
            file,
            replace,
            stats,
        } => commands::import::execute(file, replace, stats),
        Commands::Reset { stats, yes } => commands::reset::execute(stats, yes),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
