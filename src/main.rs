//! Noise Before Defeat CLI - run, script, and inspect matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Noise Before Defeat - a simultaneous-turn tactics engine
#[derive(Parser, Debug)]
#[command(name = "nbd")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a built-in scripted skirmish showing every action kind
    Demo {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run a match from a JSON action script
    Run {
        /// Script file (JSON: player names plus per-turn action lists)
        #[arg(required = true)]
        script: std::path::PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save the final match snapshot to a file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Suppress turn-by-turn output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Inspect a saved match snapshot
    Inspect {
        /// Snapshot file (JSON, as produced by `run --save`)
        #[arg(required = true)]
        snapshot: std::path::PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Demo { format } => cli::demo::execute(format),

        Commands::Run {
            script,
            format,
            save,
            quiet,
        } => cli::run::execute(&script, format, save, quiet),

        Commands::Inspect { snapshot, format } => cli::inspect::execute(&snapshot, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
