#![deny(clippy::all, clippy::pedantic)]
//! # Icegame Operator Tool
//!
//! Command-line companion to the loop environment. It reads the two
//! append-only logs a training run leaves behind, tails the loop-sites log
//! while a run is in progress, and checks configuration files before they
//! are handed to a run.

mod app;
mod watcher;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "icegame", version, about = "Inspect ice-model loop environment logs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize accepted loops.
    Loops {
        #[arg(long, default_value = "loop_sites.log")]
        log: PathBuf,
    },
    /// Print the most recent canvas snapshots.
    Renders {
        #[arg(long, default_value = "loop_renders.log")]
        log: PathBuf,
        #[arg(long, default_value_t = 1)]
        last: usize,
    },
    /// Follow the loop-sites log and report loops as they are accepted.
    Watch {
        #[arg(long, default_value = "loop_sites.log")]
        log: PathBuf,
    },
    /// Validate a configuration file and print the resolved settings.
    Config {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Loops { log } => app::loops(&log),
        Command::Renders { log, last } => app::renders(&log, last),
        Command::Watch { log } => watcher::follow(&log),
        Command::Config { path } => app::config(path.as_deref()),
    }
}
