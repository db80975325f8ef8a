//! TilePair CLI - Command-line interface
//!
//! This binary pairs slippy-map tile directory trees for translation
//! training and reorganizes flat `z_x_y.png` exports into nested tile trees.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tilepair", version, about = "Pair slippy-map tile directories for image-to-image translation training")]
struct Cli {
    /// Log filter, e.g. 'debug' or 'tilepair=trace' (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Index a paired tile dataset and report the aligned pairs
    Index(commands::index::IndexArgs),
    /// Copy a flat directory of underscore-named files into a nested tree
    Unflatten(commands::unflatten::UnflattenArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = match cli.command {
        Command::Index(args) => commands::index::run(args),
        Command::Unflatten(args) => commands::unflatten::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the global tracing subscriber.
///
/// Precedence: `--log-level`, then `RUST_LOG`, then `info`. Logs go to
/// stderr so command output stays pipeable.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
