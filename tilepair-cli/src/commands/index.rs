//! Dataset indexing CLI command.

use std::path::PathBuf;

use clap::Args;
use tilepair::{Identity, PairedTileDataset, Phase};

use crate::error::CliError;

/// Arguments for `tilepair index`.
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Dataset root containing the A/ and B/ domain trees
    pub root: PathBuf,

    /// Dataset split: train or validation
    #[arg(long, default_value = "train")]
    pub phase: String,

    /// Print every aligned tile with its path labels
    #[arg(long)]
    pub list: bool,
}

/// Run the index command.
pub fn run(args: IndexArgs) -> Result<(), CliError> {
    let phase: Phase = args
        .phase
        .parse()
        .map_err(|e: tilepair::PhaseParseError| CliError::InvalidPhase(e.to_string()))?;

    tracing::debug!(root = %args.root.display(), phase = %phase, "Building paired dataset");

    let dataset = PairedTileDataset::new(&args.root, phase, Identity)
        .map_err(|e| CliError::Index(e.to_string()))?;

    println!("Phase:         {}", phase);
    println!("Aligned pairs: {}", dataset.len());

    if args.list {
        for i in 0..dataset.len() {
            if let Some((a, b)) = dataset.pair(i) {
                println!(
                    "  {}  A: {}  B: {}",
                    a.coord,
                    a.path.display(),
                    b.path.display()
                );
            }
        }
    }

    Ok(())
}
