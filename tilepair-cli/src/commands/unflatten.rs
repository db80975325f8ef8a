//! Reorganization CLI command.

use std::path::PathBuf;

use clap::Args;
use tilepair::unflatten;

use crate::error::CliError;

/// Arguments for `tilepair unflatten`.
#[derive(Debug, Args)]
pub struct UnflattenArgs {
    /// Flat source directory of underscore-delimited filenames
    pub src_dir: PathBuf,

    /// Target directory for the nested tree
    pub tar_dir: PathBuf,
}

/// Run the unflatten command.
pub fn run(args: UnflattenArgs) -> Result<(), CliError> {
    println!(
        "Unflattening {} into {}",
        args.src_dir.display(),
        args.tar_dir.display()
    );

    match unflatten(&args.src_dir, &args.tar_dir) {
        Ok(summary) => {
            println!(
                "Copied {} files ({} bytes)",
                summary.files_copied, summary.bytes_copied
            );
            Ok(())
        }
        Err(e) => Err(CliError::Unflatten(e.to_string())),
    }
}
