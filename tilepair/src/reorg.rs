//! Flat-to-nested filename reorganization.
//!
//! Training exports sometimes land as a flat directory of files named
//! `18_1000_2000.png`; tile tooling wants them back as `18/1000/2000.png`.
//! [`unflatten`] copies every file in a source directory to a target tree,
//! turning each underscore in the filename into a path separator. This is a
//! plain byte copy with no format awareness.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from the reorganization copy.
#[derive(Debug, Error)]
pub enum ReorgError {
    /// The source directory does not exist or is not a directory.
    #[error("Source directory does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// I/O error while listing, creating directories, or copying.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a reorganization run accomplished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnflattenSummary {
    /// Number of files copied.
    pub files_copied: usize,
    /// Total bytes copied.
    pub bytes_copied: u64,
}

/// Copy every file in `src_dir` into `tar_dir`, mapping underscores in the
/// filename to directory separators.
///
/// `18_1000_2000.png` becomes `<tar_dir>/18/1000/2000.png`; a name without
/// underscores lands directly under `tar_dir`. Intermediate directories are
/// created as needed and existing destination files are overwritten.
/// Subdirectories of `src_dir` are skipped.
///
/// # Errors
///
/// Fails if `src_dir` is missing or any copy fails; files copied before the
/// failure stay in place.
pub fn unflatten(src_dir: &Path, tar_dir: &Path) -> Result<UnflattenSummary, ReorgError> {
    if !src_dir.is_dir() {
        return Err(ReorgError::SourceNotFound(src_dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(src_dir).map_err(|source| ReorgError::Io {
        path: src_dir.to_path_buf(),
        source,
    })?;

    let mut summary = UnflattenSummary::default();

    for entry in entries {
        let entry = entry.map_err(|source| ReorgError::Io {
            path: src_dir.to_path_buf(),
            source,
        })?;
        let src_path = entry.path();
        if !src_path.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::warn!(file = %src_path.display(), "Skipping non-UTF-8 filename");
            continue;
        };

        let mut dst_path = tar_dir.to_path_buf();
        for part in name.split('_') {
            dst_path.push(part);
        }

        if let Some(parent) = dst_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ReorgError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let bytes = std::fs::copy(&src_path, &dst_path).map_err(|source| ReorgError::Io {
            path: dst_path.clone(),
            source,
        })?;
        tracing::debug!(from = %src_path.display(), to = %dst_path.display(), "Copied");

        summary.files_copied += 1;
        summary.bytes_copied += bytes;
    }

    Ok(summary)
}
