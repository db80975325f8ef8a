//! CLI error types.

use std::fmt;

/// Errors reported to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// The --phase argument was not a recognized split name.
    InvalidPhase(String),

    /// Building or reading the paired dataset failed.
    Index(String),

    /// The reorganization copy failed.
    Unflatten(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidPhase(msg) => write!(f, "{}", msg),
            CliError::Index(msg) => write!(f, "Failed to index dataset: {}", msg),
            CliError::Unflatten(msg) => write!(f, "Failed to unflatten directory: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}
