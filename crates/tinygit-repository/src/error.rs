use std::path::PathBuf;

use tinygit_loose::LooseError;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a tinygit repository (or any of the parent directories): {0}")]
    NotFound(PathBuf),

    #[error("invalid git directory: {path}: {reason}")]
    InvalidGitDir { path: PathBuf, reason: String },

    #[error("invalid value for {var}: '{value}': {reason}")]
    InvalidConfig {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Loose(#[from] LooseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
