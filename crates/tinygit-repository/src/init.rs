use std::fs;
use std::path::Path;

use crate::{DiscoveredRepo, RepoError};

/// Branch `HEAD` points at in a fresh repository.
pub const DEFAULT_BRANCH: &str = "main";

/// Whether `init` created a repository or found one already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    Created,
    Reinitialized,
}

/// Initialize a repository rooted at `path`.
///
/// Creates the standard `.git/` structure:
/// - HEAD (pointing to the default branch)
/// - objects/
/// - refs/
///
/// Existing files are never overwritten; missing directories are filled in.
pub fn init_repository(path: &Path) -> Result<(DiscoveredRepo, InitStatus), RepoError> {
    let path = if path.is_relative() {
        std::env::current_dir()?.join(path)
    } else {
        path.to_path_buf()
    };
    let git_dir = path.join(".git");

    let status = if git_dir.join("HEAD").is_file() {
        InitStatus::Reinitialized
    } else {
        InitStatus::Created
    };

    fs::create_dir_all(git_dir.join("objects"))?;
    fs::create_dir_all(git_dir.join("refs"))?;

    if status == InitStatus::Created {
        fs::write(
            git_dir.join("HEAD"),
            format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
        )?;
    }

    let git_dir = fs::canonicalize(&git_dir)?;
    let work_tree = fs::canonicalize(&path)?;
    tracing::debug!(git_dir = %git_dir.display(), ?status, "initialized repository");

    Ok((
        DiscoveredRepo {
            git_dir,
            work_tree: Some(work_tree),
        },
        status,
    ))
}
