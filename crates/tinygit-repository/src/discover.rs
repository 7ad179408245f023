use std::path::{Path, PathBuf};

use crate::env::EnvOverrides;
use crate::{DiscoveredRepo, RepoError};

/// Discover a repository by walking up from `start`.
///
/// 1. If `TINYGIT_DIR` is set, use it directly.
/// 2. Otherwise walk up from `start` to the first directory with a `.git/HEAD`.
pub fn discover_git_dir_with_env(
    start: &Path,
    env: &EnvOverrides,
) -> Result<DiscoveredRepo, RepoError> {
    if let Some(ref git_dir) = env.git_dir {
        let git_dir = if git_dir.is_absolute() {
            git_dir.clone()
        } else {
            start.join(git_dir)
        };
        return open_git_dir(&git_dir);
    }

    let start =
        std::fs::canonicalize(start).map_err(|_| RepoError::NotFound(start.to_path_buf()))?;

    let mut current = start.as_path();
    loop {
        let dot_git = current.join(".git");
        tracing::trace!(candidate = %dot_git.display(), "probing for repository");

        if is_git_dir(&dot_git) {
            return Ok(DiscoveredRepo {
                git_dir: dot_git,
                work_tree: Some(current.to_path_buf()),
            });
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(RepoError::NotFound(start)),
        }
    }
}

/// Open a known git directory path directly.
pub fn open_git_dir(git_dir: &Path) -> Result<DiscoveredRepo, RepoError> {
    let git_dir = std::fs::canonicalize(git_dir)
        .map_err(|_| RepoError::NotFound(git_dir.to_path_buf()))?;

    if !is_git_dir(&git_dir) {
        return Err(RepoError::InvalidGitDir {
            path: git_dir,
            reason: "missing HEAD".to_string(),
        });
    }

    // A `.git` directory inside a working tree; anything else is bare.
    let work_tree = match git_dir.parent() {
        Some(parent) if git_dir.file_name() == Some(std::ffi::OsStr::new(".git")) => {
            Some(parent.to_path_buf())
        }
        _ => None,
    };

    Ok(DiscoveredRepo { git_dir, work_tree })
}

/// Check if a directory looks like a git dir.
pub fn is_git_dir(path: &Path) -> bool {
    path.join("HEAD").is_file()
}

/// The directory holding the loose objects of `git_dir`.
pub fn objects_dir(git_dir: &Path, env: &EnvOverrides) -> PathBuf {
    env.object_directory
        .clone()
        .unwrap_or_else(|| git_dir.join("objects"))
}
