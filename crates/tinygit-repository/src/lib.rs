//! Repository discovery, initialization, and access to the object store.

mod discover;
mod env;
mod error;
mod init;

pub use env::{EnvOverrides, COMPRESSION_VAR, DIR_VAR, OBJECT_DIRECTORY_VAR};
pub use error::RepoError;
pub use init::{InitStatus, DEFAULT_BRANCH};

use std::path::{Path, PathBuf};

use tinygit_loose::LooseObjectStore;

/// Result of repository discovery before full opening.
#[derive(Debug)]
pub struct DiscoveredRepo {
    pub git_dir: PathBuf,
    pub work_tree: Option<PathBuf>,
}

/// A repository: its metadata directory and its object store.
#[derive(Debug, Clone)]
pub struct Repository {
    /// Path to the .git directory.
    git_dir: PathBuf,
    /// Path to the working tree (None for bare layouts).
    work_tree: Option<PathBuf>,
    /// Loose object store.
    odb: LooseObjectStore,
}

impl Repository {
    /// Open an existing repository at the given path.
    ///
    /// `path` should point to either the `.git` directory or the working tree root.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        Self::open_with_env(path, &EnvOverrides::from_env()?)
    }

    pub fn open_with_env(path: impl AsRef<Path>, env: &EnvOverrides) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let discovered = if discover::is_git_dir(path) {
            discover::open_git_dir(path)?
        } else if discover::is_git_dir(&path.join(".git")) {
            discover::open_git_dir(&path.join(".git"))?
        } else {
            return Err(RepoError::NotFound(path.to_path_buf()));
        };
        Self::from_discovered(discovered, env)
    }

    /// Discover a repository starting from the given directory, walking up.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        Self::discover_with_env(start, &EnvOverrides::from_env()?)
    }

    /// Discover with explicit environment overrides.
    pub fn discover_with_env(
        start: impl AsRef<Path>,
        env: &EnvOverrides,
    ) -> Result<Self, RepoError> {
        let discovered = discover::discover_git_dir_with_env(start.as_ref(), env)?;
        Self::from_discovered(discovered, env)
    }

    /// Initialize a repository at the given path, or report that one exists.
    pub fn init(path: impl AsRef<Path>) -> Result<(Self, InitStatus), RepoError> {
        Self::init_with_env(path, &EnvOverrides::from_env()?)
    }

    pub fn init_with_env(
        path: impl AsRef<Path>,
        env: &EnvOverrides,
    ) -> Result<(Self, InitStatus), RepoError> {
        let (discovered, status) = init::init_repository(path.as_ref())?;
        Ok((Self::from_discovered(discovered, env)?, status))
    }

    fn from_discovered(discovered: DiscoveredRepo, env: &EnvOverrides) -> Result<Self, RepoError> {
        let DiscoveredRepo { git_dir, work_tree } = discovered;

        let mut odb = LooseObjectStore::open(discover::objects_dir(&git_dir, env));
        if let Some(level) = env.compression {
            odb.set_compression_level(level);
        }
        tracing::debug!(
            git_dir = %git_dir.display(),
            objects = %odb.objects_dir().display(),
            "opened repository"
        );

        Ok(Repository {
            git_dir,
            work_tree,
            odb,
        })
    }

    /// Path to the .git directory.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Path to the working tree, if the git dir is a `.git` inside one.
    pub fn work_tree(&self) -> Option<&Path> {
        self.work_tree.as_deref()
    }

    /// Access the object store.
    pub fn odb(&self) -> &LooseObjectStore {
        &self.odb
    }
}
