use std::ffi::OsString;
use std::path::PathBuf;

use crate::RepoError;

/// Repository metadata directory, bypassing discovery.
pub const DIR_VAR: &str = "TINYGIT_DIR";
/// Objects root, replacing `<git-dir>/objects`.
pub const OBJECT_DIRECTORY_VAR: &str = "TINYGIT_OBJECT_DIRECTORY";
/// Zlib level for newly written objects.
pub const COMPRESSION_VAR: &str = "TINYGIT_COMPRESSION";

/// Environment variable overrides for repository operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// TINYGIT_DIR override
    pub git_dir: Option<PathBuf>,
    /// TINYGIT_OBJECT_DIRECTORY override
    pub object_directory: Option<PathBuf>,
    /// TINYGIT_COMPRESSION, already validated to 0..=9
    pub compression: Option<u32>,
}

impl EnvOverrides {
    /// Read all tinygit environment variables from the process environment.
    pub fn from_env() -> Result<Self, RepoError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Read overrides through an arbitrary lookup function.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RepoError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let compression = match get(COMPRESSION_VAR) {
            Some(raw) => Some(parse_compression(&raw)?),
            None => None,
        };

        Ok(Self {
            git_dir: get(DIR_VAR).map(PathBuf::from),
            object_directory: get(OBJECT_DIRECTORY_VAR).map(PathBuf::from),
            compression,
        })
    }
}

fn parse_compression(raw: &OsString) -> Result<u32, RepoError> {
    let invalid = |reason: &str| RepoError::InvalidConfig {
        var: COMPRESSION_VAR,
        value: raw.to_string_lossy().into_owned(),
        reason: reason.to_owned(),
    };
    let text = raw.to_str().ok_or_else(|| invalid("not valid UTF-8"))?;
    let level: u32 = text
        .trim()
        .parse()
        .map_err(|_| invalid("expected an integer"))?;
    if level > 9 {
        return Err(invalid("level must be between 0 and 9"));
    }
    Ok(level)
}
