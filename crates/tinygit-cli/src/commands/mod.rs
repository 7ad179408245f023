pub mod cat_file;
pub mod hash_object;
pub mod init;
pub mod ls_tree;
pub mod mktree;

use std::io::{BufRead, Write};

use anyhow::Result;
use bstr::ByteSlice;
use clap::Subcommand;
use tinygit_hash::ObjectId;
use tinygit_object::{FileMode, TreeEntry};
use tinygit_repository::{EnvOverrides, Repository};

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty repository or reinitialize an existing one
    Init(init::InitArgs),
    /// Compute object ids and optionally store objects
    HashObject(hash_object::HashObjectArgs),
    /// Provide content, type or size information for stored objects
    CatFile(cat_file::CatFileArgs),
    /// List the contents of a tree object
    LsTree(ls_tree::LsTreeArgs),
    /// Build a tree object from ls-tree formatted text
    Mktree(mktree::MktreeArgs),
}

/// Open the repository for the current invocation, honoring `--git-dir`.
pub fn open_repo(cli: &Cli) -> Result<Repository> {
    let env = EnvOverrides::from_env()?;
    let repo = if let Some(ref git_dir) = cli.git_dir {
        Repository::open_with_env(git_dir, &env)?
    } else {
        Repository::discover_with_env(".", &env)?
    };
    Ok(repo)
}

/// Resolve a full or abbreviated hex id against the store.
pub fn resolve_object(repo: &Repository, name: &str) -> Result<ObjectId> {
    Ok(repo.odb().resolve_prefix(name)?)
}

pub fn run(cli: &Cli, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args, cli, out),
        Commands::HashObject(args) => hash_object::run(args, cli, input, out),
        Commands::CatFile(args) => cat_file::run(args, cli, out),
        Commands::LsTree(args) => ls_tree::run(args, cli, out),
        Commands::Mktree(args) => mktree::run(args, cli, input, out),
    }
}

/// Type name shown for an entry: what kind of object its mode points at.
pub fn entry_type_name(entry: &TreeEntry) -> &'static str {
    match entry.file_mode() {
        Some(FileMode::Tree) => "tree",
        Some(FileMode::Gitlink) => "commit",
        _ => "blob",
    }
}

/// Write one tree entry as `<mode> SP <type> SP <hex> TAB <name> LF`.
///
/// Names are written as raw bytes.
pub fn write_tree_entry(out: &mut dyn Write, entry: &TreeEntry, name_only: bool) -> Result<()> {
    if !name_only {
        match entry.file_mode() {
            Some(mode) => write!(out, "{:06o}", mode.raw())?,
            None => out.write_all(&entry.mode)?,
        }
        write!(out, " {} {}\t", entry_type_name(entry), entry.oid)?;
    }
    out.write_all(entry.name.as_bytes())?;
    writeln!(out)?;
    Ok(())
}
