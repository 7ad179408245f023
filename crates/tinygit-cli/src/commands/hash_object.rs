use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tinygit_hash::{Hasher, ObjectId};
use tinygit_object::{header, Object, ObjectType};
use tinygit_repository::Repository;

use crate::Cli;
use super::open_repo;

#[derive(Args)]
pub struct HashObjectArgs {
    /// Read the object from stdin
    #[arg(long)]
    stdin: bool,

    /// Actually write the object into the object store
    #[arg(short = 'w')]
    write: bool,

    /// Object type
    #[arg(short = 't', value_name = "type", default_value = "blob")]
    obj_type: String,

    /// Accept any well-formed type token and skip payload checks
    #[arg(long)]
    literally: bool,

    /// Files to hash
    #[arg(value_name = "file")]
    files: Vec<PathBuf>,
}

pub fn run(
    args: &HashObjectArgs,
    cli: &Cli,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<i32> {
    // We only need a repo if writing
    let repo = if args.write { Some(open_repo(cli)?) } else { None };

    if args.stdin {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        let oid = hash_and_maybe_write(args, &data, repo.as_ref())?;
        writeln!(out, "{oid}")?;
    }

    for file in &args.files {
        let data =
            std::fs::read(file).with_context(|| format!("could not read '{}'", file.display()))?;
        let oid = hash_and_maybe_write(args, &data, repo.as_ref())?;
        writeln!(out, "{oid}")?;
    }

    Ok(0)
}

fn hash_and_maybe_write(
    args: &HashObjectArgs,
    data: &[u8],
    repo: Option<&Repository>,
) -> Result<ObjectId> {
    let kind = args.obj_type.as_bytes();
    if args.literally {
        header::validate_type(kind)?;
    } else {
        // Refuse payloads that would not decode as the claimed type.
        Object::parse_content(ObjectType::from_bytes(kind)?, data)?;
    }

    match repo {
        Some(repo) => Ok(repo.odb().put(kind, data)?),
        None => Ok(Hasher::hash_object(kind, data)),
    }
}
