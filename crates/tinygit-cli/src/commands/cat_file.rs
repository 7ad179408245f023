use std::io::Write;

use anyhow::{bail, Result};
use bstr::ByteSlice;
use clap::{ArgGroup, Args};
use tinygit_loose::LooseError;
use tinygit_object::{ObjectType, TreeEntries};

use crate::exit_code::UsageError;
use crate::Cli;
use super::{open_repo, resolve_object, write_tree_entry};

#[derive(Args)]
#[command(group(ArgGroup::new("mode").args(["type_only", "size", "exists", "pretty"])))]
pub struct CatFileArgs {
    /// Show object type
    #[arg(short = 't')]
    type_only: bool,

    /// Show object size
    #[arg(short = 's')]
    size: bool,

    /// Exit with zero status if the object exists, 1 otherwise
    #[arg(short = 'e')]
    exists: bool,

    /// Pretty-print the object content
    #[arg(short = 'p')]
    pretty: bool,

    /// Either <object> (with -t/-s/-e/-p) or <type> <object>
    #[arg(value_name = "arg", required = true, num_args = 1..=2)]
    positional: Vec<String>,
}

pub fn run(args: &CatFileArgs, cli: &Cli, out: &mut dyn Write) -> Result<i32> {
    let flagged = args.type_only || args.size || args.exists || args.pretty;
    let (expected_type, name) = match (flagged, args.positional.as_slice()) {
        (true, [name]) => (None, name.as_str()),
        (false, [kind, name]) => (Some(kind.as_str()), name.as_str()),
        _ => return Err(UsageError("cat-file (-t | -s | -e | -p | <type>) <object>").into()),
    };

    let repo = open_repo(cli)?;
    let odb = repo.odb();

    if args.exists {
        return match resolve_object(&repo, name) {
            Ok(_) => Ok(0),
            Err(e) if matches!(
                e.downcast_ref::<LooseError>(),
                Some(LooseError::ObjectNotFound(_))
            ) => Ok(1),
            Err(e) => Err(e),
        };
    }

    let oid = resolve_object(&repo, name)?;

    if args.type_only || args.size {
        let info = odb.read_header(&oid)?;
        if args.type_only {
            out.write_all(&info.kind)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", info.size)?;
        }
        return Ok(0);
    }

    let raw = odb.get(&oid)?;

    if let Some(expected) = expected_type {
        if raw.kind.as_bytes() != expected.as_bytes() {
            bail!(
                "{name}: expected {expected} object, found {}",
                raw.kind.as_bstr()
            );
        }
        out.write_all(&raw.data)?;
        return Ok(0);
    }

    // -p: trees are listed, everything else is printed as-is.
    if raw.object_type().ok() == Some(ObjectType::Tree) {
        for entry in TreeEntries::new(&raw.data) {
            write_tree_entry(out, &entry?, false)?;
        }
    } else {
        out.write_all(&raw.data)?;
    }
    Ok(0)
}
