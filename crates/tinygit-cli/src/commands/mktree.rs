use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use bstr::{BString, ByteSlice};
use clap::Args;
use tinygit_hash::ObjectId;
use tinygit_object::{FileMode, Object, Tree, TreeEntry};

use crate::Cli;
use super::{entry_type_name, open_repo};

#[derive(Args)]
pub struct MktreeArgs {
    /// Allow entries that point at objects missing from the store
    #[arg(long)]
    missing: bool,
}

pub fn run(
    args: &MktreeArgs,
    cli: &Cli,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<i32> {
    let repo = open_repo(cli)?;
    let odb = repo.odb();

    let mut tree = Tree::new();
    let mut line = Vec::new();
    let mut line_no = 0;
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_no += 1;
        let text = line.strip_suffix(b"\n").unwrap_or(&line);
        if text.is_empty() {
            continue;
        }

        let entry = parse_tree_line(text).with_context(|| format!("input line {line_no}"))?;

        // Submodule commits live in another repository.
        let is_gitlink = entry.file_mode().is_some_and(|m| m.is_gitlink());
        if !args.missing && !is_gitlink && !odb.contains(&entry.oid) {
            bail!("entry '{}' points at missing object {}", entry.name, entry.oid);
        }
        tree.entries.push(entry);
    }

    let oid = odb.write(&Object::Tree(tree))?;
    writeln!(out, "{oid}")?;
    Ok(0)
}

/// Parse `<mode> SP <type> SP <hex> TAB <name>`.
fn parse_tree_line(line: &[u8]) -> Result<TreeEntry> {
    let Some((meta, name)) = line.split_once_str("\t") else {
        bail!("missing tab before the entry name");
    };
    if name.is_empty() {
        bail!("empty entry name");
    }
    if name.contains(&b'/') || name.contains(&0) {
        bail!("entry name may not contain '/' or NUL: {:?}", name.as_bstr());
    }

    let meta = meta
        .to_str()
        .context("mode, type and id must be ASCII")?;
    let parts: Vec<&str> = meta.split(' ').collect();
    let [mode, kind, hex] = parts.as_slice() else {
        bail!("expected '<mode> <type> <id>', got '{meta}'");
    };

    let mode = FileMode::from_bytes(mode.as_bytes())?;
    let oid = ObjectId::from_hex(hex)?;
    let entry = TreeEntry::new(mode, BString::from(name), oid);

    let implied = entry_type_name(&entry);
    if *kind != implied {
        bail!("mode {:o} implies a {implied}, not a {kind}", mode.raw());
    }
    Ok(entry)
}
