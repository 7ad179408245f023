use std::io::Write;

use anyhow::{bail, Result};
use clap::Args;
use tinygit_object::Object;

use crate::Cli;
use super::{open_repo, resolve_object, write_tree_entry};

#[derive(Args)]
pub struct LsTreeArgs {
    /// Show only names
    #[arg(long)]
    name_only: bool,

    /// Tree to list
    #[arg(value_name = "tree")]
    tree: String,
}

pub fn run(args: &LsTreeArgs, cli: &Cli, out: &mut dyn Write) -> Result<i32> {
    let repo = open_repo(cli)?;
    let oid = resolve_object(&repo, &args.tree)?;

    let tree = match repo.odb().read_object(&oid)? {
        Object::Tree(tree) => tree,
        other => bail!("not a tree object: {} is a {}", args.tree, other.object_type()),
    };

    for entry in tree.iter() {
        write_tree_entry(out, entry, args.name_only)?;
    }
    Ok(0)
}
