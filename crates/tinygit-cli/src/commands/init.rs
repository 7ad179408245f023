use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tinygit_repository::{EnvOverrides, InitStatus, Repository};

use crate::Cli;

#[derive(Args)]
pub struct InitArgs {
    /// Be quiet, only report errors
    #[arg(short, long)]
    quiet: bool,

    /// Directory to create the repository in
    directory: Option<PathBuf>,
}

pub fn run(args: &InitArgs, _cli: &Cli, out: &mut dyn Write) -> Result<i32> {
    let target = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let env = EnvOverrides::from_env()?;
    let (repo, status) = Repository::init_with_env(&target, &env)?;

    if !args.quiet {
        let verb = match status {
            InitStatus::Created => "Initialized empty",
            InitStatus::Reinitialized => "Reinitialized existing",
        };
        let mut display_path = repo.git_dir().display().to_string();
        if !display_path.ends_with('/') {
            display_path.push('/');
        }
        writeln!(out, "{verb} Git repository in {display_path}")?;
    }

    Ok(0)
}
