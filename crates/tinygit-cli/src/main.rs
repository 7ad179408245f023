mod commands;
mod exit_code;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use tracing_subscriber::EnvFilter;

use commands::Commands;

/// Environment variable holding the log filter directives.
const LOG_VAR: &str = "TINYGIT_LOG";

#[derive(Parser)]
#[command(
    name = "tinygit",
    about = "A minimal content-addressable object store",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run as if started in <path>
    #[arg(short = 'C', global = true, value_name = "path")]
    change_dir: Option<PathBuf>,

    /// Set the path to the repository metadata directory
    #[arg(long = "git-dir", global = true, value_name = "path")]
    git_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(exit_code::USAGE),
            }
        }
    };

    init_logging(cli.verbose);

    if let Some(dir) = &cli.change_dir {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("fatal: cannot change to '{}': {}", dir.display(), e);
            process::exit(exit_code::OTHER);
        }
    }

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("fatal: {e}");
            process::exit(exit_code::for_error(&e));
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = commands::run(cli, &mut stdin.lock(), &mut out)?;
    out.flush()?;
    Ok(code)
}
