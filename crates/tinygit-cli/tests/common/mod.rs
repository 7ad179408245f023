//! Shared test harness for tinygit-cli integration tests.
//!
//! Provides process runners and repo setup helpers. The tinygit environment
//! variables are cleared so the host environment cannot leak in.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: Vec<u8>,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Stdout with the trailing newline removed.
    pub fn line(&self) -> String {
        self.stdout_str().trim_end_matches('\n').to_string()
    }
}

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tinygit"));
    cmd.args(args)
        .current_dir(dir)
        .env_remove("TINYGIT_DIR")
        .env_remove("TINYGIT_OBJECT_DIRECTORY")
        .env_remove("TINYGIT_COMPRESSION")
        .env_remove("TINYGIT_LOG");
    cmd
}

/// Run the tinygit binary in `dir` with the given arguments.
pub fn tinygit(dir: &Path, args: &[&str]) -> CommandResult {
    tinygit_stdin(dir, args, b"")
}

/// Run the tinygit binary in `dir`, feeding `input` on stdin.
pub fn tinygit_stdin(dir: &Path, args: &[&str], input: &[u8]) -> CommandResult {
    tinygit_env(dir, args, input, &[])
}

/// Run the tinygit binary with extra environment variables.
pub fn tinygit_env(
    dir: &Path,
    args: &[&str],
    input: &[u8],
    env: &[(&str, &str)],
) -> CommandResult {
    let mut cmd = command(dir, args);
    for (k, v) in env {
        cmd.env(k, v);
    }
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run tinygit");
    child.stdin.take().unwrap().write_all(input).unwrap();
    let output = child.wait_with_output().unwrap();
    CommandResult {
        stdout: output.stdout,
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Create a fresh repository in a temp dir.
pub fn setup_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let result = tinygit(dir.path(), &["init", "-q"]);
    assert_eq!(result.exit_code, 0, "init failed: {}", result.stderr);
    dir
}

/// Store a blob and return its id.
pub fn write_blob(dir: &Path, content: &[u8]) -> String {
    let result = tinygit_stdin(dir, &["hash-object", "-w", "--stdin"], content);
    assert_eq!(result.exit_code, 0, "hash-object failed: {}", result.stderr);
    result.line()
}

/// Replace a stored object file with `bytes`.
pub fn overwrite_object(dir: &Path, hex: &str, bytes: &[u8]) {
    let path = dir.join(".git/objects").join(&hex[..2]).join(&hex[2..]);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let _ = std::fs::remove_file(&path);
    std::fs::write(path, bytes).unwrap();
}
