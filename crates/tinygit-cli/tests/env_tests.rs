//! Global flags and environment variables.

mod common;
use common::*;

const HELLO_ID: &str = "ce013625030ba8dba906f756967f9e9ca394464a";

#[test]
fn change_dir_flag() {
    let dir = setup_repo();
    let elsewhere = tempfile::tempdir().unwrap();
    let repo = dir.path().to_str().unwrap();

    let result = tinygit_stdin(
        elsewhere.path(),
        &["-C", repo, "hash-object", "-w", "--stdin"],
        b"hello\n",
    );
    assert_eq!(result.exit_code, 0, "{}", result.stderr);
    assert!(dir.path().join(".git/objects/ce").is_dir());
}

#[test]
fn git_dir_flag() {
    let dir = setup_repo();
    write_blob(dir.path(), b"hello\n");
    let elsewhere = tempfile::tempdir().unwrap();
    let git_dir = dir.path().join(".git");

    let result = tinygit(
        elsewhere.path(),
        &["--git-dir", git_dir.to_str().unwrap(), "cat-file", "-s", HELLO_ID],
    );
    assert_eq!(result.exit_code, 0, "{}", result.stderr);
    assert_eq!(result.line(), "6");
}

#[test]
fn dir_env_var() {
    let dir = setup_repo();
    write_blob(dir.path(), b"hello\n");
    let elsewhere = tempfile::tempdir().unwrap();
    let git_dir = dir.path().join(".git");

    let result = tinygit_env(
        elsewhere.path(),
        &["cat-file", "-t", HELLO_ID],
        b"",
        &[("TINYGIT_DIR", git_dir.to_str().unwrap())],
    );
    assert_eq!(result.exit_code, 0, "{}", result.stderr);
    assert_eq!(result.line(), "blob");
}

#[test]
fn object_directory_env_var() {
    let dir = setup_repo();
    let objects = tempfile::tempdir().unwrap();

    let result = tinygit_env(
        dir.path(),
        &["hash-object", "-w", "--stdin"],
        b"hello\n",
        &[("TINYGIT_OBJECT_DIRECTORY", objects.path().to_str().unwrap())],
    );
    assert_eq!(result.exit_code, 0, "{}", result.stderr);
    assert!(objects.path().join("ce").is_dir());
    assert!(!dir.path().join(".git/objects/ce").exists());
}

#[test]
fn invalid_compression_env_var() {
    let dir = setup_repo();
    let result = tinygit_env(
        dir.path(),
        &["hash-object", "-w", "--stdin"],
        b"hello\n",
        &[("TINYGIT_COMPRESSION", "11")],
    );
    assert_eq!(result.exit_code, 128);
    assert!(result.stderr.contains("TINYGIT_COMPRESSION"));
}

#[test]
fn unwritable_store_exit_code() {
    let dir = setup_repo();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let result = tinygit_env(
        dir.path(),
        &["hash-object", "-w", "--stdin"],
        b"hello\n",
        &[("TINYGIT_OBJECT_DIRECTORY", blocker.to_str().unwrap())],
    );
    assert_eq!(result.exit_code, 8);
}

#[test]
fn verbose_logs_go_to_stderr() {
    let dir = setup_repo();
    let result = tinygit_stdin(dir.path(), &["-v", "hash-object", "-w", "--stdin"], b"hello\n");
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout_str(), format!("{HELLO_ID}\n"));
    assert!(result.stderr.contains("DEBUG"));
}

#[test]
fn log_env_var_filters() {
    let dir = setup_repo();
    let quiet = tinygit_stdin(dir.path(), &["hash-object", "-w", "--stdin"], b"hello\n");
    assert!(quiet.stderr.is_empty());

    let loud = tinygit_env(
        dir.path(),
        &["hash-object", "-w", "--stdin"],
        b"hello\n",
        &[("TINYGIT_LOG", "debug")],
    );
    assert_eq!(loud.stdout_str(), format!("{HELLO_ID}\n"));
    assert!(loud.stderr.contains("already stored"));
}
