//! Tests for the Repository struct: init, open, discover, and the object store.

use std::fs;

use tinygit_repository::{EnvOverrides, InitStatus, RepoError, Repository};

fn no_env() -> EnvOverrides {
    EnvOverrides::default()
}

#[test]
fn init_creates_layout() {
    let dir = tempfile::tempdir().unwrap();
    let (repo, status) = Repository::init_with_env(dir.path(), &no_env()).unwrap();
    assert_eq!(status, InitStatus::Created);

    let git_dir = dir.path().join(".git");
    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs").is_dir());
    assert_eq!(
        fs::read_to_string(git_dir.join("HEAD")).unwrap(),
        "ref: refs/heads/main\n"
    );
    assert_eq!(repo.git_dir(), fs::canonicalize(&git_dir).unwrap());
    assert_eq!(
        repo.work_tree().unwrap(),
        fs::canonicalize(dir.path()).unwrap()
    );
}

#[test]
fn init_creates_missing_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("a").join("b");
    let (_repo, status) = Repository::init_with_env(&target, &no_env()).unwrap();
    assert_eq!(status, InitStatus::Created);
    assert!(target.join(".git/HEAD").is_file());
}

#[test]
fn reinit_preserves_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    let (repo, _) = Repository::init_with_env(dir.path(), &no_env()).unwrap();
    let oid = repo.odb().put(b"blob", b"keep me\n").unwrap();
    fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/trunk\n").unwrap();

    let (repo, status) = Repository::init_with_env(dir.path(), &no_env()).unwrap();
    assert_eq!(status, InitStatus::Reinitialized);
    assert_eq!(repo.odb().get(&oid).unwrap().data, b"keep me\n");
    assert_eq!(
        fs::read_to_string(dir.path().join(".git/HEAD")).unwrap(),
        "ref: refs/heads/trunk\n"
    );
}

#[test]
fn reinit_restores_missing_objects_dir() {
    let dir = tempfile::tempdir().unwrap();
    Repository::init_with_env(dir.path(), &no_env()).unwrap();
    fs::remove_dir(dir.path().join(".git/objects")).unwrap();

    let (_repo, status) = Repository::init_with_env(dir.path(), &no_env()).unwrap();
    assert_eq!(status, InitStatus::Reinitialized);
    assert!(dir.path().join(".git/objects").is_dir());
}

#[test]
fn open_from_work_tree_and_git_dir() {
    let dir = tempfile::tempdir().unwrap();
    Repository::init_with_env(dir.path(), &no_env()).unwrap();

    let a = Repository::open_with_env(dir.path(), &no_env()).unwrap();
    let b = Repository::open_with_env(dir.path().join(".git"), &no_env()).unwrap();
    assert_eq!(a.git_dir(), b.git_dir());
    assert_eq!(a.work_tree(), b.work_tree());
    assert_eq!(a.odb().objects_dir(), a.git_dir().join("objects"));
}

#[test]
fn open_non_repo_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Repository::open_with_env(dir.path(), &no_env()),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn discover_walks_up() {
    let dir = tempfile::tempdir().unwrap();
    Repository::init_with_env(dir.path(), &no_env()).unwrap();
    let nested = dir.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    let repo = Repository::discover_with_env(&nested, &no_env()).unwrap();
    assert_eq!(
        repo.git_dir(),
        fs::canonicalize(dir.path().join(".git")).unwrap()
    );
}

#[test]
fn discover_finds_nearest_repository() {
    let outer = tempfile::tempdir().unwrap();
    Repository::init_with_env(outer.path(), &no_env()).unwrap();
    let inner = outer.path().join("inner");
    Repository::init_with_env(&inner, &no_env()).unwrap();

    let repo = Repository::discover_with_env(&inner, &no_env()).unwrap();
    assert_eq!(
        repo.git_dir(),
        fs::canonicalize(inner.join(".git")).unwrap()
    );
}

#[test]
fn discover_ignores_dot_git_without_head() {
    let dir = tempfile::tempdir().unwrap();
    Repository::init_with_env(dir.path(), &no_env()).unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(sub.join(".git")).unwrap();

    let repo = Repository::discover_with_env(&sub, &no_env()).unwrap();
    assert_eq!(
        repo.git_dir(),
        fs::canonicalize(dir.path().join(".git")).unwrap()
    );
}

#[test]
fn discover_missing_start_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Repository::discover_with_env(dir.path().join("nope"), &no_env()),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn git_dir_override_skips_discovery() {
    let repo_dir = tempfile::tempdir().unwrap();
    Repository::init_with_env(repo_dir.path(), &no_env()).unwrap();
    let elsewhere = tempfile::tempdir().unwrap();

    let env = EnvOverrides {
        git_dir: Some(repo_dir.path().join(".git")),
        ..Default::default()
    };
    let repo = Repository::discover_with_env(elsewhere.path(), &env).unwrap();
    assert_eq!(
        repo.git_dir(),
        fs::canonicalize(repo_dir.path().join(".git")).unwrap()
    );
}

#[test]
fn git_dir_override_must_be_a_repository() {
    let dir = tempfile::tempdir().unwrap();
    let env = EnvOverrides {
        git_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(
        Repository::discover_with_env(dir.path(), &env),
        Err(RepoError::InvalidGitDir { .. })
    ));
}

#[test]
fn object_directory_and_compression_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let objects = dir.path().join("shared-objects");
    let env = EnvOverrides {
        object_directory: Some(objects.clone()),
        compression: Some(0),
        ..Default::default()
    };
    let (repo, _) = Repository::init_with_env(dir.path().join("work"), &env).unwrap();
    assert_eq!(repo.odb().objects_dir(), objects);
    assert_eq!(repo.odb().compression_level(), 0);

    let oid = repo.odb().put(b"blob", b"hello\n").unwrap();
    assert!(objects.join(oid.loose_path()).is_file());
    assert!(!repo.git_dir().join("objects").join(oid.loose_path()).exists());
}

#[test]
fn store_errors_convert() {
    let dir = tempfile::tempdir().unwrap();
    let (repo, _) = Repository::init_with_env(dir.path(), &no_env()).unwrap();
    let missing = tinygit_hash::ObjectId::from_hex("ce013625030ba8dba906f756967f9e9ca394464a")
        .unwrap();
    let err: RepoError = repo.odb().get(&missing).unwrap_err().into();
    assert!(matches!(
        err,
        RepoError::Loose(tinygit_loose::LooseError::ObjectNotFound(_))
    ));
}
