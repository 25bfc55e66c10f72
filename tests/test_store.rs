mod common;

use repofs::*;

fn backend(dir: &std::path::Path) -> GitBackend {
    GitBackend::new(dir)
}

// ---------------------------------------------------------------------------
// registry
// ---------------------------------------------------------------------------

#[test]
fn list_repositories_finds_seeded_repo() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let ids = backend(dir.path()).list_repositories().unwrap();
    assert_eq!(ids, vec![common::REPO_A.to_string()]);
}

#[test]
fn list_repositories_ignores_foreign_entries() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    // Stray file and a directory whose name is not an identifier.
    std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
    std::fs::create_dir(dir.path().join("short")).unwrap();
    // Identifier-length directory that is not a repository.
    std::fs::create_dir(dir.path().join(common::REPO_B)).unwrap();

    let ids = backend(dir.path()).list_repositories().unwrap();
    assert_eq!(ids, vec![common::REPO_A.to_string()]);
}

#[test]
fn get_repository_reports_head() {
    let dir = tempfile::tempdir().unwrap();
    let commit_id = common::seed_data_dir(dir.path());
    let repo = backend(dir.path()).get_repository(common::REPO_A).unwrap();
    assert_eq!(repo.id, common::REPO_A);
    assert_eq!(repo.head.commit_id, commit_id);
}

#[test]
fn get_repository_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        backend(dir.path()).get_repository(common::REPO_A),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn get_repository_unborn_head_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    common::create_repo(dir.path(), common::REPO_A);
    // Repository exists but no commit was ever made.
    assert!(matches!(
        backend(dir.path()).get_repository(common::REPO_A),
        Err(Error::NotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// commits
// ---------------------------------------------------------------------------

#[test]
fn get_commit_returns_root_tree() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let store = backend(dir.path());
    let repo = store.get_repository(common::REPO_A).unwrap();
    let commit = store.get_commit(&repo.head).unwrap();
    assert_eq!(commit.id, repo.head.commit_id);
    assert_eq!(commit.root.object_id.len(), 40);
}

#[test]
fn get_commit_unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let head = CommitRef {
        repo_id: common::REPO_A.to_string(),
        commit_id: "0000000000000000000000000000000000000001".to_string(),
    };
    assert!(matches!(
        backend(dir.path()).get_commit(&head),
        Err(Error::NotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// object resolution
// ---------------------------------------------------------------------------

fn root_of(store: &GitBackend) -> ObjectRef {
    let repo = store.get_repository(common::REPO_A).unwrap();
    store.get_commit(&repo.head).unwrap().root
}

#[test]
fn resolve_root_path_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let store = backend(dir.path());
    let obj = store.resolve_path(&root_of(&store), "/").unwrap();
    assert!(obj.kind.is_dir());
    assert_eq!(obj.size, 0);
}

#[test]
fn resolve_nested_file_reports_size() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let store = backend(dir.path());
    let obj = store
        .resolve_path(&root_of(&store), "/docs/readme.txt")
        .unwrap();
    assert!(obj.kind.is_file());
    assert_eq!(obj.size, 12);
}

#[test]
fn resolve_missing_component_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let store = backend(dir.path());
    assert!(matches!(
        store.resolve_path(&root_of(&store), "/docs/nope.txt"),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn resolve_through_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let store = backend(dir.path());
    assert!(matches!(
        store.resolve_path(&root_of(&store), "/hello.txt/deeper"),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn list_dir_reports_names_and_kinds() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let store = backend(dir.path());
    let root = store.resolve_path(&root_of(&store), "/").unwrap();
    let entries = store.list_dir(&root.object).unwrap();

    let mut names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["docs", "hello.txt"]);
    for entry in &entries {
        match entry.name.as_str() {
            "docs" => assert!(entry.kind.is_dir()),
            "hello.txt" => assert!(entry.kind.is_file()),
            other => panic!("unexpected entry {}", other),
        }
    }
}

// ---------------------------------------------------------------------------
// content
// ---------------------------------------------------------------------------

#[test]
fn content_reads_at_offsets() {
    let dir = tempfile::tempdir().unwrap();
    common::seed_data_dir(dir.path());
    let store = backend(dir.path());
    let obj = store
        .resolve_path(&root_of(&store), "/docs/readme.txt")
        .unwrap();
    let handle = store.open_content(&obj.object).unwrap();

    assert_eq!(handle.read_at(0, 100).unwrap(), b"hello world!");
    assert_eq!(handle.read_at(6, 20).unwrap(), b"world!");
    assert_eq!(handle.read_at(12, 4).unwrap(), b"");
    assert_eq!(handle.read_at(500, 4).unwrap(), b"");
}
