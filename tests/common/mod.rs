use std::collections::BTreeMap;
use std::path::Path;

use gix::objs::tree::{Entry, EntryKind};
use gix::refs::transaction::PreviousValue;

/// Repository identifiers used across the integration tests. Both are
/// exactly 36 characters, like the directory names the registry accepts.
pub const REPO_A: &str = "111111111111111111111111111111111111";
#[allow(dead_code)]
pub const REPO_B: &str = "3f0c9a2e-7b14-4d58-9c6b-da51f2e8b901";

/// Create a bare repository named `id` under the data directory.
pub fn create_repo(data_dir: &Path, id: &str) -> gix::Repository {
    let dir = data_dir.join(id);
    std::fs::create_dir_all(&dir).unwrap();
    gix::init_bare(&dir).unwrap()
}

/// Commit `files` (path, content) as the new head of `repo`, replacing
/// whatever the default branch pointed to. Returns the commit id.
pub fn commit_files(repo: &gix::Repository, files: &[(&str, &[u8])]) -> String {
    let owned: Vec<(String, Vec<u8>)> = files
        .iter()
        .map(|(path, data)| (path.to_string(), data.to_vec()))
        .collect();
    let tree_oid = build_tree(repo, &owned);

    let time = gix::date::Time::new(1_700_000_000, 0);
    let actor = gix::actor::Signature {
        name: "repofs-tests".into(),
        email: "tests@localhost".into(),
        time,
    };
    let commit = gix::objs::Commit {
        tree: tree_oid,
        parents: vec![].into(),
        author: actor.clone(),
        committer: actor,
        encoding: None,
        message: "seed".into(),
        extra_headers: vec![],
    };
    let commit_oid = repo.write_object(&commit).unwrap().detach();

    // Point the branch HEAD refers to at the new commit.
    let head = repo.find_reference("HEAD").unwrap();
    let branch = head
        .target()
        .try_name()
        .expect("fresh bare repo has a symbolic HEAD")
        .as_bstr()
        .to_string();
    repo.reference(branch.as_str(), commit_oid, PreviousValue::Any, "commit: seed")
        .unwrap();

    commit_oid.to_string()
}

/// Write nested trees for a flat (path, content) list and return the root
/// tree id.
fn build_tree(repo: &gix::Repository, files: &[(String, Vec<u8>)]) -> gix::ObjectId {
    let mut blobs: BTreeMap<String, gix::ObjectId> = BTreeMap::new();
    let mut subdirs: BTreeMap<String, Vec<(String, Vec<u8>)>> = BTreeMap::new();

    for (path, data) in files {
        match path.split_once('/') {
            Some((dir, rest)) => subdirs
                .entry(dir.to_string())
                .or_default()
                .push((rest.to_string(), data.clone())),
            None => {
                let oid = repo.write_blob(data.as_slice()).unwrap().detach();
                blobs.insert(path.clone(), oid);
            }
        }
    }

    let mut entries: Vec<Entry> = Vec::new();
    for (name, sub_files) in &subdirs {
        entries.push(Entry {
            mode: EntryKind::Tree.into(),
            filename: name.as_str().into(),
            oid: build_tree(repo, sub_files),
        });
    }
    for (name, oid) in &blobs {
        entries.push(Entry {
            mode: EntryKind::Blob.into(),
            filename: name.as_str().into(),
            oid: *oid,
        });
    }
    entries.sort();

    repo.write_object(&gix::objs::Tree { entries }).unwrap().detach()
}

/// Data directory with one repository (`REPO_A`) whose head tree holds
/// `/docs/readme.txt` (12 bytes) and `/hello.txt`.
#[allow(dead_code)]
pub fn seed_data_dir(data_dir: &Path) -> String {
    let repo = create_repo(data_dir, REPO_A);
    commit_files(
        &repo,
        &[
            ("docs/readme.txt", b"hello world!" as &[u8]),
            ("hello.txt", b"hi"),
        ],
    )
}
