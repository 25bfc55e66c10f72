//! Git-backed implementation of the backing-store interfaces.
//!
//! Each repository is a bare git repository under the data directory,
//! named by its 36-character identifier. The head commit is whatever the
//! repository's `HEAD` resolves to; trees and blobs are the content
//! objects. Every trait method opens the repository, does its work, and
//! drops the handle on return, so nothing is held across calls.

use std::path::{Path, PathBuf};

use crate::backend::{CommitStore, ContentHandle, ObjectStore, RepositoryStore};
use crate::error::{Error, Result};
use crate::types::{
    Commit, CommitRef, DirEntry, ObjectKind, ObjectRef, Repository, ResolvedObject, REPO_ID_LEN,
};

/// Registry, commit store, and object store in one: a directory of bare
/// git repositories.
pub struct GitBackend {
    data_dir: PathBuf,
}

impl GitBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn open_repo(&self, repo_id: &str) -> Result<gix::Repository> {
        let dir = self.data_dir.join(repo_id);
        if !dir.is_dir() {
            return Err(Error::not_found(format!("repository {}", repo_id)));
        }
        gix::open(&dir).map_err(Error::backend)
    }
}

fn parse_oid(hex: &str) -> Result<gix::ObjectId> {
    gix::ObjectId::from_hex(hex.as_bytes())
        .map_err(|e| Error::backend_msg(format!("invalid object id {}: {}", hex, e)))
}

fn kind_of(mode: gix::objs::tree::EntryMode) -> ObjectKind {
    // Executables and symlinks surface as regular files; a symlink reads
    // as its target text.
    if mode.is_tree() {
        ObjectKind::Directory
    } else {
        ObjectKind::RegularFile
    }
}

impl RepositoryStore for GitBackend {
    fn get_repository(&self, id: &str) -> Result<Repository> {
        let repo = self.open_repo(id)?;
        let head = repo
            .head_id()
            .map_err(|_| Error::not_found(format!("head of repository {}", id)))?;
        Ok(Repository {
            id: id.to_string(),
            head: CommitRef {
                repo_id: id.to_string(),
                commit_id: head.detach().to_string(),
            },
        })
    }

    fn list_repositories(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            // A repository directory is named by its identifier and has a
            // HEAD file; anything else in the data directory is ignored.
            if name.len() == REPO_ID_LEN && entry.path().join("HEAD").is_file() {
                ids.push(name.to_string());
            }
        }
        Ok(ids)
    }
}

impl CommitStore for GitBackend {
    fn get_commit(&self, head: &CommitRef) -> Result<Commit> {
        let repo = self.open_repo(&head.repo_id)?;
        let oid = parse_oid(&head.commit_id)?;
        let obj = repo
            .find_object(oid)
            .map_err(|_| Error::not_found(format!("commit {:.8}", head.commit_id)))?;
        let commit_ref = gix::objs::CommitRef::from_bytes(&obj.data).map_err(Error::backend)?;
        let tree_oid = commit_ref.tree();
        Ok(Commit {
            id: head.commit_id.clone(),
            root: ObjectRef {
                repo_id: head.repo_id.clone(),
                object_id: tree_oid.to_string(),
            },
        })
    }
}

impl ObjectStore for GitBackend {
    fn resolve_path(&self, root: &ObjectRef, path: &str) -> Result<ResolvedObject> {
        let repo = self.open_repo(&root.repo_id)?;
        let mut oid = parse_oid(&root.object_id)?;
        let mut is_tree = true;

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !is_tree {
                return Err(Error::not_found(path));
            }
            let tree_data = repo.find_object(oid).map_err(|_| Error::not_found(path))?;
            let tree_ref =
                gix::objs::TreeRef::from_bytes(&tree_data.data).map_err(Error::backend)?;
            let entry = tree_ref
                .entries
                .iter()
                .find(|e| e.filename == segment.as_bytes())
                .ok_or_else(|| Error::not_found(path))?;
            is_tree = entry.mode.is_tree();
            oid = entry.oid.to_owned();
        }

        if is_tree {
            Ok(ResolvedObject {
                object: ObjectRef {
                    repo_id: root.repo_id.clone(),
                    object_id: oid.to_string(),
                },
                kind: ObjectKind::Directory,
                size: 0,
            })
        } else {
            let obj = repo.find_object(oid).map_err(|_| Error::not_found(path))?;
            Ok(ResolvedObject {
                object: ObjectRef {
                    repo_id: root.repo_id.clone(),
                    object_id: oid.to_string(),
                },
                kind: ObjectKind::RegularFile,
                size: obj.data.len() as u64,
            })
        }
    }

    fn list_dir(&self, dir: &ObjectRef) -> Result<Vec<DirEntry>> {
        let repo = self.open_repo(&dir.repo_id)?;
        let oid = parse_oid(&dir.object_id)?;
        let tree_data = repo
            .find_object(oid)
            .map_err(|_| Error::not_found(dir.object_id.clone()))?;
        let tree_ref = gix::objs::TreeRef::from_bytes(&tree_data.data)
            .map_err(|_| Error::not_a_directory(dir.object_id.clone()))?;

        Ok(tree_ref
            .entries
            .iter()
            .map(|e| DirEntry {
                name: String::from_utf8_lossy(e.filename).into_owned(),
                kind: kind_of(e.mode),
            })
            .collect())
    }

    fn open_content(&self, object: &ObjectRef) -> Result<Box<dyn ContentHandle>> {
        let repo = self.open_repo(&object.repo_id)?;
        let obj = repo
            .find_object(parse_oid(&object.object_id)?)
            .map_err(|_| Error::not_found(object.object_id.clone()))?;
        Ok(Box::new(BlobContent {
            data: obj.data.to_vec(),
        }))
    }
}

/// Blob content held for the duration of a single read.
struct BlobContent {
    data: Vec<u8>,
}

impl ContentHandle for BlobContent {
    fn read_at(&self, offset: u64, size: usize) -> Result<Vec<u8>> {
        let start = (offset as usize).min(self.data.len());
        let end = (start + size).min(self.data.len());
        Ok(self.data[start..end].to_vec())
    }
}
