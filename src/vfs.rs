//! The virtual filesystem core: operation dispatch and path resolution.
//!
//! Every incoming call is classified against the mount root. The root
//! directory is synthetic (one entry per registered repository); all
//! other paths resolve through a repository's current head commit. Each
//! operation is a stateless, independently-resolving transaction: nothing
//! is cached between calls, so a repository that advances between two
//! calls is simply observed at its new head by the later call.

use std::sync::Arc;

use log::{debug, warn};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::path::VirtualPath;
use crate::types::{Attributes, DirEntry, ResolvedObject};

/// Read-only view of all registered repositories.
///
/// Cheap to clone (`Arc` internally). Holds no per-call state of its own;
/// the backend owns and synchronizes all resources.
pub struct Vfs<B> {
    backend: Arc<B>,
}

impl<B> Clone for Vfs<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: Backend> Vfs<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn is_mount_root(path: &str) -> bool {
        path == "/"
    }

    /// Resolve a repository-relative virtual path (mount root already
    /// stripped) down to a content object.
    ///
    /// This is the shared algorithm behind all four operations: parse the
    /// identifier, look up the repository, fetch its head commit, then
    /// walk the commit's content tree. Every operation re-runs it in full.
    fn resolve(&self, path: &str) -> Result<ResolvedObject> {
        let vpath = VirtualPath::parse(path).map_err(|e| {
            warn!("invalid input path: {}", path);
            e
        })?;

        let repo = self.backend.get_repository(vpath.repo_id()).map_err(|e| {
            warn!("failed to get repository {}", vpath.repo_id());
            e
        })?;

        let commit = self.backend.get_commit(&repo.head).map_err(|e| {
            warn!(
                "failed to get commit {:.8} of repository {}",
                repo.head.commit_id, repo.id
            );
            e
        })?;

        self.backend.resolve_path(&commit.root, vpath.path()).map_err(|e| {
            debug!("path {} not in repository {}", vpath.path(), repo.id);
            e
        })
    }

    /// Report attributes for a virtual path.
    ///
    /// The mount root is always a directory; anything else resolves
    /// against the owning repository's current snapshot.
    pub fn getattr(&self, path: &str) -> Result<Attributes> {
        debug!("getattr {}", path);
        if Self::is_mount_root(path) {
            return Ok(Attributes::directory());
        }
        let obj = self.resolve(path.strip_prefix('/').unwrap_or(path))?;
        Ok(Attributes {
            kind: obj.kind,
            size: obj.size,
        })
    }

    /// List a directory: the `.`/`..` markers followed by one entry per
    /// child. On the mount root the children are the repository ids, in
    /// whatever order the registry yields them.
    pub fn readdir(&self, path: &str) -> Result<Vec<DirEntry>> {
        debug!("readdir {}", path);
        let mut entries = vec![DirEntry::dir("."), DirEntry::dir("..")];

        if Self::is_mount_root(path) {
            for id in self.backend.list_repositories()? {
                entries.push(DirEntry::dir(id));
            }
            return Ok(entries);
        }

        let obj = self.resolve(path.strip_prefix('/').unwrap_or(path))?;
        if !obj.kind.is_dir() {
            return Err(Error::not_a_directory(path));
        }
        entries.extend(self.backend.list_dir(&obj.object)?);
        Ok(entries)
    }

    /// Open a file for reading. Only read-only access is supported: any
    /// other access mode is rejected before resolution, and a directory
    /// target is rejected after it. No handle is retained — a subsequent
    /// read resolves the path again from scratch.
    pub fn open(&self, path: &str, flags: i32) -> Result<()> {
        debug!("open {} flags {:#o}", path, flags);
        if flags & libc::O_ACCMODE != libc::O_RDONLY {
            return Err(Error::permission(format!(
                "write access requested for {}",
                path
            )));
        }

        let obj = self.resolve(path.strip_prefix('/').unwrap_or(path))?;
        if !obj.kind.is_file() {
            return Err(Error::permission(format!("{} is not a regular file", path)));
        }
        Ok(())
    }

    /// Read up to `size` bytes at `offset`, resolving the path against the
    /// repository's head at the time of this call. Returns fewer bytes at
    /// end-of-file and an empty buffer at or past it. If the path no
    /// longer resolves (the repository advanced since it was opened), the
    /// read fails `NotFound` rather than returning stale content.
    pub fn read(&self, path: &str, offset: u64, size: usize) -> Result<Vec<u8>> {
        debug!("read {} offset {} size {}", path, offset, size);
        let obj = self.resolve(path.strip_prefix('/').unwrap_or(path))?;
        if !obj.kind.is_file() {
            return Err(Error::not_found(path));
        }
        let handle = self.backend.open_content(&obj.object)?;
        handle.read_at(offset, size)
    }
}
