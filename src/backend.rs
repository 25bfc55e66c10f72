//! Collaborator interfaces consumed by the virtual filesystem core.
//!
//! The core is a read-only client of three stores: the repository
//! registry, the commit store, and the content-addressed object store.
//! Each is internally synchronized and owns its resources; the core holds
//! references only for the duration of a single call.
//!
//! Defining the stores as traits keeps the core testable without any real
//! backing storage: unit tests drive it with an in-memory backend, and the
//! mounted process uses the git-backed [`GitBackend`](crate::store::GitBackend).

use crate::error::Result;
use crate::types::{Commit, CommitRef, DirEntry, ObjectRef, Repository, ResolvedObject};

/// The repository registry.
pub trait RepositoryStore {
    /// Look up a repository by identifier.
    fn get_repository(&self, id: &str) -> Result<Repository>;

    /// All repository identifiers currently known, in registry order.
    fn list_repositories(&self) -> Result<Vec<String>>;
}

/// The commit-graph store.
pub trait CommitStore {
    /// Fetch the commit a head reference points to.
    fn get_commit(&self, head: &CommitRef) -> Result<Commit>;
}

/// The content-addressed object store.
pub trait ObjectStore {
    /// Resolve an intra-repository path (beginning with `/`) against a
    /// root content object.
    fn resolve_path(&self, root: &ObjectRef, path: &str) -> Result<ResolvedObject>;

    /// Immediate children of a directory object.
    fn list_dir(&self, dir: &ObjectRef) -> Result<Vec<DirEntry>>;

    /// Obtain a content handle for a regular-file object.
    fn open_content(&self, object: &ObjectRef) -> Result<Box<dyn ContentHandle>>;
}

/// Call-scoped handle to a regular file's content.
pub trait ContentHandle {
    /// Read up to `size` bytes starting at `offset`. Returns fewer bytes
    /// near end-of-file and an empty buffer at or past it; an offset
    /// beyond the end is not an error.
    fn read_at(&self, offset: u64, size: usize) -> Result<Vec<u8>>;
}

/// Bundle of the three stores an operation needs.
pub trait Backend: RepositoryStore + CommitStore + ObjectStore + Send + Sync {}

impl<T: RepositoryStore + CommitStore + ObjectStore + Send + Sync> Backend for T {}
