// ---------------------------------------------------------------------------
// Identifier constants
// ---------------------------------------------------------------------------

/// Length of a repository identifier as it appears in virtual paths.
pub const REPO_ID_LEN: usize = 36;

// ---------------------------------------------------------------------------
// ObjectKind
// ---------------------------------------------------------------------------

/// The type of a resolved content object.
///
/// The virtual filesystem only distinguishes regular files from
/// directories. Backends that store richer modes (executables, symlinks)
/// fold them into `RegularFile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    RegularFile,
    Directory,
}

impl ObjectKind {
    pub fn is_file(self) -> bool {
        matches!(self, Self::RegularFile)
    }

    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

// ---------------------------------------------------------------------------
// References into backing storage
// ---------------------------------------------------------------------------

/// Reference to a commit, scoped to the repository that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub repo_id: String,
    pub commit_id: String,
}

/// Reference to a content object, scoped to the repository that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub repo_id: String,
    pub object_id: String,
}

// ---------------------------------------------------------------------------
// Repository / Commit
// ---------------------------------------------------------------------------

/// A repository as reported by the registry: its identifier and the head
/// commit it currently points to. Fetched fresh for every operation.
#[derive(Debug, Clone)]
pub struct Repository {
    pub id: String,
    pub head: CommitRef,
}

/// An immutable commit: its id and the root of its content tree.
#[derive(Debug, Clone)]
pub struct Commit {
    pub id: String,
    pub root: ObjectRef,
}

// ---------------------------------------------------------------------------
// Resolution results
// ---------------------------------------------------------------------------

/// The object an intra-repository path resolved to. Exists only within a
/// single operation.
#[derive(Debug, Clone)]
pub struct ResolvedObject {
    pub object: ObjectRef,
    pub kind: ObjectKind,
    /// Content size in bytes; zero for directories.
    pub size: u64,
}

/// Attributes reported for a virtual path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub kind: ObjectKind,
    pub size: u64,
}

impl Attributes {
    pub fn directory() -> Self {
        Self {
            kind: ObjectKind::Directory,
            size: 0,
        }
    }
}

/// One entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: ObjectKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::RegularFile,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_predicates() {
        assert!(ObjectKind::RegularFile.is_file());
        assert!(!ObjectKind::RegularFile.is_dir());
        assert!(ObjectKind::Directory.is_dir());
        assert!(!ObjectKind::Directory.is_file());
    }

    #[test]
    fn directory_attributes_have_zero_size() {
        let attr = Attributes::directory();
        assert_eq!(attr.kind, ObjectKind::Directory);
        assert_eq!(attr.size, 0);
    }
}
