/// All errors produced by repofs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The virtual path has no well-formed repository identifier segment.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Repository, commit, or intra-repository path component is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Directory listing requested on a non-directory object.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Non-read-only open intent, or open targeting a non-regular object.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Unclassified failure in a backing store.
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

impl Error {
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory(path.into())
    }

    pub fn permission(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    pub fn backend_msg(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into().into())
    }

    /// Map to the nearest standard filesystem error code.
    ///
    /// The FUSE contract has no distinct code for a malformed path, so
    /// `InvalidPath` surfaces as `ENOENT` like any missing entry.
    pub fn errno(&self) -> i32 {
        match self {
            Self::InvalidPath(_) | Self::NotFound(_) => libc::ENOENT,
            Self::NotADirectory(_) => libc::ENOTDIR,
            Self::PermissionDenied(_) => libc::EACCES,
            Self::Backend(_) | Self::Io(_) => libc::EIO,
        }
    }
}
