use crate::error::{Error, Result};
use crate::types::REPO_ID_LEN;

/// A virtual path split into repository identifier and intra-repository
/// path. Constructed per call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualPath {
    repo_id: String,
    path: String,
}

impl VirtualPath {
    /// Parse a virtual path of the form `"/" id36 [ "/" intra-path ]`.
    ///
    /// A single leading separator is stripped if present. The leading
    /// segment must be at least [`REPO_ID_LEN`] characters; its first
    /// [`REPO_ID_LEN`] characters become the repository id and anything
    /// between them and the next separator is ignored. Without a further
    /// separator the intra-repository path is `"/"` (the repository root);
    /// otherwise it is everything from that separator onward.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`] if the leading segment is shorter
    /// than [`REPO_ID_LEN`] characters.
    pub fn parse(path: &str) -> Result<Self> {
        let rest = path.strip_prefix('/').unwrap_or(path);

        let (segment, intra) = match rest.find('/') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, "/"),
        };

        if segment.len() < REPO_ID_LEN || !segment.is_char_boundary(REPO_ID_LEN) {
            return Err(Error::invalid_path(path));
        }

        Ok(Self {
            repo_id: segment[..REPO_ID_LEN].to_string(),
            path: intra.to_string(),
        })
    }

    /// The repository identifier, always exactly [`REPO_ID_LEN`] characters.
    pub fn repo_id(&self) -> &str {
        &self.repo_id
    }

    /// The intra-repository path, always beginning with `"/"`.
    pub fn path(&self) -> &str {
        &self.path
    }
}
