//! Mount content-addressed, version-controlled repositories as a single
//! read-only filesystem.
//!
//! Every registered repository appears as a top-level directory named by
//! its 36-character identifier; paths beneath it resolve against the
//! repository's current head commit. All four operations (attributes,
//! listing, open, read) are stateless, independently-resolving
//! transactions — nothing is cached between calls, so concurrent
//! repository updates are simply observed by whichever call comes next.
//!
//! # Key types
//!
//! - [`Vfs`] — the path-resolution and operation-dispatch core, generic
//!   over the backing-store traits in [`backend`].
//! - [`GitBackend`] — the stores implemented over a directory of bare git
//!   repositories.
//! - [`Session`] — the application context built once at startup.
//! - [`fuse`] — the `fuser` adapter and [`fuse::mount`](fuse::mount).
//!
//! # Quick example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use repofs::{GitBackend, Vfs};
//!
//! let vfs = Vfs::new(Arc::new(GitBackend::new("/srv/repofs/repos")));
//! let entries = vfs.readdir("/").unwrap();
//! for entry in &entries[2..] {
//!     println!("{}", entry.name); // one repository id per entry
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod fuse;
pub mod path;
pub mod session;
pub mod store;
pub mod types;
pub mod vfs;

// Re-export primary public types at crate root.
pub use backend::{Backend, CommitStore, ContentHandle, ObjectStore, RepositoryStore};
pub use config::Config;
pub use error::{Error, Result};
pub use path::VirtualPath;
pub use session::Session;
pub use store::GitBackend;
pub use types::*;
pub use vfs::Vfs;
