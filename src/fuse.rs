//! FUSE adapter: bridges the kernel's inode-based protocol to the
//! path-based filesystem core.
//!
//! The kernel addresses everything by inode number, while the core
//! resolves virtual paths. [`InodeTable`] maps between the two. The table
//! is mount plumbing, not a resolution cache: an inode pins a *path*, and
//! every operation on it still resolves that path from scratch against
//! the repository's current head.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use std::time::{Duration, SystemTime};

use fuser::{
    FileAttr, FileType, Filesystem, MountOption, ReplyAttr, ReplyData, ReplyDirectory,
    ReplyEntry, ReplyOpen, Request,
};

use crate::backend::Backend;
use crate::types::{Attributes, ObjectKind};
use crate::vfs::Vfs;

const TTL: Duration = Duration::from_secs(1);

pub const ROOT_INO: u64 = fuser::FUSE_ROOT_ID;

// ---------------------------------------------------------------------------
// InodeTable
// ---------------------------------------------------------------------------

/// Bidirectional inode-number/path map for the lifetime of one mount.
///
/// Inodes are assigned on first sight of a path and stay stable for that
/// path thereafter. Entries are never reclaimed; the table grows with the
/// set of paths the kernel has looked up.
struct InodeTable {
    by_ino: HashMap<u64, String>,
    by_path: HashMap<String, u64>,
    next: u64,
}

impl InodeTable {
    fn new() -> Self {
        let mut table = Self {
            by_ino: HashMap::new(),
            by_path: HashMap::new(),
            next: ROOT_INO + 1,
        };
        table.by_ino.insert(ROOT_INO, "/".to_string());
        table.by_path.insert("/".to_string(), ROOT_INO);
        table
    }

    fn assign(&mut self, path: &str) -> u64 {
        if let Some(&ino) = self.by_path.get(path) {
            return ino;
        }
        let ino = self.next;
        self.next += 1;
        self.by_ino.insert(ino, path.to_string());
        self.by_path.insert(path.to_string(), ino);
        ino
    }

    fn path(&self, ino: u64) -> Option<&str> {
        self.by_ino.get(&ino).map(String::as_str)
    }

    fn ino(&self, path: &str) -> Option<u64> {
        self.by_path.get(path).copied()
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(pos) => &path[..pos],
    }
}

// ---------------------------------------------------------------------------
// RepoFuse
// ---------------------------------------------------------------------------

/// `fuser::Filesystem` implementation over the path-based core.
pub struct RepoFuse<B> {
    vfs: Vfs<B>,
    inodes: InodeTable,
    uid: u32,
    gid: u32,
    mount_time: SystemTime,
}

impl<B: Backend> RepoFuse<B> {
    pub fn new(vfs: Vfs<B>) -> Self {
        Self {
            vfs,
            inodes: InodeTable::new(),
            uid: unsafe { libc::geteuid() },
            gid: unsafe { libc::getegid() },
            mount_time: SystemTime::now(),
        }
    }

    fn file_attr(&self, ino: u64, attr: &Attributes) -> FileAttr {
        let (kind, perm, nlink) = match attr.kind {
            ObjectKind::Directory => (FileType::Directory, 0o555, 2),
            ObjectKind::RegularFile => (FileType::RegularFile, 0o444, 1),
        };
        FileAttr {
            ino,
            size: attr.size,
            blocks: attr.size.div_ceil(512),
            atime: self.mount_time,
            mtime: self.mount_time,
            ctime: self.mount_time,
            crtime: self.mount_time,
            kind,
            perm,
            nlink,
            uid: self.uid,
            gid: self.gid,
            rdev: 0,
            blksize: 512,
            flags: 0,
        }
    }
}

impl<B: Backend> Filesystem for RepoFuse<B> {
    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let Some(parent_path) = self.inodes.path(parent).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        let Some(name) = name.to_str() else {
            reply.error(libc::ENOENT);
            return;
        };
        let path = child_path(&parent_path, name);
        match self.vfs.getattr(&path) {
            Ok(attr) => {
                let ino = self.inodes.assign(&path);
                reply.entry(&TTL, &self.file_attr(ino, &attr), 0);
            }
            Err(e) => reply.error(e.errno()),
        }
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyAttr) {
        let Some(path) = self.inodes.path(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.vfs.getattr(&path) {
            Ok(attr) => reply.attr(&TTL, &self.file_attr(ino, &attr)),
            Err(e) => reply.error(e.errno()),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let Some(path) = self.inodes.path(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        let entries = match self.vfs.readdir(&path) {
            Ok(entries) => entries,
            Err(e) => {
                reply.error(e.errno());
                return;
            }
        };
        for (i, entry) in entries.iter().enumerate().skip(offset.max(0) as usize) {
            let entry_ino = match entry.name.as_str() {
                "." => ino,
                ".." => self.inodes.ino(parent_path(&path)).unwrap_or(ROOT_INO),
                name => self.inodes.assign(&child_path(&path, name)),
            };
            let kind = match entry.kind {
                ObjectKind::Directory => FileType::Directory,
                ObjectKind::RegularFile => FileType::RegularFile,
            };
            if reply.add(entry_ino, (i + 1) as i64, kind, &entry.name) {
                break;
            }
        }
        reply.ok();
    }

    fn open(&mut self, _req: &Request<'_>, ino: u64, flags: i32, reply: ReplyOpen) {
        let Some(path) = self.inodes.path(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.vfs.open(&path, flags) {
            // No handle is retained; reads re-resolve the path.
            Ok(()) => reply.opened(0, 0),
            Err(e) => reply.error(e.errno()),
        }
    }

    fn read(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        let Some(path) = self.inodes.path(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.vfs.read(&path, offset.max(0) as u64, size as usize) {
            Ok(data) => reply.data(&data),
            Err(e) => reply.error(e.errno()),
        }
    }
}

// ---------------------------------------------------------------------------
// Mounting
// ---------------------------------------------------------------------------

/// Mount the filesystem at `mountpoint` and serve it until unmounted.
///
/// `extra_options` are passed through to the FUSE layer unchanged (the
/// `-o` values from the command line).
pub fn mount<B: Backend + 'static>(
    vfs: Vfs<B>,
    mountpoint: &Path,
    extra_options: &[String],
) -> std::io::Result<()> {
    let mut options = vec![
        MountOption::RO,
        MountOption::FSName("repofs".to_string()),
        MountOption::Subtype("repofs".to_string()),
    ];
    options.extend(extra_options.iter().cloned().map(MountOption::CUSTOM));
    fuser::mount2(RepoFuse::new(vfs), mountpoint, &options)
}
