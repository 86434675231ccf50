//! The kernel-facing dispatch surface.
//!
//! Translates fuser's inode-addressed callbacks into path-addressed
//! [`FilesystemOps`] calls and replies with the operation's errno on
//! failure. Attribute TTLs are zero: the remote store is the only source
//! of truth, so the kernel re-asks every time.

use std::ffi::OsStr;
use std::time::{Duration, UNIX_EPOCH};

use fuser::{
    FileAttr, FileType, Filesystem, ReplyAttr, ReplyData, ReplyDirectory, ReplyEmpty,
    ReplyEntry, Request,
};

use davmount_adapter::FilesystemOps;
use davmount_store::ResourceAttr;

use crate::inode::{join_path, parent_path, InodeTable};

const TTL: Duration = Duration::ZERO;

pub struct DavFilesystem<T> {
    ops: T,
    inodes: InodeTable,
    uid: u32,
    gid: u32,
}

impl<T: FilesystemOps> DavFilesystem<T> {
    pub fn new(ops: T) -> Self {
        Self {
            ops,
            inodes: InodeTable::new(),
            uid: unsafe { libc::getuid() },
            gid: unsafe { libc::getgid() },
        }
    }

    fn file_attr(&self, ino: u64, attr: &ResourceAttr) -> FileAttr {
        let mtime = attr.mtime.unwrap_or(UNIX_EPOCH);
        FileAttr {
            ino,
            size: attr.size,
            blocks: attr.size.div_ceil(512),
            atime: mtime,
            mtime,
            ctime: mtime,
            crtime: mtime,
            kind: if attr.is_dir() {
                FileType::Directory
            } else {
                FileType::RegularFile
            },
            perm: attr.perm(),
            nlink: attr.nlink,
            uid: self.uid,
            gid: self.gid,
            rdev: 0,
            blksize: 512,
            flags: 0,
        }
    }

    /// Resolve a (parent inode, name) pair the kernel handed us.
    fn child_path(&self, parent: u64, name: &OsStr) -> Option<String> {
        let parent_path = self.inodes.path(parent)?;
        let name = name.to_str()?;
        Some(join_path(parent_path, name))
    }
}

impl<T: FilesystemOps> Filesystem for DavFilesystem<T> {
    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let Some(path) = self.child_path(parent, name) else {
            return reply.error(libc::ENOENT);
        };
        match self.ops.getattr(&path) {
            Ok(attr) => {
                // Each lookup reply is a kernel reference, returned later
                // through forget.
                let ino = self.inodes.remember(&path);
                reply.entry(&TTL, &self.file_attr(ino, &attr), 0);
            }
            Err(e) => reply.error(e.errno()),
        }
    }

    fn forget(&mut self, _req: &Request<'_>, ino: u64, nlookup: u64) {
        self.inodes.forget(ino, nlookup);
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyAttr) {
        let Some(path) = self.inodes.path(ino).map(String::from) else {
            return reply.error(libc::ENOENT);
        };
        match self.ops.getattr(&path) {
            Ok(attr) => reply.attr(&TTL, &self.file_attr(ino, &attr)),
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
        let Some(path) = self.inodes.path(ino).map(String::from) else {
            return reply.error(libc::ENOENT);
        };
        let offset = u64::try_from(offset).unwrap_or(0);
        match self.ops.read(&path, offset, size) {
            Ok(bytes) => reply.data(&bytes),
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
        let Some(path) = self.inodes.path(ino).map(String::from) else {
            return reply.error(libc::ENOENT);
        };
        let names = match self.ops.readdir(&path) {
            Ok(names) => names,
            Err(e) => return reply.error(e.errno()),
        };

        for (i, name) in names.iter().enumerate().skip(offset as usize) {
            let (entry_ino, kind) = match name.as_str() {
                "." => (ino, FileType::Directory),
                ".." => {
                    let parent = parent_path(&path).to_string();
                    (self.inodes.assign(&parent), FileType::Directory)
                }
                _ => {
                    // No metadata cache, so each entry's type costs a stat.
                    let child = join_path(&path, name);
                    let kind = match self.ops.getattr(&child) {
                        Ok(attr) if attr.is_dir() => FileType::Directory,
                        _ => FileType::RegularFile,
                    };
                    (self.inodes.assign(&child), kind)
                }
            };
            if reply.add(entry_ino, (i + 1) as i64, kind, name) {
                break;
            }
        }
        reply.ok();
    }

    fn unlink(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEmpty) {
        let Some(path) = self.child_path(parent, name) else {
            return reply.error(libc::ENOENT);
        };
        match self.ops.unlink(&path) {
            Ok(()) => {
                self.inodes.forget_path(&path);
                reply.ok();
            }
            Err(e) => reply.error(e.errno()),
        }
    }

    fn rmdir(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEmpty) {
        let Some(path) = self.child_path(parent, name) else {
            return reply.error(libc::ENOENT);
        };
        match self.ops.rmdir(&path) {
            Ok(()) => {
                self.inodes.forget_path(&path);
                reply.ok();
            }
            Err(e) => reply.error(e.errno()),
        }
    }

    fn rename(
        &mut self,
        _req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        newparent: u64,
        newname: &OsStr,
        _flags: u32,
        reply: ReplyEmpty,
    ) {
        let (Some(source), Some(destination)) = (
            self.child_path(parent, name),
            self.child_path(newparent, newname),
        ) else {
            return reply.error(libc::ENOENT);
        };
        match self.ops.rename(&source, &destination) {
            Ok(()) => {
                self.inodes.rebind(&source, &destination);
                reply.ok();
            }
            Err(e) => reply.error(e.errno()),
        }
    }
}
