//! Attribute records describing remote resources.

use std::time::SystemTime;

/// What kind of resource an attribute record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A regular file: supports ranged reads.
    File,
    /// A collection: supports listing.
    Directory,
}

/// Structured metadata for one remote resource, the store-level analogue of
/// a `stat` result.
///
/// The kind must be consistent with how the resource behaves: a
/// `Directory` record must come from something listable, a `File` record
/// from something readable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceAttr {
    pub kind: ResourceKind,
    /// Size in bytes. Zero for collections.
    pub size: u64,
    pub nlink: u32,
    /// Last modification time, when the store reports one.
    pub mtime: Option<SystemTime>,
}

impl ResourceAttr {
    /// A regular file of the given size.
    pub fn file(size: u64) -> Self {
        Self {
            kind: ResourceKind::File,
            size,
            nlink: 1,
            mtime: None,
        }
    }

    /// A directory record.
    pub fn directory() -> Self {
        Self {
            kind: ResourceKind::Directory,
            size: 0,
            nlink: 1,
            mtime: None,
        }
    }

    /// Set the modification time.
    pub fn with_mtime(mut self, mtime: SystemTime) -> Self {
        self.mtime = Some(mtime);
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == ResourceKind::Directory
    }

    /// Permission bits for the mounted view. The mount is read-mostly:
    /// owner read everywhere, plus exec on directories so they can be
    /// entered.
    pub fn perm(&self) -> u16 {
        match self.kind {
            ResourceKind::Directory => 0o500,
            ResourceKind::File => 0o400,
        }
    }
}
