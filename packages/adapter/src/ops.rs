//! The filesystem operation set.

use bytes::Bytes;
use davmount_store::ResourceAttr;

use crate::FsError;

/// The conventional self entry in a directory listing.
pub const CURRENT_DIR: &str = ".";
/// The conventional parent entry in a directory listing.
pub const PARENT_DIR: &str = "..";
/// How many conventional entries every listing starts with.
pub const RESERVED_ENTRIES: usize = 2;

/// The fixed set of filesystem operations the host runtime dispatches.
///
/// Every method is synchronous and blocks until a remote result or failure
/// is available. Implementations hold no mutable state, so concurrent
/// invocation is safe whenever the underlying store is.
pub trait FilesystemOps: Send + Sync {
    /// Attribute record for `path`. Any inability to stat reads as absence.
    fn getattr(&self, path: &str) -> Result<ResourceAttr, FsError>;

    /// Up to `size` bytes starting at `offset`. Short reads at end of
    /// resource are legal.
    fn read(&self, path: &str, offset: u64, size: u32) -> Result<Bytes, FsError>;

    /// Child names of `path`, always starting with `.` and `..`, in the
    /// order the store reported them.
    fn readdir(&self, path: &str) -> Result<Vec<String>, FsError>;

    /// Remove the non-directory entry at `path`.
    fn unlink(&self, path: &str) -> Result<(), FsError>;

    /// Remove the empty directory at `path`.
    fn rmdir(&self, path: &str) -> Result<(), FsError>;

    /// Rename `source` to `destination` with the store's own atomicity and
    /// overwrite behavior.
    fn rename(&self, source: &str, destination: &str) -> Result<(), FsError>;
}

impl<T: FilesystemOps + ?Sized> FilesystemOps for &T {
    fn getattr(&self, path: &str) -> Result<ResourceAttr, FsError> {
        (**self).getattr(path)
    }

    fn read(&self, path: &str, offset: u64, size: u32) -> Result<Bytes, FsError> {
        (**self).read(path, offset, size)
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>, FsError> {
        (**self).readdir(path)
    }

    fn unlink(&self, path: &str) -> Result<(), FsError> {
        (**self).unlink(path)
    }

    fn rmdir(&self, path: &str) -> Result<(), FsError> {
        (**self).rmdir(path)
    }

    fn rename(&self, source: &str, destination: &str) -> Result<(), FsError> {
        (**self).rename(source, destination)
    }
}

impl<T: FilesystemOps + ?Sized> FilesystemOps for Box<T> {
    fn getattr(&self, path: &str) -> Result<ResourceAttr, FsError> {
        self.as_ref().getattr(path)
    }

    fn read(&self, path: &str, offset: u64, size: u32) -> Result<Bytes, FsError> {
        self.as_ref().read(path, offset, size)
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>, FsError> {
        self.as_ref().readdir(path)
    }

    fn unlink(&self, path: &str) -> Result<(), FsError> {
        self.as_ref().unlink(path)
    }

    fn rmdir(&self, path: &str) -> Result<(), FsError> {
        self.as_ref().rmdir(path)
    }

    fn rename(&self, source: &str, destination: &str) -> Result<(), FsError> {
        self.as_ref().rename(source, destination)
    }
}
