//! Uniform call logging as a decorator.

use bytes::Bytes;
use davmount_store::ResourceAttr;

use crate::{FilesystemOps, FsError};

/// Wraps any [`FilesystemOps`] and logs every call and every failure.
///
/// Successes log at debug, failures at debug with the error attached;
/// nothing is swallowed or altered on the way through.
pub struct Logged<T> {
    inner: T,
}

impl<T: FilesystemOps> Logged<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Unwrap the decorator.
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn outcome<V>(op: &str, path: &str, result: Result<V, FsError>) -> Result<V, FsError> {
        if let Err(e) = &result {
            log::debug!("{} {} -> {}", op, path, e);
        }
        result
    }
}

impl<T: FilesystemOps> FilesystemOps for Logged<T> {
    fn getattr(&self, path: &str) -> Result<ResourceAttr, FsError> {
        log::debug!("getattr {}", path);
        Self::outcome("getattr", path, self.inner.getattr(path))
    }

    fn read(&self, path: &str, offset: u64, size: u32) -> Result<Bytes, FsError> {
        log::debug!("read {} offset={} size={}", path, offset, size);
        Self::outcome("read", path, self.inner.read(path, offset, size))
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>, FsError> {
        log::debug!("readdir {}", path);
        Self::outcome("readdir", path, self.inner.readdir(path))
    }

    fn unlink(&self, path: &str) -> Result<(), FsError> {
        log::debug!("unlink {}", path);
        Self::outcome("unlink", path, self.inner.unlink(path))
    }

    fn rmdir(&self, path: &str) -> Result<(), FsError> {
        log::debug!("rmdir {}", path);
        Self::outcome("rmdir", path, self.inner.rmdir(path))
    }

    fn rename(&self, source: &str, destination: &str) -> Result<(), FsError> {
        log::debug!("rename {} -> {}", source, destination);
        Self::outcome("rename", source, self.inner.rename(source, destination))
    }
}
