//! The remote store trait.

use std::sync::Arc;

use bytes::Bytes;

use crate::{ResourceAttr, StoreError};

/// A remote resource store addressed by opaque string paths.
///
/// Implementations own all network I/O, authentication, and protocol
/// framing. Every method is a fresh remote round trip; nothing is cached
/// between calls.
///
/// Implementations must be safe for concurrent use (`&self` methods,
/// `Send + Sync`): the host runtime may deliver filesystem operations from
/// multiple threads at once.
///
/// # Object Safety
///
/// This trait is object-safe: `Box<dyn RemoteStore>` works, and blanket
/// impls cover `&T`, `Box<T>` and `Arc<T>`.
pub trait RemoteStore: Send + Sync {
    /// Fetch the attribute record for `path`.
    ///
    /// Fails (rather than returning an option) when the resource is missing
    /// or unreachable; callers that only care about existence treat any
    /// error as absence.
    fn stat(&self, path: &str) -> Result<ResourceAttr, StoreError>;

    /// Read bytes in `[start, end)` from the resource at `path`.
    ///
    /// May return fewer than `end - start` bytes when the resource is
    /// shorter than requested; that is not an error.
    fn read(&self, path: &str, start: u64, end: u64) -> Result<Bytes, StoreError>;

    /// List the child names of the collection at `path`.
    ///
    /// Names only - no leading path, no self/parent entries. Order is
    /// whatever the store reports.
    fn list_files(&self, path: &str) -> Result<Vec<String>, StoreError>;

    /// Remove the resource at `path`.
    ///
    /// Behavior on non-empty collections is store-defined; callers that
    /// need emptiness pre-check it themselves.
    fn delete(&self, path: &str) -> Result<(), StoreError>;

    /// Move `source` to `destination`, atomically as far as the store
    /// guarantees it. Whatever overwrite behavior the store has is what
    /// callers get.
    fn mv(&self, source: &str, destination: &str) -> Result<(), StoreError>;
}

// Blanket implementations so adapters can hold stores by reference,
// box, or arc without caring which.

impl<T: RemoteStore + ?Sized> RemoteStore for &T {
    fn stat(&self, path: &str) -> Result<ResourceAttr, StoreError> {
        (**self).stat(path)
    }

    fn read(&self, path: &str, start: u64, end: u64) -> Result<Bytes, StoreError> {
        (**self).read(path, start, end)
    }

    fn list_files(&self, path: &str) -> Result<Vec<String>, StoreError> {
        (**self).list_files(path)
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        (**self).delete(path)
    }

    fn mv(&self, source: &str, destination: &str) -> Result<(), StoreError> {
        (**self).mv(source, destination)
    }
}

impl<T: RemoteStore + ?Sized> RemoteStore for Box<T> {
    fn stat(&self, path: &str) -> Result<ResourceAttr, StoreError> {
        self.as_ref().stat(path)
    }

    fn read(&self, path: &str, start: u64, end: u64) -> Result<Bytes, StoreError> {
        self.as_ref().read(path, start, end)
    }

    fn list_files(&self, path: &str) -> Result<Vec<String>, StoreError> {
        self.as_ref().list_files(path)
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.as_ref().delete(path)
    }

    fn mv(&self, source: &str, destination: &str) -> Result<(), StoreError> {
        self.as_ref().mv(source, destination)
    }
}

impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
    fn stat(&self, path: &str) -> Result<ResourceAttr, StoreError> {
        self.as_ref().stat(path)
    }

    fn read(&self, path: &str, start: u64, end: u64) -> Result<Bytes, StoreError> {
        self.as_ref().read(path, start, end)
    }

    fn list_files(&self, path: &str) -> Result<Vec<String>, StoreError> {
        self.as_ref().list_files(path)
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.as_ref().delete(path)
    }

    fn mv(&self, source: &str, destination: &str) -> Result<(), StoreError> {
        self.as_ref().mv(source, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;

    #[test]
    fn object_safety_works() {
        let store: Box<dyn RemoteStore> =
            Box::new(InMemoryStore::new().with_file("/a.txt", b"abc"));
        let attr = store.stat("/a.txt").unwrap();
        assert_eq!(attr.size, 3);
    }

    #[test]
    fn arc_blanket_impl_works() {
        let store = Arc::new(InMemoryStore::new().with_file("/a.txt", b"abc"));
        let bytes = store.read("/a.txt", 0, 3).unwrap();
        assert_eq!(&bytes[..], b"abc");
    }

    #[test]
    fn ref_blanket_impl_works() {
        let store = InMemoryStore::new().with_dir("/d");
        let by_ref: &dyn RemoteStore = &store;
        assert!(by_ref.stat("/d").unwrap().is_dir());
    }
}
