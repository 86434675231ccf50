//! The translation/policy layer over a remote store.

use bytes::Bytes;
use davmount_store::{RemoteStore, ResourceAttr, StoreError};

use crate::ops::{FilesystemOps, CURRENT_DIR, PARENT_DIR, RESERVED_ENTRIES};
use crate::FsError;

/// Translates filesystem operations into remote store calls.
///
/// The store is injected at construction and held for the adapter's whole
/// lifetime; the adapter itself has no other state, no cache, and no
/// locks. Any serialization needed for correctness between a check and the
/// call that follows it (stat-then-delete, list-then-delete) is an
/// accepted time-of-check/time-of-use gap, not something closed here.
pub struct DavAdapter<S> {
    store: S,
}

impl<S: RemoteStore> DavAdapter<S> {
    /// Build an adapter over a configured, authenticated store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The injected store, for callers that need direct access.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: RemoteStore> FilesystemOps for DavAdapter<S> {
    /// Every stat failure collapses to [`FsError::NoSuchEntry`]: the host
    /// runtime cannot act on finer causes here, and "missing" is the
    /// conservative answer for existence checks.
    fn getattr(&self, path: &str) -> Result<ResourceAttr, FsError> {
        self.store
            .stat(path)
            .map_err(|_| FsError::NoSuchEntry(path.to_string()))
    }

    fn read(&self, path: &str, offset: u64, size: u32) -> Result<Bytes, FsError> {
        let end = offset.saturating_add(u64::from(size));
        Ok(self.store.read(path, offset, end)?)
    }

    /// An absent collection reads as [`FsError::NoSuchEntry`], so listing
    /// a just-removed directory reports "no such entry" rather than a
    /// generic I/O failure. Other listing errors pass through.
    fn readdir(&self, path: &str) -> Result<Vec<String>, FsError> {
        let children = self.store.list_files(path).map_err(|e| match e {
            StoreError::NotFound { path } => FsError::NoSuchEntry(path),
            other => FsError::Store(other),
        })?;
        let mut names = Vec::with_capacity(children.len() + RESERVED_ENTRIES);
        names.push(CURRENT_DIR.to_string());
        names.push(PARENT_DIR.to_string());
        names.extend(children);
        Ok(names)
    }

    fn unlink(&self, path: &str) -> Result<(), FsError> {
        let attr = self.getattr(path)?;
        if attr.is_dir() {
            // Directory removal must go through rmdir and its emptiness
            // check; a generic remove never silently deletes a collection.
            return Err(FsError::IsADirectory(path.to_string()));
        }
        Ok(self.store.delete(path)?)
    }

    /// A listing failure reads as "not a directory". That is policy, not
    /// diagnosis: a transport error lands on the same kind.
    fn rmdir(&self, path: &str) -> Result<(), FsError> {
        let names = self
            .readdir(path)
            .map_err(|_| FsError::NotADirectory(path.to_string()))?;
        if names.len() > RESERVED_ENTRIES {
            return Err(FsError::NotEmpty(path.to_string()));
        }
        Ok(self.store.delete(path)?)
    }

    fn rename(&self, source: &str, destination: &str) -> Result<(), FsError> {
        Ok(self.store.mv(source, destination)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use davmount_store::{InMemoryStore, StoreError};

    /// A store whose every call fails, for exercising the collapse policy.
    struct BrokenStore;

    impl RemoteStore for BrokenStore {
        fn stat(&self, path: &str) -> Result<ResourceAttr, StoreError> {
            Err(StoreError::UnexpectedStatus {
                verb: "PROPFIND",
                path: path.to_string(),
                status: 502,
            })
        }

        fn read(&self, path: &str, _start: u64, _end: u64) -> Result<Bytes, StoreError> {
            Err(StoreError::UnexpectedStatus {
                verb: "GET",
                path: path.to_string(),
                status: 502,
            })
        }

        fn list_files(&self, path: &str) -> Result<Vec<String>, StoreError> {
            Err(StoreError::UnexpectedStatus {
                verb: "PROPFIND",
                path: path.to_string(),
                status: 502,
            })
        }

        fn delete(&self, path: &str) -> Result<(), StoreError> {
            Err(StoreError::UnexpectedStatus {
                verb: "DELETE",
                path: path.to_string(),
                status: 502,
            })
        }

        fn mv(&self, source: &str, _destination: &str) -> Result<(), StoreError> {
            Err(StoreError::UnexpectedStatus {
                verb: "MOVE",
                path: source.to_string(),
                status: 502,
            })
        }
    }

    fn docs_adapter() -> DavAdapter<InMemoryStore> {
        DavAdapter::new(
            InMemoryStore::new()
                .with_dir("/docs")
                .with_file("/docs/readme.txt", b"ten bytes!"),
        )
    }

    #[test]
    fn getattr_collapses_any_failure_to_no_such_entry() {
        let fs = DavAdapter::new(BrokenStore);
        // A gateway error, not a 404 - still reads as absence.
        assert!(matches!(
            fs.getattr("/docs"),
            Err(FsError::NoSuchEntry(p)) if p == "/docs"
        ));
    }

    #[test]
    fn read_passes_transport_failures_through() {
        let fs = DavAdapter::new(BrokenStore);
        match fs.read("/f", 0, 10) {
            Err(FsError::Store(StoreError::UnexpectedStatus { status: 502, .. })) => {}
            other => panic!("expected pass-through store error, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn read_window_is_offset_to_offset_plus_size() {
        let fs = docs_adapter();
        let bytes = fs.read("/docs/readme.txt", 4, 5).unwrap();
        assert_eq!(&bytes[..], b"bytes");
    }

    #[test]
    fn short_read_at_end_of_resource_is_not_an_error() {
        let fs = docs_adapter();
        let bytes = fs.read("/docs/readme.txt", 8, 100).unwrap();
        assert_eq!(&bytes[..], b"s!");
    }

    #[test]
    fn readdir_prefixes_conventional_entries() {
        let fs = docs_adapter();
        assert_eq!(fs.readdir("/docs").unwrap(), vec![".", "..", "readme.txt"]);
    }

    #[test]
    fn readdir_on_a_missing_path_reads_as_absent() {
        let fs = docs_adapter();
        assert!(matches!(
            fs.readdir("/gone"),
            Err(FsError::NoSuchEntry(p)) if p == "/gone"
        ));
        // Other listing failures still pass through untouched.
        let broken = DavAdapter::new(BrokenStore);
        assert!(matches!(
            broken.readdir("/docs"),
            Err(FsError::Store(StoreError::UnexpectedStatus { .. }))
        ));
    }

    #[test]
    fn readdir_preserves_store_order() {
        let store = InMemoryStore::new()
            .with_dir("/d")
            .with_file("/d/b.txt", b"")
            .with_file("/d/a.txt", b"");
        let fs = DavAdapter::new(store);
        // BTreeMap ordering from the store, untouched.
        assert_eq!(fs.readdir("/d").unwrap(), vec![".", "..", "a.txt", "b.txt"]);
    }

    #[test]
    fn unlink_refuses_directories() {
        let fs = docs_adapter();
        assert!(matches!(fs.unlink("/docs"), Err(FsError::IsADirectory(_))));
        // And performed no deletion.
        assert!(fs.store().contains("/docs"));
    }

    #[test]
    fn unlink_missing_entry_reads_as_absent() {
        let fs = docs_adapter();
        assert!(matches!(
            fs.unlink("/docs/ghost.txt"),
            Err(FsError::NoSuchEntry(_))
        ));
    }

    #[test]
    fn rmdir_maps_listing_failure_to_not_a_directory() {
        let fs = docs_adapter();
        assert!(matches!(
            fs.rmdir("/docs/readme.txt"),
            Err(FsError::NotADirectory(_))
        ));
        // Transport failures collapse to the same kind.
        let broken = DavAdapter::new(BrokenStore);
        assert!(matches!(
            broken.rmdir("/docs"),
            Err(FsError::NotADirectory(_))
        ));
    }

    #[test]
    fn rmdir_refuses_non_empty_directories() {
        let fs = docs_adapter();
        assert!(matches!(fs.rmdir("/docs"), Err(FsError::NotEmpty(_))));
        assert!(fs.store().contains("/docs/readme.txt"));
    }

    #[test]
    fn rmdir_deletes_empty_directories() {
        let fs = DavAdapter::new(InMemoryStore::new().with_dir("/empty"));
        fs.rmdir("/empty").unwrap();
        assert!(matches!(
            fs.getattr("/empty"),
            Err(FsError::NoSuchEntry(_))
        ));
    }

    #[test]
    fn rename_passes_store_failures_through() {
        let fs = DavAdapter::new(BrokenStore);
        assert!(matches!(
            fs.rename("/a", "/b"),
            Err(FsError::Store(StoreError::UnexpectedStatus { .. }))
        ));
    }
}
