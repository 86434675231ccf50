//! In-memory remote store.
//!
//! A `BTreeMap`-backed store with the same observable contract as a real
//! remote: single-level listings, recursive delete, prefix-rewriting move.
//! Used as the injected fake in adapter tests and for offline demos.

use std::collections::BTreeMap;
use std::sync::RwLock;

use bytes::Bytes;

use crate::{RemoteStore, ResourceAttr, StoreError};

#[derive(Debug, Clone)]
enum Entry {
    File(Bytes),
    Dir,
}

/// An in-memory [`RemoteStore`].
///
/// Paths are stored normalized: leading `/`, no trailing `/`, root is `/`.
///
/// # Example
///
/// ```rust
/// use davmount_store::{InMemoryStore, RemoteStore};
///
/// let store = InMemoryStore::new()
///     .with_dir("/docs")
///     .with_file("/docs/readme.txt", b"ten bytes!");
///
/// assert_eq!(store.list_files("/docs").unwrap(), vec!["readme.txt"]);
/// ```
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, Entry>>,
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn child_prefix(path: &str) -> String {
    if path == "/" {
        "/".to_string()
    } else {
        format!("{}/", path)
    }
}

impl InMemoryStore {
    /// Create an empty store containing only the root collection.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("/".to_string(), Entry::Dir);
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Add a directory (builder form).
    pub fn with_dir(self, path: &str) -> Self {
        self.add_dir(path);
        self
    }

    /// Add a file with the given contents (builder form).
    pub fn with_file(self, path: &str, contents: &[u8]) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Add a directory to a store already in use.
    pub fn add_dir(&self, path: &str) {
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(normalize(path), Entry::Dir);
    }

    /// Add or replace a file in a store already in use.
    pub fn add_file(&self, path: &str, contents: &[u8]) {
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(normalize(path), Entry::File(Bytes::copy_from_slice(contents)));
    }

    /// Whether any entry exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries
            .read()
            .expect("store lock poisoned")
            .contains_key(&normalize(path))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for InMemoryStore {
    fn stat(&self, path: &str) -> Result<ResourceAttr, StoreError> {
        let path = normalize(path);
        let entries = self.entries.read().expect("store lock poisoned");
        match entries.get(&path) {
            Some(Entry::File(data)) => Ok(ResourceAttr::file(data.len() as u64)),
            Some(Entry::Dir) => Ok(ResourceAttr::directory()),
            None => Err(StoreError::NotFound { path }),
        }
    }

    fn read(&self, path: &str, start: u64, end: u64) -> Result<Bytes, StoreError> {
        let path = normalize(path);
        let entries = self.entries.read().expect("store lock poisoned");
        match entries.get(&path) {
            Some(Entry::File(data)) => {
                let len = data.len() as u64;
                let start = start.min(len) as usize;
                let end = end.min(len) as usize;
                Ok(data.slice(start..end.max(start)))
            }
            // Collections have no byte contents.
            Some(Entry::Dir) => Err(StoreError::NotACollection { path }),
            None => Err(StoreError::NotFound { path }),
        }
    }

    fn list_files(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let path = normalize(path);
        let entries = self.entries.read().expect("store lock poisoned");
        match entries.get(&path) {
            Some(Entry::Dir) => {}
            Some(Entry::File(_)) => return Err(StoreError::NotACollection { path }),
            None => return Err(StoreError::NotFound { path }),
        }

        let prefix = child_prefix(&path);
        let names = entries
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .filter_map(|(k, _)| {
                let rest = &k[prefix.len()..];
                // Direct children only.
                if rest.is_empty() || rest.contains('/') {
                    None
                } else {
                    Some(rest.to_string())
                }
            })
            .collect();
        Ok(names)
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        let path = normalize(path);
        let mut entries = self.entries.write().expect("store lock poisoned");
        if entries.remove(&path).is_none() {
            return Err(StoreError::NotFound { path });
        }
        // Collections go recursively, like a remote DELETE would.
        let prefix = child_prefix(&path);
        entries.retain(|k, _| !k.starts_with(&prefix));
        Ok(())
    }

    fn mv(&self, source: &str, destination: &str) -> Result<(), StoreError> {
        let source = normalize(source);
        let destination = normalize(destination);
        let mut entries = self.entries.write().expect("store lock poisoned");
        let Some(entry) = entries.remove(&source) else {
            return Err(StoreError::NotFound { path: source });
        };

        let prefix = child_prefix(&source);
        let moved_children: Vec<(String, Entry)> = entries
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| {
                let suffix = k[prefix.len()..].to_string();
                (format!("{}{}", child_prefix(&destination), suffix), v.clone())
            })
            .collect();
        entries.retain(|k, _| !k.starts_with(&prefix));

        entries.insert(destination, entry);
        entries.extend(moved_children);
        Ok(())
    }
}
