//! Inode-to-path bookkeeping.
//!
//! The kernel speaks inodes, the adapter speaks paths. This table hands out
//! stable inode numbers for paths as the kernel discovers them and keeps
//! the two views in sync across unlink/rmdir/rename.
//!
//! Bindings carry the kernel's lookup count: every `lookup` reply adds a
//! reference, every `forget` drops some, and a binding whose count reaches
//! zero is evicted so a long-lived mount does not accumulate entries for
//! the whole share.

use std::collections::HashMap;

use fuser::FUSE_ROOT_ID;

struct Binding {
    path: String,
    lookups: u64,
}

pub struct InodeTable {
    by_ino: HashMap<u64, Binding>,
    by_path: HashMap<String, u64>,
    next_ino: u64,
}

impl InodeTable {
    /// A table with the share root bound to the FUSE root inode.
    pub fn new() -> Self {
        let mut by_ino = HashMap::new();
        let mut by_path = HashMap::new();
        by_ino.insert(
            FUSE_ROOT_ID,
            Binding {
                path: "/".to_string(),
                lookups: 1,
            },
        );
        by_path.insert("/".to_string(), FUSE_ROOT_ID);
        Self {
            by_ino,
            by_path,
            next_ino: FUSE_ROOT_ID + 1,
        }
    }

    /// The inode for `path`, allocating one on first sight. Does not touch
    /// the lookup count; directory entries handed out by readdir are not
    /// references the kernel will forget.
    pub fn assign(&mut self, path: &str) -> u64 {
        if let Some(ino) = self.by_path.get(path) {
            return *ino;
        }
        let ino = self.next_ino;
        self.next_ino += 1;
        self.by_ino.insert(
            ino,
            Binding {
                path: path.to_string(),
                lookups: 0,
            },
        );
        self.by_path.insert(path.to_string(), ino);
        ino
    }

    /// The inode for `path` with one more kernel reference on it. Used
    /// when replying to a lookup, which is what the kernel later forgets.
    pub fn remember(&mut self, path: &str) -> u64 {
        let ino = self.assign(path);
        if let Some(binding) = self.by_ino.get_mut(&ino) {
            binding.lookups += 1;
        }
        ino
    }

    pub fn path(&self, ino: u64) -> Option<&str> {
        self.by_ino.get(&ino).map(|b| b.path.as_str())
    }

    /// Drop `nlookup` kernel references from `ino`, evicting the binding
    /// when none remain. The root is never evicted.
    pub fn forget(&mut self, ino: u64, nlookup: u64) {
        if ino == FUSE_ROOT_ID {
            return;
        }
        let Some(binding) = self.by_ino.get_mut(&ino) else {
            return;
        };
        binding.lookups = binding.lookups.saturating_sub(nlookup);
        if binding.lookups == 0 {
            let path = binding.path.clone();
            self.by_ino.remove(&ino);
            self.by_path.remove(&path);
        }
    }

    /// Drop the binding for a removed entry.
    pub fn forget_path(&mut self, path: &str) {
        if let Some(ino) = self.by_path.remove(path) {
            self.by_ino.remove(&ino);
        }
    }

    /// Move every binding under `old` to the matching path under `new`,
    /// keeping inodes stable. Children move with their directory, the
    /// same way the store's own move rewrites child keys.
    pub fn rebind(&mut self, old: &str, new: &str) {
        let child_prefix = format!("{}/", old);
        let moved: Vec<(String, String)> = self
            .by_path
            .keys()
            .filter(|k| *k == old || k.starts_with(&child_prefix))
            .map(|k| (k.clone(), format!("{}{}", new, &k[old.len()..])))
            .collect();

        for (from, to) in moved {
            if let Some(ino) = self.by_path.remove(&from) {
                self.by_path.insert(to.clone(), ino);
                if let Some(binding) = self.by_ino.get_mut(&ino) {
                    binding.path = to;
                }
            }
        }
    }

    /// How many bindings are live, for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.by_ino.len()
    }
}

/// Join a child name onto a parent path.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// The parent of `path`; the root is its own parent.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}
