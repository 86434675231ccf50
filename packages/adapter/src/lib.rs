//! Filesystem operation adapter for davmount.
//!
//! This crate is the translation layer between the kernel-facing request
//! shape (stat this path, read these bytes, list this directory, remove
//! this entry, rename this entry) and the remote store's call shape. It
//! owns no state of its own: every operation is a fresh request-scoped
//! projection of the remote store, and every failure is collapsed into a
//! small POSIX-style error taxonomy the host runtime understands.
//!
//! The pieces:
//!
//! - [`FilesystemOps`]: the fixed operation set as an explicit trait, so
//!   the mount binding, the logging decorator, and tests all program
//!   against one interface.
//! - [`DavAdapter`]: the policy layer. Holds an injected
//!   [`RemoteStore`](davmount_store::RemoteStore) and nothing else.
//! - [`FsError`]: the error kinds, each with an errno value.
//! - [`Logged`]: a decorator adding uniform call logging around any
//!   `FilesystemOps`.
//!
//! # Example
//!
//! ```rust
//! use davmount_adapter::{DavAdapter, FilesystemOps, FsError};
//! use davmount_store::InMemoryStore;
//!
//! let store = InMemoryStore::new()
//!     .with_dir("/docs")
//!     .with_file("/docs/readme.txt", b"ten bytes!");
//! let fs = DavAdapter::new(store);
//!
//! assert_eq!(fs.readdir("/docs").unwrap(), vec![".", "..", "readme.txt"]);
//! assert!(matches!(fs.rmdir("/docs"), Err(FsError::NotEmpty(_))));
//! ```

mod adapter;
mod error;
mod logged;
mod ops;

pub use adapter::DavAdapter;
pub use error::FsError;
pub use logged::Logged;
pub use ops::{FilesystemOps, CURRENT_DIR, PARENT_DIR, RESERVED_ENTRIES};
