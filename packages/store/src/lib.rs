//! Remote store contract for davmount.
//!
//! This is the narrow waist between the filesystem adapter and whatever
//! transport actually holds the data. Everything at this level is paths and
//! bytes - no kernel types, no errno values, no HTTP.
//!
//! A path here is an opaque `&str` used identically as the filesystem path
//! and the remote key; no translation table sits between the two.
//!
//! # Example
//!
//! ```rust
//! use davmount_store::{InMemoryStore, RemoteStore};
//!
//! let store = InMemoryStore::new()
//!     .with_dir("/docs")
//!     .with_file("/docs/readme.txt", b"hello");
//!
//! let attr = store.stat("/docs/readme.txt").unwrap();
//! assert!(!attr.is_dir());
//! assert_eq!(attr.size, 5);
//! ```

pub use bytes::Bytes;

mod attr;
mod error;
mod memory;
mod traits;

pub use attr::{ResourceAttr, ResourceKind};
pub use error::StoreError;
pub use memory::InMemoryStore;
pub use traits::RemoteStore;
