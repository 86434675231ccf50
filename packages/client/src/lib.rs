//! # davmount-client
//!
//! A blocking WebDAV client implementing the davmount remote store
//! contract.
//!
//! The store maps contract operations to WebDAV requests:
//!
//! - `stat(path)` is a `PROPFIND` with `Depth: 0`
//! - `list_files(path)` is a `PROPFIND` with `Depth: 1`
//! - `read(path, start, end)` is a ranged `GET`
//! - `delete(path)` is a `DELETE`
//! - `mv(source, destination)` is a `MOVE` with an absolute `Destination`
//!
//! ## Example
//!
//! ```ignore
//! use davmount_client::DavClient;
//! use davmount_store::RemoteStore;
//!
//! let client = DavClient::new("https://dav.example.com/remote.php/dav/")?
//!     .with_basic_auth("alice", "secret");
//!
//! let attr = client.stat("/docs/readme.txt")?;
//! let bytes = client.read("/docs/readme.txt", 0, attr.size)?;
//! ```

mod blocking;
mod error;
mod multistatus;

pub use blocking::DavClient;
pub use error::Error;
