//! Filesystem-visible error kinds.

use davmount_store::StoreError;

/// Errors an adapter operation can signal to the host runtime.
///
/// The first four kinds carry the path that triggered them. Everything the
/// remote store reports that the adapter does not deliberately collapse
/// passes through as [`FsError::Store`] and surfaces as an I/O error.
///
/// There is intentionally no distinction between "transient network
/// failure" and "permanent absence": both collapse into the same kind at
/// the call sites that collapse at all (`getattr`, `rmdir`). The store
/// error kinds stay available inside [`FsError::Store`] for anyone who
/// needs to look.
#[derive(thiserror::Error, Debug)]
pub enum FsError {
    /// The entry does not exist, or could not be proven to exist.
    #[error("no such entry: {0}")]
    NoSuchEntry(String),

    /// A non-directory removal was attempted on a directory.
    #[error("is a directory: {0}")]
    IsADirectory(String),

    /// A directory operation was attempted where no directory could be
    /// listed.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Directory removal was blocked by remaining children.
    #[error("directory not empty: {0}")]
    NotEmpty(String),

    /// A remote store failure passed through unmapped.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FsError {
    /// The errno value the host runtime should reply with.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NoSuchEntry(_) => libc::ENOENT,
            FsError::IsADirectory(_) => libc::EISDIR,
            FsError::NotADirectory(_) => libc::ENOTDIR,
            FsError::NotEmpty(_) => libc::ENOTEMPTY,
            FsError::Store(_) => libc::EIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_mapping_matches_posix() {
        assert_eq!(FsError::NoSuchEntry("/x".into()).errno(), libc::ENOENT);
        assert_eq!(FsError::IsADirectory("/x".into()).errno(), libc::EISDIR);
        assert_eq!(FsError::NotADirectory("/x".into()).errno(), libc::ENOTDIR);
        assert_eq!(FsError::NotEmpty("/x".into()).errno(), libc::ENOTEMPTY);
    }

    #[test]
    fn store_errors_surface_as_io() {
        let e: FsError = StoreError::NotFound { path: "/x".into() }.into();
        assert_eq!(e.errno(), libc::EIO);
    }
}
