//! Error types at the store layer.
//!
//! Errors here are about the remote store and its transport. Filesystem
//! semantics (errno kinds, deletion policy) belong to the adapter layer
//! above, which collapses these into its own taxonomy.

/// Errors produced by a [`RemoteStore`](crate::RemoteStore) implementation.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Generic transport failure: connection refused, TLS, timeouts.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The resource does not exist on the remote store.
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// The server answered, but not with the status the protocol requires.
    #[error("{verb} {path} returned unexpected status {status}")]
    UnexpectedStatus {
        verb: &'static str,
        path: String,
        status: u16,
    },

    /// The server's response body could not be interpreted.
    #[error("malformed server response: {message}")]
    MalformedResponse { message: String },

    /// Listing was attempted on something that is not a collection.
    #[error("not a collection: {path}")]
    NotACollection { path: String },
}

impl StoreError {
    /// Wrap an arbitrary error as a transport failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Transport(Box::new(err))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Transport(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_detail() {
        let e = StoreError::UnexpectedStatus {
            verb: "PROPFIND",
            path: "/docs".to_string(),
            status: 500,
        };
        let s = format!("{}", e);
        assert!(s.contains("PROPFIND"));
        assert!(s.contains("/docs"));
        assert!(s.contains("500"));
    }

    #[test]
    fn io_error_converts_to_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let e: StoreError = io.into();
        assert!(matches!(e, StoreError::Transport(_)));
    }
}
