use davmount_store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("multistatus response missing element <{element}>")]
    MissingElement { element: &'static str },

    #[error("invalid value for property {property}: {message}")]
    InvalidProperty {
        property: &'static str,
        message: String,
    },

    #[error("invalid href in listing: {message}")]
    InvalidHref { message: String },
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        match error {
            Error::Http(e) => StoreError::Transport(Box::new(e)),
            Error::UrlParse(e) => StoreError::Transport(Box::new(e)),
            other => StoreError::MalformedResponse {
                message: other.to_string(),
            },
        }
    }
}
