use thiserror::Error;

/// Local failures that are not part of the API result taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("unsupported API base URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("token storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("token storage is unavailable")]
    StorageUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;
