use thiserror::Error;

/// Error.
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(feature = "client")]
    #[error("could not construct http client: {0}")]
    BuildClient(#[source] reqwest::Error),
    #[cfg(feature = "client")]
    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),
    #[cfg(feature = "client")]
    #[error("unexpected response status: {0}")]
    Status(reqwest::StatusCode),
    #[cfg(feature = "client")]
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}
