//! HTTP features

use crate::Error;
use crate::config::HttpConfig;
use crate::consts;

/// Returns a HTTP client builder configured from `config`.
#[must_use]
pub fn builder(config: &HttpConfig) -> reqwest::ClientBuilder {
    reqwest::ClientBuilder::new()
        .gzip(true)
        .redirect(reqwest::redirect::Policy::limited(consts::HTTP_MAX_REDIRECTS))
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
}

/// Builds a HTTP client configured from `config`.
///
/// # Errors
///
/// Returns [`Error::HttpClient`] if the TLS backend can't be initialized.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, Error> {
    builder(config).build().map_err(Error::HttpClient)
}
