//! A client for querying the Spanish dictionary web site (dle.rae.es).
//!
//! This module provides a high-level async interface for fetching dictionary pages and parsing
//! them into structured data.

use std::time::Duration;

use reqwest::{ClientBuilder, Url, redirect::Policy};

use crate::{DictionaryPage, Error};

/// The base URL of the dictionary's site.
pub const BASE_URL: &str = "https://dle.rae.es";
/// The `User-Agent` header to send. The site rejects requests that don't look like a browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.77 Safari/537.36";

/// An asynchronous client for the Diccionario de la lengua española.
///
/// This client handles the construction of HTTP requests, sending them to the dictionary site,
/// and parsing the HTML response.
#[derive(Debug)]
pub struct Client {
    /// The base URL of the site. Words are appended to it as a path segment.
    base_url: String,
    /// The underlying [`reqwest::Client`] used for making HTTP requests.
    client: reqwest::Client,
}

impl Client {
    /// Constructs a new `Client` with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built. This can happen in environments with
    /// misconfigured network or TLS dependencies. For a non-panicking version, see
    /// [`Client::try_new`].
    #[must_use]
    pub fn new() -> Client {
        Client::try_new().expect("could not construct http client")
    }

    /// Attempts to construct a new `Client` with default settings.
    ///
    /// This is the fallible version of [`Client::new`]. It configures the client with gzip
    /// support, a browser `User-Agent`, a 30-second timeout and at most 5 redirects.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::BuildClient`] if the underlying `reqwest` client fails to build. See
    /// [`ClientBuilder::build`] for more details on potential failures.
    pub fn try_new() -> Result<Client, Error> {
        let client = ClientBuilder::new()
            .gzip(true)
            .user_agent(USER_AGENT)
            .redirect(Policy::limited(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(Error::BuildClient)?;

        Ok(Self::with_client(client))
    }

    /// Constructs a `Client` using a pre-configured `reqwest::Client`.
    ///
    /// This is useful if you want to share an HTTP client between multiple services or require
    /// custom configuration (e.g., proxies, custom headers). The given client is expected to
    /// send a browser-like `User-Agent`.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Client {
        let base_url = String::from(BASE_URL);

        Client { base_url, client }
    }

    /// Replaces the base URL pages are fetched from.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Client {
        self.base_url = base_url.into();
        self
    }

    /// Returns the base URL pages are fetched from.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the URL of the page for `word`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base URL can't be parsed or can't have path segments.
    pub fn word_url(&self, word: &str) -> Result<Url, Error> {
        let invalid = || Error::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;

        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push(word);

        Ok(url)
    }

    /// Fetches the raw HTML of the page for `word`.
    ///
    /// A single request is made; there are no retries.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`]: If the base URL is not usable.
    /// - [`Error::Request`]: If the HTTP request fails due to network issues or a timeout, or
    ///   if the body can't be read.
    /// - [`Error::Status`]: If the server responds with a non-successful status code.
    pub async fn fetch(&self, word: &str) -> Result<String, Error> {
        let url = self.word_url(word)?;

        #[cfg(feature = "log")]
        tracing::debug!(%url, "fetching dictionary page");

        let response = self.client.get(url).send().await.map_err(Error::Request)?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Status(status));
        }

        response.text().await.map_err(Error::Request)
    }

    /// Queries the dictionary for a specific word and returns the parsed page.
    ///
    /// # Errors
    ///
    /// Fails in the same ways as [`Client::fetch`]. Parsing itself never fails.
    pub async fn query(&self, word: &str) -> Result<DictionaryPage, Error> {
        let body = self.fetch(word).await?;

        Ok(DictionaryPage::from_html(&body))
    }
}

impl Default for Client {
    /// Creates a default `Client` instance.
    ///
    /// This is equivalent to calling [`Client::new`].
    fn default() -> Self {
        Self::new()
    }
}
