//! Error types

use miette::Diagnostic;
use thiserror::Error;

use crate::{cache, config};

/// Application errors for configuration, cache and I/O operations.
///
/// Lookups themselves never fail; these errors only occur while starting up or when talking to
/// the host process.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The configuration could not be loaded.
    #[error("Could not load configuration")]
    #[diagnostic(code(rae::config))]
    Config(#[from] config::Error),
    /// A preference given on the command line was rejected.
    #[error("Invalid preference")]
    #[diagnostic(code(rae::preference))]
    Preference(#[from] config::PreferenceError),
    /// A preference assignment was not of the form `ID=VALUE`.
    #[error("Expected a preference as ID=VALUE, got `{0}`")]
    #[diagnostic(code(rae::preference))]
    PreferenceAssignment(String),
    /// The offline cache could not be loaded.
    #[error("Could not load cache file {path}")]
    #[diagnostic(
        code(rae::cache),
        help("the cache is a JSON object with a `words` map and a `last_checked` timestamp")
    )]
    LoadCache {
        /// Path of the cache file.
        path: String,
        /// The underlying error.
        #[source]
        source: cache::Error,
    },
    /// Failed to create the HTTP client.
    #[error("Could not construct http client")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to read a query from the host.
    #[error("Could not read query")]
    ReadQuery(#[source] std::io::Error),
    /// Failed to write results to the host.
    #[error("Could not write results")]
    WriteResults(#[source] std::io::Error),
    /// Failed to encode results.
    #[error("Could not encode results")]
    EncodeResults(#[from] serde_json::Error),
}
