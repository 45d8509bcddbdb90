//! Offline cache of precomputed definitions
//!
//! The cache is a JSON file built ahead of time for the most common words:
//!
//! ```json
//! {
//!     "words": {
//!         "casa": [
//!             { "abbrs": "f.", "definition": "Edificio para habitar.", "html_code": "7nXzqjE" }
//!         ]
//!     },
//!     "last_checked": 1650000000.5
//! }
//! ```
//!
//! It is loaded once at startup and only read afterwards.
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use dle::DefinitionEntry;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::debug;

/// Errors that can occur when loading a cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The cache file could not be opened or read.
    #[error("could not read cache: {0}")]
    Read(#[from] io::Error),
    /// The cache file is not valid JSON or doesn't have the expected structure.
    #[error("invalid cache: {0}")]
    Parse(#[from] serde_path_to_error::Error<serde_json::Error>),
    /// The `last_checked` timestamp is out of range.
    #[error("invalid last_checked timestamp: {0}")]
    Timestamp(f64),
}

/// The on-disk representation of the cache.
#[derive(Debug, Deserialize)]
struct CacheFile {
    #[serde(default)]
    words: HashMap<String, Vec<CachedDefinition>>,
    last_checked: Option<f64>,
}

/// A single cached sense.
#[derive(Debug, Deserialize)]
struct CachedDefinition {
    abbrs: String,
    definition: String,
    html_code: String,
}

/// Precomputed definitions by word.
#[derive(Debug, Default)]
pub struct Cache {
    words: HashMap<String, Vec<DefinitionEntry>>,
    last_checked: Option<OffsetDateTime>,
}

impl From<CachedDefinition> for DefinitionEntry {
    fn from(cached: CachedDefinition) -> Self {
        DefinitionEntry {
            abbreviations: cached.abbrs,
            text: cached.definition,
            anchor_id: cached.html_code,
        }
    }
}

impl Cache {
    /// Loads the cache file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file can't be read, and [`Error::Parse`] or
    /// [`Error::Timestamp`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Cache, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let cache = Cache::from_reader(BufReader::new(file))?;

        debug!(?path, num_words = cache.len(), "loaded cache");

        Ok(cache)
    }

    /// Reads a cache from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] naming the offending field if the JSON doesn't have the expected
    /// structure, and [`Error::Timestamp`] if `last_checked` is out of range.
    pub fn from_reader(reader: impl Read) -> Result<Cache, Error> {
        let mut deserializer = serde_json::Deserializer::from_reader(reader);
        let file: CacheFile = serde_path_to_error::deserialize(&mut deserializer)?;

        let last_checked = file.last_checked.map(timestamp).transpose()?;
        let words = file
            .words
            .into_iter()
            .map(|(word, definitions)| {
                let entries = definitions.into_iter().map(DefinitionEntry::from).collect();

                (word, entries)
            })
            .collect();

        Ok(Cache {
            words,
            last_checked,
        })
    }

    /// Returns the cached senses of `word`, in page order.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&[DefinitionEntry]> {
        self.words.get(word).map(Vec::as_slice)
    }

    /// Returns the number of cached words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no words are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns when the cache was last built, if recorded.
    #[must_use]
    pub const fn last_checked(&self) -> Option<OffsetDateTime> {
        self.last_checked
    }
}

impl FromIterator<(String, Vec<DefinitionEntry>)> for Cache {
    fn from_iter<T: IntoIterator<Item = (String, Vec<DefinitionEntry>)>>(iter: T) -> Self {
        Cache {
            words: iter.into_iter().collect(),
            last_checked: None,
        }
    }
}

/// Converts fractional epoch seconds to a date and time.
#[allow(clippy::cast_possible_truncation)]
fn timestamp(secs: f64) -> Result<OffsetDateTime, Error> {
    if !secs.is_finite() {
        return Err(Error::Timestamp(secs));
    }

    OffsetDateTime::from_unix_timestamp_nanos((secs * 1e9) as i128)
        .map_err(|_| Error::Timestamp(secs))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CACHE: &str = r#"{
        "words": {
            "casa": [
                { "abbrs": "f.", "definition": "Edificio para habitar.", "html_code": "7nXzqjE" },
                { "abbrs": "f. Am.", "definition": "Juego de la rayuela.", "html_code": "7nq0ZTw" }
            ],
            "vacío": []
        },
        "last_checked": 1650000000.5
    }"#;

    #[test]
    fn reads_words_in_order() {
        let cache = Cache::from_reader(CACHE.as_bytes()).unwrap();
        let entries = cache.get("casa").unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].abbreviations, "f.");
        assert_eq!(entries[0].text, "Edificio para habitar.");
        assert_eq!(entries[0].anchor_id, "7nXzqjE");
        assert_eq!(entries[1].anchor_id, "7nq0ZTw");
        assert_eq!(cache.get("vacío").map(<[_]>::len), Some(0));
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let cache = Cache::from_reader(CACHE.as_bytes()).unwrap();

        assert!(cache.get("Casa").is_none());
    }

    #[test]
    fn reads_last_checked() {
        let cache = Cache::from_reader(CACHE.as_bytes()).unwrap();

        assert_eq!(
            cache.last_checked().map(OffsetDateTime::unix_timestamp),
            Some(1_650_000_000)
        );
    }

    #[test]
    fn missing_fields_default() {
        let cache = Cache::from_reader("{}".as_bytes()).unwrap();

        assert!(cache.is_empty());
        assert!(cache.last_checked().is_none());
    }

    #[test]
    fn reports_path_of_malformed_field() {
        let json = r#"{ "words": { "casa": [ { "abbrs": "f.", "definition": 1, "html_code": "x" } ] } }"#;
        let err = Cache::from_reader(json.as_bytes()).unwrap_err();

        match err {
            Error::Parse(err) => assert_eq!(err.path().to_string(), "words.casa[0].definition"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CACHE.as_bytes()).unwrap();
        file.flush().unwrap();

        let cache = Cache::load(file.path()).unwrap();

        assert!(cache.get("casa").is_some());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Cache::load(dir.path().join("missing.json"));

        assert!(matches!(result, Err(Error::Read(_))));
    }
}
