//! Resolving a word to a list of results
//!
//! A lookup first checks the offline [`Cache`], then falls back to fetching the word's page from
//! the dictionary site. Whatever happens, the lookup ends with a non-empty list of
//! [`ResultEntry`] values.
use std::borrow::Cow;

use async_trait::async_trait;
use dle::{DefinitionEntry, DictionaryPage, SuggestionEntry};
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::classify::Case;
use crate::config::Preferences;
use crate::result::{self, ResultEntry};

/// A source of dictionary pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the HTML of the page for `word`.
    async fn fetch_page(&self, word: &str) -> Result<String, dle::Error>;
}

#[async_trait]
impl PageSource for dle::Client {
    async fn fetch_page(&self, word: &str) -> Result<String, dle::Error> {
        self.fetch(word).await
    }
}

/// Where the senses of an exact match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Cache,
    Live,
}

/// A classified lookup, with the data needed to build its results.
#[derive(Debug)]
enum Classified<'a> {
    EmptyWord,
    NoMatch {
        word: &'a str,
    },
    Approx {
        word: &'a str,
        suggestions: Vec<SuggestionEntry>,
    },
    Exact {
        word: &'a str,
        entries: Cow<'a, [DefinitionEntry]>,
        origin: Origin,
    },
    FetchFailed {
        word: &'a str,
        reason: String,
    },
}

impl<'a> Classified<'a> {
    /// Classifies a fetched page.
    ///
    /// A case whose list of entries turns out to be empty is downgraded to no match.
    fn from_page(word: &'a str, page: DictionaryPage) -> Classified<'a> {
        match Case::of_page(&page) {
            Case::ExactMatch => Classified::exact(word, Cow::Owned(page.definitions), Origin::Live),
            Case::ApproxMatch if page.suggestions.is_empty() => {
                warn!(%word, "page has a list of suggestions without any entries");

                Classified::NoMatch { word }
            }
            Case::ApproxMatch => Classified::Approx {
                word,
                suggestions: page.suggestions,
            },
            Case::NoMatch | Case::EmptyWord => Classified::NoMatch { word },
        }
    }

    fn exact(
        word: &'a str,
        entries: Cow<'a, [DefinitionEntry]>,
        origin: Origin,
    ) -> Classified<'a> {
        if entries.is_empty() {
            warn!(%word, ?origin, "exact match without any definitions");

            Classified::NoMatch { word }
        } else {
            Classified::Exact {
                word,
                entries,
                origin,
            }
        }
    }

    /// Returns the case this lookup was classified as.
    const fn case(&self) -> Case {
        match self {
            Classified::EmptyWord => Case::EmptyWord,
            Classified::NoMatch { .. } | Classified::FetchFailed { .. } => Case::NoMatch,
            Classified::Approx { .. } => Case::ApproxMatch,
            Classified::Exact { .. } => Case::ExactMatch,
        }
    }

    /// Builds the results for the user.
    ///
    /// Falls back to the no-match notice if the builder produced nothing, which happens when the
    /// configured limit is zero.
    fn into_results(self, preferences: &Preferences) -> Vec<ResultEntry> {
        let base = preferences.origin();

        let (word, results) = match self {
            Classified::EmptyWord => return result::build_empty_word_result(),
            Classified::NoMatch { word } => return result::build_no_match_result(word, base),
            Classified::FetchFailed { word, reason } => {
                return result::build_fetch_failure_result(word, base, &reason);
            }
            Classified::Approx { word, suggestions } => (
                word,
                result::build_approx_result(
                    &suggestions,
                    &preferences.keyword,
                    preferences.max_suggested_items,
                ),
            ),
            Classified::Exact {
                word,
                entries,
                origin,
            } => {
                debug!(%word, ?origin, num_entries = entries.len(), "building definitions");

                (
                    word,
                    result::build_exact_result(
                        &entries,
                        word,
                        preferences.max_shown_definitions,
                        preferences.line_width,
                        base,
                    ),
                )
            }
        };

        if results.is_empty() {
            debug!("no results within the configured limits");

            return result::build_no_match_result(word, base);
        }

        results
    }
}

/// Resolves words to results, using the cache before the network.
pub struct Coordinator<S> {
    /// Precomputed definitions, read-only.
    cache: Cache,
    /// Where pages of words missing from the cache are fetched from.
    source: S,
}

impl<S: PageSource> Coordinator<S> {
    /// Creates a coordinator that looks words up in `cache` first and fetches them from `source`
    /// otherwise.
    pub const fn new(cache: Cache, source: S) -> Coordinator<S> {
        Coordinator { cache, source }
    }

    /// Looks up `word` and returns the results to show, in display order.
    ///
    /// An absent or blank word gives the empty-word prompt. A word present in the cache is never
    /// fetched. Otherwise the page is fetched once, without retries; a failed fetch gives a
    /// notice with a link to the page rather than an error.
    ///
    /// The returned list is never empty.
    pub async fn lookup(&self, word: Option<&str>, preferences: &Preferences) -> Vec<ResultEntry> {
        let classified = self.classify(word).await;

        debug!(case = %classified.case(), "classified lookup");

        classified.into_results(preferences)
    }

    async fn classify<'a>(&'a self, word: Option<&'a str>) -> Classified<'a> {
        let Some(word) = word.map(str::trim).filter(|word| !word.is_empty()) else {
            return Classified::EmptyWord;
        };

        if let Some(entries) = self.cache.get(word) {
            debug!(%word, "found word in cache");

            return Classified::exact(word, Cow::Borrowed(entries), Origin::Cache);
        }

        debug!(%word, "fetching word");

        match self.source.fetch_page(word).await {
            Ok(html) => Classified::from_page(word, DictionaryPage::from_html(&html)),
            Err(err) => {
                warn!(%word, error = %err, "could not fetch dictionary page");

                Classified::FetchFailed {
                    word,
                    reason: err.to_string(),
                }
            }
        }
    }
}
