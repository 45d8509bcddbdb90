//! Configuration and user preferences
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::consts;

/// Errors that can occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The given configuration file doesn't exist.
    #[error("config file {} does not exist", .0.display())]
    NotFound(PathBuf),
    /// The configuration could not be read or deserialized.
    #[error("could not load configuration: {0}")]
    Load(#[source] Box<figment::Error>),
    /// The loaded preferences are not usable.
    #[error("invalid preferences: {0}")]
    Preferences(#[from] PreferenceError),
}

/// Errors that can occur when changing a preference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
    /// There's no preference with the given id.
    #[error("unknown preference `{0}`")]
    Unknown(String),
    /// A numeric preference was given something other than a non-negative integer.
    #[error("`{id}` must be a non-negative integer, got `{value}`")]
    NotAnInteger {
        /// The id of the preference.
        id: String,
        /// The rejected value.
        value: String,
    },
    /// The line width was set to zero.
    #[error("`line_width` must be greater than zero")]
    ZeroLineWidth,
    /// The base URL could not be parsed.
    #[error("`base_url` is not a valid url: `{0}`")]
    InvalidBaseUrl(String),
}

/// The complete configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Lookup preferences
    pub preferences: Preferences,
    /// Offline cache configuration
    pub cache: CacheConfig,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
}

/// The preferences a lookup is performed with.
///
/// Preferences are never changed in place: [`Preferences::update`] returns a new value, so a
/// lookup always sees one consistent set of preferences.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Preferences {
    /// The keyword that precedes the word in a launcher query, e.g. `rae` in `rae casa`.
    pub keyword: String,
    /// The maximum number of distinct suggestions to show when there's no exact match.
    pub max_suggested_items: usize,
    /// The maximum number of definitions to show for an exact match.
    pub max_shown_definitions: usize,
    /// The origin of the dictionary site, used for fetching pages and for links.
    pub base_url: String,
    /// The maximum number of characters per line of a definition.
    pub line_width: usize,
}

/// Offline cache configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Path to the offline cache file. Without one, every lookup goes to the network.
    pub path: Option<PathBuf>,
}

/// HTTP client configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// The duration before a request times out, e.g. `30s`
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// The `User-Agent` header to send
    pub user_agent: String,
}

/// Tracing configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TracingConfig {
    /// Enable exporting traces over OTLP
    #[serde(default)]
    pub enabled: bool,
}

impl Config {
    /// Loads the configuration.
    ///
    /// Values are layered: built-in defaults, then the TOML file at `path` (if any), then
    /// environment variables prefixed with `RAE_`, where `__` separates nested keys (e.g.
    /// `RAE_PREFERENCES__LINE_WIDTH=100`).
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `path` is given but doesn't exist
    /// - [`Error::Load`] if a value can't be parsed
    /// - [`Error::Preferences`] if the resulting preferences are invalid
    pub fn load(path: Option<&Path>) -> Result<Config, Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(Error::NotFound(path.to_path_buf()));
            }

            debug!(?path, "loading config file");
            figment = figment.merge(Toml::file_exact(path));
        }

        Config::from_figment(figment.merge(Env::prefixed(consts::ENV_PREFIX).split("__")))
    }

    /// Extracts and validates a configuration from the given figment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_figment(figment: Figment) -> Result<Config, Error> {
        let config: Config = figment.extract().map_err(|err| Error::Load(Box::new(err)))?;

        config.preferences.validate()?;

        Ok(config)
    }
}

impl Preferences {
    /// Returns a copy of the preferences with the preference `id` set to `value`.
    ///
    /// Numeric preferences accept integer-valued input only: `4` and `4.0` are accepted while
    /// `4.2` is rejected rather than truncated. Setting `reset_to_default` to `Reset` returns the
    /// default preferences, any other value for it changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`PreferenceError`] if `id` is unknown or `value` is not valid for it. `self` is
    /// left untouched, so the previous value stays in effect.
    pub fn update(&self, id: &str, value: &str) -> Result<Preferences, PreferenceError> {
        let mut updated = self.clone();

        match id {
            "keyword" => updated.keyword = value.trim().to_string(),
            "max_suggested_items" => updated.max_suggested_items = parse_count(id, value)?,
            "max_shown_definitions" => updated.max_shown_definitions = parse_count(id, value)?,
            "line_width" => updated.line_width = parse_count(id, value)?,
            "base_url" => updated.base_url = value.trim().to_string(),
            "reset_to_default" => {
                if value == consts::RESET_TO_DEFAULT {
                    info!("preferences were reset to their default values");

                    return Ok(Preferences::default());
                }

                return Ok(updated);
            }
            _ => return Err(PreferenceError::Unknown(id.to_string())),
        }

        updated.validate()?;
        info!(%id, %value, "preference changed");

        Ok(updated)
    }

    /// Checks that the preferences can be used for a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::ZeroLineWidth`] or [`PreferenceError::InvalidBaseUrl`].
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if self.line_width == 0 {
            return Err(PreferenceError::ZeroLineWidth);
        }

        Url::parse(&self.base_url)
            .map_err(|_| PreferenceError::InvalidBaseUrl(self.base_url.clone()))?;

        Ok(())
    }

    /// Returns the base URL without trailing slashes, ready to have paths appended.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            keyword: consts::DEFAULT_KEYWORD.to_string(),
            max_suggested_items: consts::DEFAULT_MAX_SUGGESTED_ITEMS,
            max_shown_definitions: consts::DEFAULT_MAX_SHOWN_DEFINITIONS,
            base_url: dle::client::BASE_URL.to_string(),
            line_width: consts::DEFAULT_LINE_WIDTH,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout: consts::HTTP_TIMEOUT,
            user_agent: consts::HTTP_USER_AGENT.to_string(),
        }
    }
}

/// Parses a non-negative, integer-valued number such as `4` or `4.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(id: &str, value: &str) -> Result<usize, PreferenceError> {
    let value = value.trim();
    let invalid = || PreferenceError::NotAnInteger {
        id: id.to_string(),
        value: value.to_string(),
    };

    if let Ok(count) = value.parse::<usize>() {
        return Ok(count);
    }

    let number: f64 = value.parse().map_err(|_| invalid())?;

    if number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= u32::MAX.into() {
        Ok(number as usize)
    } else {
        Err(invalid())
    }
}
