//! Constants
use std::time::Duration;

/// The `User-Agent` header to send when issuing HTTP requests.
pub const HTTP_USER_AGENT: &str = dle::client::USER_AGENT;

/// The duration before a HTTP request times out.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// The maximum number of redirects to follow for a single request.
pub const HTTP_MAX_REDIRECTS: usize = 5;

/// The default keyword that precedes a word in a launcher query.
pub const DEFAULT_KEYWORD: &str = "rae";

/// The default maximum number of suggestions shown when there's no exact match.
pub const DEFAULT_MAX_SUGGESTED_ITEMS: usize = 10;

/// The default maximum number of definitions shown for an exact match.
pub const DEFAULT_MAX_SHOWN_DEFINITIONS: usize = 10;

/// The default maximum number of characters per line of a definition.
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// The value of the `reset_to_default` preference that resets every preference.
pub const RESET_TO_DEFAULT: &str = "Reset";

/// The prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "RAE_";
