//! Launcher query parsing

/// Extracts the word from a launcher query such as `rae casa`.
///
/// # Example
///
/// ```rust
/// use rae::query::Keyword;
/// let keyword = Keyword::new("rae");
/// assert_eq!(keyword.parse("rae casa"), Some(Some("casa")));
/// assert_eq!(keyword.parse("rae"), Some(None));
/// assert_eq!(keyword.parse("raest casa"), None);
/// assert_eq!(keyword.word("casa"), Some("casa"));
/// ```
pub struct Keyword {
    /// The keyword to match against.
    prefix: String,
}

impl Keyword {
    /// Creates a new parser that expects the given keyword.
    #[must_use]
    pub fn new(prefix: &str) -> Keyword {
        Keyword {
            prefix: prefix.to_string(),
        }
    }

    /// Checks if the query starts with the keyword, and if so, returns the word following it, if
    /// any.
    ///
    /// The word is trimmed; a blank word is returned as `None`.
    #[must_use]
    pub fn parse<'a>(&self, query: &'a str) -> Option<Option<&'a str>> {
        let query = query.trim_start();
        let suffix = query.strip_prefix(&self.prefix)?;

        match suffix.chars().next() {
            // The keyword is followed by whitespace, so the rest is the word
            Some(c) if c.is_whitespace() => Some(non_blank(suffix)),
            // There's a proceeding character and it's not whitespace, so it's most likely part
            // of a word that merely starts with the keyword.
            Some(_) => None,
            // The query is identical to the keyword, so there's no word.
            None => Some(None),
        }
    }

    /// Returns the word of a query, which may or may not start with the keyword.
    ///
    /// A query that doesn't start with the keyword is taken to be the word itself.
    #[must_use]
    pub fn word<'a>(&self, query: &'a str) -> Option<&'a str> {
        self.parse(query).unwrap_or_else(|| non_blank(query))
    }
}

fn non_blank(s: &str) -> Option<&str> {
    Some(s.trim()).filter(|s| !s.is_empty())
}
