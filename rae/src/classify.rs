//! Classification of lookup outcomes
use std::fmt::{self, Display};

use dle::DictionaryPage;
use serde::Serialize;

/// The outcome of a lookup, which decides what kind of results are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Case {
    /// No word was given.
    EmptyWord,
    /// Neither definitions nor suggestions were found.
    NoMatch,
    /// The word has no entry, but related headwords were suggested.
    ApproxMatch,
    /// The word has an entry with one or more senses.
    ExactMatch,
}

/// Classifies a page from the markers found on it.
///
/// Definitions win over suggestions when a page has both.
#[must_use]
pub const fn classify(has_definitions: bool, has_suggestion_list: bool) -> Case {
    if has_definitions {
        Case::ExactMatch
    } else if has_suggestion_list {
        Case::ApproxMatch
    } else {
        Case::NoMatch
    }
}

impl Case {
    /// Classifies a parsed dictionary page.
    #[must_use]
    pub const fn of_page(page: &DictionaryPage) -> Case {
        classify(page.has_definition_marker, page.has_suggestion_marker)
    }
}

impl Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Case::EmptyWord => "empty word",
            Case::NoMatch => "no match",
            Case::ApproxMatch => "approximate match",
            Case::ExactMatch => "exact match",
        };

        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(true, true, Case::ExactMatch)]
    #[case(true, false, Case::ExactMatch)]
    #[case(false, true, Case::ApproxMatch)]
    #[case(false, false, Case::NoMatch)]
    fn classifies_by_precedence(
        #[case] has_definitions: bool,
        #[case] has_suggestion_list: bool,
        #[case] expected: Case,
    ) {
        assert_eq!(classify(has_definitions, has_suggestion_list), expected);
    }

    #[test]
    fn classifies_empty_page_as_no_match() {
        assert_eq!(Case::of_page(&DictionaryPage::default()), Case::NoMatch);
    }
}
