//! Result entries shown to the user
//!
//! Each builder corresponds to one [`Case`](crate::classify::Case) and produces the entries in
//! the order they should be displayed.
use std::collections::HashSet;
use std::fmt::{self, Display};

use dle::{DefinitionEntry, SuggestionEntry};
use serde::Serialize;

use crate::wrap::wrap;

/// Title of the prompt shown when no word was given.
pub const EMPTY_WORD_TITLE: &str = "Palabra vacía";
/// Subtitle of the prompt shown when no word was given.
pub const EMPTY_WORD_SUBTITLE: &str = "Ingrese una palabra para buscar en el diccionario.";
/// Title of the notice shown when a word has neither definitions nor suggestions.
pub const NO_MATCH_TITLE: &str = "Sin resultados";
/// Subtitle of the notice shown when a word has neither definitions nor suggestions.
pub const NO_MATCH_SUBTITLE: &str = "No hay definiciones ni sugerencias para esta palabra.";
/// Title of the notice shown when a page could not be fetched.
pub const FETCH_FAILURE_TITLE: &str = "No se pudo consultar el diccionario";
/// Subtitle of every suggestion.
pub const SUGGESTION_SUBTITLE: &str = "Sugerencia RAE";

/// What happens when the user picks an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    /// Close the launcher window.
    HideDisplay,
    /// Copy the text to the clipboard.
    CopyText(String),
    /// Open the URL in a browser.
    OpenLink(String),
    /// Replace the query with the given one.
    ReplaceQuery(String),
}

/// A single entry in a list of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    /// The main line of the entry.
    pub title: String,
    /// Secondary text, possibly spanning several lines.
    pub subtitle: String,
    /// The action taken when the entry is selected.
    pub primary_action: Action,
    /// The action taken when the entry is selected with the alternative key, if any.
    pub secondary_action: Option<Action>,
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::HideDisplay => f.write_str("hide"),
            Action::CopyText(text) => write!(f, "copy {text:?}"),
            Action::OpenLink(url) => write!(f, "open {url}"),
            Action::ReplaceQuery(query) => write!(f, "query {query:?}"),
        }
    }
}

/// Returns the URL of the page for `word`, with `anchor` as the fragment if it's not empty.
#[must_use]
pub fn word_url(origin: &str, word: &str, anchor: &str) -> String {
    let origin = origin.trim_end_matches('/');

    if anchor.is_empty() {
        format!("{origin}/{word}")
    } else {
        format!("{origin}/{word}#{anchor}")
    }
}

/// Returns the prompt shown when no word was given.
#[must_use]
pub fn build_empty_word_result() -> Vec<ResultEntry> {
    vec![ResultEntry {
        title: EMPTY_WORD_TITLE.to_string(),
        subtitle: EMPTY_WORD_SUBTITLE.to_string(),
        primary_action: Action::HideDisplay,
        secondary_action: None,
    }]
}

/// Returns the notice shown when `word` has neither definitions nor suggestions.
///
/// The secondary action opens the page for the word.
#[must_use]
pub fn build_no_match_result(word: &str, origin: &str) -> Vec<ResultEntry> {
    vec![ResultEntry {
        title: NO_MATCH_TITLE.to_string(),
        subtitle: NO_MATCH_SUBTITLE.to_string(),
        primary_action: Action::HideDisplay,
        secondary_action: Some(Action::OpenLink(word_url(origin, word, ""))),
    }]
}

/// Returns the notice shown when the page for `word` could not be fetched.
///
/// Looks like the no-match notice, with the reason as subtitle, and the secondary action opens
/// the page so the user can retry in a browser.
#[must_use]
pub fn build_fetch_failure_result(word: &str, origin: &str, reason: &str) -> Vec<ResultEntry> {
    vec![ResultEntry {
        title: FETCH_FAILURE_TITLE.to_string(),
        subtitle: reason.to_string(),
        primary_action: Action::HideDisplay,
        secondary_action: Some(Action::OpenLink(word_url(origin, word, ""))),
    }]
}

/// Returns up to `limit` distinct suggestions, each replacing the query with
/// `"{query_prefix} {display_name}"`.
///
/// Suggestions with a display name that was already seen are skipped, keeping the note of the
/// first one. The limit applies to the distinct suggestions.
#[must_use]
pub fn build_approx_result(
    suggestions: &[SuggestionEntry],
    query_prefix: &str,
    limit: usize,
) -> Vec<ResultEntry> {
    let mut seen = HashSet::new();

    suggestions
        .iter()
        .filter(|suggestion| seen.insert(suggestion.display_name.as_str()))
        .take(limit)
        .map(|suggestion| {
            let SuggestionEntry { display_name, note } = suggestion;

            ResultEntry {
                title: format!("{display_name} · {note}"),
                subtitle: SUGGESTION_SUBTITLE.to_string(),
                primary_action: Action::ReplaceQuery(format!("{query_prefix} {display_name}")),
                secondary_action: None,
            }
        })
        .collect()
}

/// Returns one entry for each of the first `limit` senses of `word`, in page order.
///
/// The subtitle is the definition wrapped to `line_width` characters per line. Selecting the
/// entry copies the definition and the secondary action opens the sense on the site.
#[must_use]
pub fn build_exact_result(
    entries: &[DefinitionEntry],
    word: &str,
    limit: usize,
    line_width: usize,
    origin: &str,
) -> Vec<ResultEntry> {
    entries
        .iter()
        .take(limit)
        .map(|entry| ResultEntry {
            title: format!("{word} [{}]", entry.abbreviations),
            subtitle: wrap(&entry.text, line_width).join("\n"),
            primary_action: Action::CopyText(entry.text.clone()),
            secondary_action: Some(Action::OpenLink(word_url(origin, word, &entry.anchor_id))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://dle.rae.es";

    fn suggestion(display_name: &str, note: &str) -> SuggestionEntry {
        SuggestionEntry {
            display_name: display_name.to_string(),
            note: note.to_string(),
        }
    }

    fn definition(abbreviations: &str, text: &str, anchor_id: &str) -> DefinitionEntry {
        DefinitionEntry {
            abbreviations: abbreviations.to_string(),
            text: text.to_string(),
            anchor_id: anchor_id.to_string(),
        }
    }

    #[test]
    fn empty_word_hides_display() {
        let results = build_empty_word_result();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, EMPTY_WORD_TITLE);
        assert_eq!(results[0].primary_action, Action::HideDisplay);
        assert_eq!(results[0].secondary_action, None);
    }

    #[test]
    fn no_match_links_to_word_page() {
        let results = build_no_match_result("xkqzw", ORIGIN);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].primary_action, Action::HideDisplay);
        assert_eq!(
            results[0].secondary_action,
            Some(Action::OpenLink("https://dle.rae.es/xkqzw".to_string()))
        );
    }

    #[test]
    fn approx_keeps_first_duplicate() {
        let suggestions = [
            suggestion("a", "1"),
            suggestion("a", "2"),
            suggestion("b", "3"),
        ];
        let results = build_approx_result(&suggestions, "rae", 10);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "a · 1");
        assert_eq!(results[1].title, "b · 3");
        assert_eq!(results[0].subtitle, SUGGESTION_SUBTITLE);
        assert_eq!(
            results[0].primary_action,
            Action::ReplaceQuery("rae a".to_string())
        );
    }

    #[test]
    fn approx_truncates_after_deduplication() {
        let suggestions = [
            suggestion("saber", "(saber)"),
            suggestion("saber", "(saber)"),
            suggestion("saber", "(saber)"),
            suggestion("sabor", "(sabor)"),
            suggestion("salvar", "(salvar)"),
        ];
        let results = build_approx_result(&suggestions, "rae", 2);
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles, vec!["saber · (saber)", "sabor · (sabor)"]);
    }

    #[test]
    fn approx_with_zero_limit_is_empty() {
        let suggestions = [suggestion("a", "1")];

        assert!(build_approx_result(&suggestions, "rae", 0).is_empty());
    }

    #[test]
    fn exact_keeps_senses_in_order() {
        let entries = [
            definition("f.", "Edificio para habitar.", "7nXzqjE"),
            definition("f.", "Edificio para habitar.", "7nZJlX5"),
            definition("f. Am.", "Juego de la rayuela.", "7nq0ZTw"),
        ];
        let results = build_exact_result(&entries, "casa", 10, 80, ORIGIN);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "casa [f.]");
        assert_eq!(results[2].title, "casa [f. Am.]");
        assert_eq!(
            results[0].primary_action,
            Action::CopyText("Edificio para habitar.".to_string())
        );
        assert_eq!(
            results[1].secondary_action,
            Some(Action::OpenLink(
                "https://dle.rae.es/casa#7nZJlX5".to_string()
            ))
        );
    }

    #[test]
    fn exact_respects_limit() {
        let entries = [
            definition("f.", "uno", "a"),
            definition("f.", "dos", "b"),
            definition("f.", "tres", "c"),
        ];

        assert_eq!(build_exact_result(&entries, "casa", 2, 80, ORIGIN).len(), 2);
    }

    #[test]
    fn exact_wraps_subtitle_but_copies_full_text() {
        let entries = [definition("f.", "uno dos tres cuatro", "a")];
        let results = build_exact_result(&entries, "casa", 10, 8, ORIGIN);

        assert_eq!(results[0].subtitle, "uno dos\ntres\ncuatro");
        assert_eq!(
            results[0].primary_action,
            Action::CopyText("uno dos tres cuatro".to_string())
        );
    }

    #[test]
    fn exact_without_anchor_links_to_page() {
        let entries = [definition("", "uno", "")];
        let results = build_exact_result(&entries, "casa", 10, 80, "https://dle.rae.es/");

        assert_eq!(
            results[0].secondary_action,
            Some(Action::OpenLink("https://dle.rae.es/casa".to_string()))
        );
    }
}
