//! Structured types
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::markup::{Child, Element, Page};

/// Tag of the paragraphs holding a single sense.
const DEFINITION_TAG: &str = "p";
/// Class marking a sense paragraph.
const DEFINITION_CLASS: &str = "j";
/// Id of the container the site renders lookup results into.
const RESULTS_ID: &str = "resultados";
/// Class of each suggestion row in the list of approximate results.
const SUGGESTION_CLASS: &str = "n1";
/// Children of a sense paragraph that don't contribute to its text.
///
/// `span` holds the sense number and `abbr` holds grammatical tags, which are collected
/// separately.
const SKIPPED_TAGS: [&str; 2] = ["span", "abbr"];

/// A single sense of a headword.
///
/// # HTML Source
/// Parsed from `<p class="j" id="...">` elements
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefinitionEntry {
    /// Space-separated grammatical tags
    ///
    /// Examples: `f.`, `tr. U. t. c. prnl.`
    ///
    /// Parsed from the `<abbr>` elements of the paragraph
    pub abbreviations: String,

    /// The definition itself, with markup removed
    ///
    /// Whitespace and punctuation between words is kept exactly as the page has it, apart from
    /// leading and trailing whitespace.
    pub text: String,

    /// Identifier of the sense on the page, usable as a URL fragment (e.g. `7nXzqjE`)
    ///
    /// Found in the `id` attribute of the paragraph, empty if it has none
    pub anchor_id: String,
}

/// An alternative headword offered when a lookup has no exact match
///
/// # HTML Source
/// Parsed from `<div class="n1">` elements inside `<div id="resultados">`, e.g.
///
/// ```html
/// <div class="n1"><a data-acc="LISTA APROX" href="/saber">saber<sup>1</sup></a> (saber)</div>
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SuggestionEntry {
    /// The suggested headword, without any homograph number
    pub display_name: String,
    /// The annotation following the link, e.g. `(saber)`
    pub note: String,
}

/// Everything a lookup needs from a dictionary page
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DictionaryPage {
    /// All senses on the page, in document order
    pub definitions: Vec<DefinitionEntry>,
    /// All suggestion rows on the page, in document order and with duplicates kept
    pub suggestions: Vec<SuggestionEntry>,
    /// Whether the page contains at least one sense paragraph
    pub has_definition_marker: bool,
    /// Whether the page contains a list of approximate results
    pub has_suggestion_marker: bool,
}

impl DefinitionEntry {
    /// Extracts a sense from its paragraph element.
    ///
    /// Returns `None` if the paragraph has no text once markup is removed.
    pub fn from_element<'a, E: Element<'a>>(element: E) -> Option<DefinitionEntry> {
        let mut abbrs = Vec::new();
        collect_tagged(element, "abbr", &mut abbrs);

        let abbreviations = abbrs
            .iter()
            .map(E::inner_text)
            .collect::<Vec<_>>()
            .join(" ");

        let mut text = String::new();

        for child in element.child_nodes() {
            match child {
                Child::Text(s) => text.push_str(s),
                Child::Element(elem) if SKIPPED_TAGS.iter().any(|tag| elem.is(tag)) => {}
                Child::Element(elem) => text.push_str(&elem.inner_text()),
            }
        }

        let text = text.trim();

        if text.is_empty() {
            return None;
        }

        let anchor_id = element.attribute("id").unwrap_or_default().to_string();

        Some(DefinitionEntry {
            abbreviations,
            text: text.to_string(),
            anchor_id,
        })
    }
}

impl SuggestionEntry {
    /// Extracts a suggestion from its row element.
    ///
    /// Returns `None` if the row has no link or the link has no text of its own.
    pub fn from_element<'a, E: Element<'a>>(element: E) -> Option<SuggestionEntry> {
        let children = element.child_nodes();
        let position = children
            .iter()
            .position(|child| matches!(child, Child::Element(elem) if elem.is("a")))?;
        let Child::Element(link) = children[position] else {
            return None;
        };

        let display_name = link
            .child_nodes()
            .into_iter()
            .find_map(|child| match child {
                Child::Text(s) => Some(s.trim()),
                Child::Element(_) => None,
            })
            .filter(|s| !s.is_empty())?
            .to_string();

        let note: String = children[position + 1..]
            .iter()
            .filter_map(|child| match child {
                Child::Text(s) => Some(*s),
                Child::Element(_) => None,
            })
            .collect();

        Some(SuggestionEntry {
            display_name,
            note: note.trim().to_string(),
        })
    }
}

impl DictionaryPage {
    /// Parses a dictionary page.
    ///
    /// This never fails: a page without any of the known structures yields an empty
    /// `DictionaryPage`.
    pub fn from_html(html: impl AsRef<str>) -> DictionaryPage {
        let page = Page::parse(html.as_ref());

        DictionaryPage::from_element(page.root())
    }

    /// Extracts senses and suggestions from an already parsed document.
    pub fn from_element<'a, E: Element<'a>>(root: E) -> DictionaryPage {
        let has_definition_marker = root.find_first(DEFINITION_TAG, DEFINITION_CLASS).is_some();
        let definitions = root
            .find_all(DEFINITION_TAG, "class", DEFINITION_CLASS)
            .into_iter()
            .filter_map(DefinitionEntry::from_element)
            .collect();

        let results = root.find_all("div", "id", RESULTS_ID).into_iter().next();
        let has_suggestion_marker =
            results.is_some_and(|results| results.find_first("div", SUGGESTION_CLASS).is_some());
        let suggestions = results
            .map(|results| {
                results
                    .find_all("div", "class", SUGGESTION_CLASS)
                    .into_iter()
                    .filter_map(SuggestionEntry::from_element)
                    .collect()
            })
            .unwrap_or_default();

        DictionaryPage {
            definitions,
            suggestions,
            has_definition_marker,
            has_suggestion_marker,
        }
    }
}

/// Collects every descendant of `element` with the tag `tag`, in document order.
fn collect_tagged<'a, E: Element<'a>>(element: E, tag: &str, out: &mut Vec<E>) {
    for child in element.child_nodes() {
        if let Child::Element(elem) = child {
            if elem.is(tag) {
                out.push(elem);
            }

            collect_tagged(elem, tag, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rstest::rstest;

    use super::*;

    #[test]
    fn test_parse_exact_document() {
        let html = include_str!("../tests/fixtures/queries/casa.html");
        let page = DictionaryPage::from_html(html);

        assert!(page.has_definition_marker);
        assert!(!page.has_suggestion_marker);
        assert_eq!(page.definitions.len(), 4);

        let first = page.definitions.first().unwrap();
        assert_eq!(first.abbreviations, "f.");
        assert_eq!(first.text, "Edificio para habitar.");
        assert_eq!(first.anchor_id, "7nXzqjE");

        let last = page.definitions.last().unwrap();
        assert_eq!(last.abbreviations, "f. Am.");
        assert_eq!(last.anchor_id, "7nq0ZTw");
    }

    #[test]
    fn test_parse_keeps_punctuation_spacing() {
        let html = r#"<p class="j" id="a"><span class="n_acep">1. </span><abbr title="verbo transitivo">tr.</abbr> <mark>Conocer</mark> <mark>algo</mark>,  <mark>o</mark> <mark>tener</mark> <mark>noticia</mark> <mark>de</mark> <mark>ello</mark>.</p>"#;
        let page = DictionaryPage::from_html(html);
        let entry = page.definitions.first().unwrap();

        assert_eq!(entry.abbreviations, "tr.");
        assert_eq!(entry.text, "Conocer algo,  o tener noticia de ello.");
    }

    #[test]
    fn test_parse_drops_empty_senses() {
        let html = r#"<p class="j" id="a"><span class="n_acep">1. </span><abbr>f.</abbr> </p>"#;
        let page = DictionaryPage::from_html(html);

        assert!(page.has_definition_marker);
        assert!(page.definitions.is_empty());
    }

    #[test]
    fn test_parse_approximate_document() {
        let html = include_str!("../tests/fixtures/queries/saver.html");
        let page = DictionaryPage::from_html(html);

        assert!(!page.has_definition_marker);
        assert!(page.has_suggestion_marker);

        let names: Vec<_> = page
            .suggestions
            .iter()
            .map(|s| s.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["saber", "saber", "sabor", "salvar"]);
        assert_eq!(page.suggestions[0].note, "(saber)");
        assert_eq!(page.suggestions[2].note, "(sabor)");
    }

    #[test]
    fn test_parse_document_without_results() {
        let html = include_str!("../tests/fixtures/queries/xkqzw.html");
        let page = DictionaryPage::from_html(html);

        assert!(!page.has_definition_marker);
        assert!(!page.has_suggestion_marker);
        assert!(page.definitions.is_empty());
        assert!(page.suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_outside_results_are_ignored() {
        let html = r#"<div class="n1"><a href="/casa">casa</a> (casa)</div>"#;
        let page = DictionaryPage::from_html(html);

        assert!(!page.has_suggestion_marker);
        assert!(page.suggestions.is_empty());
    }

    #[rstest]
    #[case::exact("casa.html", true, false, 4, 0)]
    #[case::approximate("saver.html", false, true, 0, 4)]
    #[case::without_results("xkqzw.html", false, false, 0, 0)]
    fn test_parse_query_fixtures(
        #[case] name: &str,
        #[case] has_definition_marker: bool,
        #[case] has_suggestion_marker: bool,
        #[case] num_definitions: usize,
        #[case] num_suggestions: usize,
    ) {
        let path = Path::new("tests/fixtures/queries").join(name);
        let html = fs::read_to_string(&path).unwrap();
        let page = DictionaryPage::from_html(&html);

        assert_eq!(page.has_definition_marker, has_definition_marker);
        assert_eq!(page.has_suggestion_marker, has_suggestion_marker);
        assert_eq!(page.definitions.len(), num_definitions);
        assert_eq!(page.suggestions.len(), num_suggestions);

        for definition in &page.definitions {
            assert!(!definition.text.trim().is_empty(), "{}", path.display());
        }
    }
}
