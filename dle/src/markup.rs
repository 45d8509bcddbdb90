//! A narrow view of a parsed HTML document.
//!
//! Page extraction only needs to find elements by tag and class (or attribute), read the text of
//! an element and walk its direct children while telling text nodes apart from markup. Those
//! operations are described by [`Element`], which is implemented for [`scraper::ElementRef`].

use scraper::{ElementRef, Html, Node};

/// A direct child of an element, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child<'a, E> {
    /// A text node, verbatim.
    Text(&'a str),
    /// A markup node.
    Element(E),
}

/// Query primitives over a parsed element tree.
pub trait Element<'a>: Copy {
    /// Returns the lowercase tag name of the element, e.g. `p`.
    fn tag_name(&self) -> &'a str;

    /// Returns the value of the attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<&'a str>;

    /// Returns the concatenated text of all descendant text nodes.
    fn inner_text(&self) -> String;

    /// Returns the direct children of the element.
    ///
    /// Comments, processing instructions and other non-content nodes are skipped.
    fn child_nodes(&self) -> Vec<Child<'a, Self>>;

    /// Returns the first descendant with the tag `tag` that has `class` among its classes.
    fn find_first(&self, tag: &str, class: &str) -> Option<Self>;

    /// Returns all descendants with the tag `tag` whose attribute `attr` equals `value`.
    ///
    /// The `class` attribute is matched per class name rather than as a whole string, so
    /// `find_all("p", "class", "j")` matches `<p class="j b">`.
    fn find_all(&self, tag: &str, attr: &str, value: &str) -> Vec<Self>;

    /// Returns true if the tag name of this element is `tag`, ignoring ASCII case.
    fn is(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }
}

/// A parsed HTML document.
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses `html` as a complete document.
    ///
    /// Parsing is lenient: malformed markup is recovered from the way browsers do it.
    #[must_use]
    pub fn parse(html: &str) -> Page {
        Page {
            html: Html::parse_document(html),
        }
    }

    /// Returns the root `<html>` element.
    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

impl<'a> Element<'a> for ElementRef<'a> {
    fn tag_name(&self) -> &'a str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn inner_text(&self) -> String {
        self.text().collect()
    }

    fn child_nodes(&self) -> Vec<Child<'a, Self>> {
        self.children()
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some(Child::Text(text)),
                Node::Element(_) => ElementRef::wrap(node).map(Child::Element),
                _ => None,
            })
            .collect()
    }

    fn find_first(&self, tag: &str, class: &str) -> Option<Self> {
        descendant_elements(*self).find(|elem| elem.is(tag) && has_class(elem, class))
    }

    fn find_all(&self, tag: &str, attr: &str, value: &str) -> Vec<Self> {
        descendant_elements(*self)
            .filter(|elem| elem.is(tag) && attribute_matches(elem, attr, value))
            .collect()
    }
}

/// Returns an iterator over all elements below `root` in document order, excluding `root`.
fn descendant_elements(root: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn has_class(elem: &ElementRef<'_>, class: &str) -> bool {
    elem.value().classes().any(|name| name == class)
}

fn attribute_matches(elem: &ElementRef<'_>, attr: &str, value: &str) -> bool {
    if attr == "class" {
        has_class(elem, value)
    } else {
        elem.value().attr(attr) == Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<html><body>
        <div id="outer" class="box wide">
            <p class="j" id="one">uno <b>dos</b><!-- nota --> tres</p>
            <p class="j other" id="two">cuatro</p>
            <p class="k" id="three">cinco</p>
        </div>
    </body></html>"#;

    #[test]
    fn find_first_matches_class_token() {
        let page = Page::parse(HTML);
        let div = page.root().find_first("div", "wide").expect("div");

        assert_eq!(div.attribute("id"), Some("outer"));
        assert!(page.root().find_first("div", "box wide").is_none());
    }

    #[test]
    fn find_all_matches_class_per_token() {
        let page = Page::parse(HTML);
        let ids: Vec<_> = page
            .root()
            .find_all("p", "class", "j")
            .iter()
            .filter_map(|elem| elem.attribute("id"))
            .collect();

        assert_eq!(ids, vec!["one", "two"]);
    }

    #[test]
    fn find_all_matches_other_attributes_exactly() {
        let page = Page::parse(HTML);

        assert_eq!(page.root().find_all("div", "id", "outer").len(), 1);
        assert!(page.root().find_all("div", "id", "out").is_empty());
    }

    #[test]
    fn child_nodes_distinguish_text_and_markup() {
        let page = Page::parse(HTML);
        let p = page.root().find_first("p", "j").expect("paragraph");
        let children = p.child_nodes();

        assert_eq!(children.len(), 3);
        assert_eq!(children[0], Child::Text("uno "));
        assert!(matches!(children[1], Child::Element(elem) if elem.is("b")));
        assert_eq!(children[2], Child::Text(" tres"));
    }

    #[test]
    fn inner_text_includes_descendants() {
        let page = Page::parse(HTML);
        let p = page.root().find_first("p", "j").expect("paragraph");

        assert_eq!(p.inner_text(), "uno dos tres");
    }
}
