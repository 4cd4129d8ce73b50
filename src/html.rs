//! Typed lookups over a parsed HTML document.
//!
//! Elements are located by tag name plus a list of attribute filters, and
//! lookups return `Option`/`Vec` instead of failing on absent nodes.

use scraper::{ElementRef, Html};

/// Attribute filter applied to candidate elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr<'q> {
    /// Matches one class token, or the full class list when the value holds several tokens
    Class(&'q str),
    Id(&'q str),
    /// Exact value of an arbitrary attribute
    Is(&'q str, &'q str),
}

impl Attr<'_> {
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        match *self {
            Attr::Class(wanted) => {
                let mut tokens = wanted.split_whitespace().peekable();
                let first = match tokens.next() {
                    Some(first) => first,
                    None => return false,
                };
                if tokens.peek().is_none() {
                    value.classes().any(|class| class == first)
                } else {
                    let actual: Vec<&str> = value
                        .attr("class")
                        .map(|c| c.split_whitespace().collect())
                        .unwrap_or_default();
                    let wanted: Vec<&str> = wanted.split_whitespace().collect();
                    actual == wanted
                }
            }
            Attr::Id(id) => value.id() == Some(id),
            Attr::Is(name, expected) => value.attr(name) == Some(expected),
        }
    }
}

/// Lookup interface shared by whole documents and single elements
pub trait Query<'a>: Sized {
    /// Elements searched by `find_first`/`find_all`, in document order
    fn candidates(self) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a>;

    fn find_first(self, tag: &str, filters: &[Attr<'_>]) -> Option<ElementRef<'a>> {
        self.candidates()
            .find(|element| is_match(element, tag, filters))
    }

    fn find_all(self, tag: &str, filters: &[Attr<'_>]) -> Vec<ElementRef<'a>> {
        self.candidates()
            .filter(|element| is_match(element, tag, filters))
            .collect()
    }
}

impl<'a> Query<'a> for &'a Html {
    fn candidates(self) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a> {
        Box::new(self.tree.root().descendants().filter_map(ElementRef::wrap))
    }
}

impl<'a> Query<'a> for ElementRef<'a> {
    // Descendants only, the element itself is not a candidate
    fn candidates(self) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a> {
        Box::new(self.descendants().skip(1).filter_map(ElementRef::wrap))
    }
}

fn is_match(element: &ElementRef<'_>, tag: &str, filters: &[Attr<'_>]) -> bool {
    element.value().name().eq_ignore_ascii_case(tag)
        && filters.iter().all(|filter| filter.matches(element))
}

/// Text content of an element with whitespace runs collapsed and trimmed
pub fn text_of(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalised text of each direct child, elements and bare text nodes alike.
///
/// Comments and whitespace-only text are skipped.
pub fn child_texts(element: ElementRef<'_>) -> Vec<String> {
    element
        .children()
        .filter_map(|child| match ElementRef::wrap(child) {
            Some(el) => Some(text_of(el)),
            None => child.value().as_text().map(|text| normalize_whitespace(text)),
        })
        .filter(|text| !text.is_empty())
        .collect()
}
