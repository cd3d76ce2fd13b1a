//! Ordered selector strategies evaluated until the first one succeeds.
//!
//! A cascade never merges results across strategies: the first strategy whose
//! matches are accepted wins and the rest are not evaluated. Zero matches is an
//! ordinary outcome, reported as `None`.

use super::parse_selector;
use log::debug;
use scraper::{ElementRef, Html};
use std::borrow::Cow;

/// One way of locating nodes in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorStrategy {
    /// A CSS selector; selectors that fail to parse match nothing
    Css(Cow<'static, str>),
    /// `<a>` elements whose `href` contains the fragment
    LinksContaining(Cow<'static, str>),
    /// Every `<li>` inside a `<ul>` or `<ol>`
    ListItems,
    /// Every `<p>`
    Paragraphs,
    /// `<img>` elements whose lowercase alt text contains one of the keywords
    ImagesWithAlt(&'static [&'static str]),
}

impl SelectorStrategy {
    pub const fn css_static(selector: &'static str) -> Self {
        SelectorStrategy::Css(Cow::Borrowed(selector))
    }

    pub fn css(selector: impl Into<String>) -> Self {
        SelectorStrategy::Css(Cow::Owned(selector.into()))
    }

    pub fn links_containing(fragment: impl Into<String>) -> Self {
        SelectorStrategy::LinksContaining(Cow::Owned(fragment.into()))
    }

    /// All nodes this strategy matches, in document order
    pub fn matches<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        match self {
            SelectorStrategy::Css(selector) => select_all(document, selector),
            SelectorStrategy::LinksContaining(fragment) => select_all(document, "a[href]")
                .into_iter()
                .filter(|link| {
                    link.value()
                        .attr("href")
                        .is_some_and(|href| href.contains(fragment.as_ref()))
                })
                .collect(),
            SelectorStrategy::ListItems => select_all(document, "ul li, ol li"),
            SelectorStrategy::Paragraphs => select_all(document, "p"),
            SelectorStrategy::ImagesWithAlt(keywords) => select_all(document, "img[alt]")
                .into_iter()
                .filter(|img| {
                    let alt = img.value().attr("alt").unwrap_or_default().to_lowercase();
                    keywords.iter().any(|keyword| alt.contains(keyword))
                })
                .collect(),
        }
    }
}

fn select_all<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    parse_selector(selector)
        .map(|selector| document.select(&selector).collect())
        .unwrap_or_default()
}

/// The accepted result of a cascade and which strategy produced it
#[derive(Debug)]
pub struct CascadeMatch<T> {
    /// Index of the winning strategy in the list passed to the cascade
    pub strategy: usize,
    pub value: T,
}

/// Evaluate `strategies` in order, returning the first result `accept` keeps.
///
/// `accept` receives the full match set of a strategy and decides whether the
/// strategy succeeded. Strategies after the first success are not evaluated.
pub fn cascade<'a, T, F>(
    document: &'a Html,
    strategies: &[SelectorStrategy],
    mut accept: F,
) -> Option<CascadeMatch<T>>
where
    F: FnMut(Vec<ElementRef<'a>>) -> Option<T>,
{
    for (index, strategy) in strategies.iter().enumerate() {
        let nodes = strategy.matches(document);
        if nodes.is_empty() {
            continue;
        }
        let count = nodes.len();
        if let Some(value) = accept(nodes) {
            debug!(
                "Strategy {} ({:?}) matched {} nodes",
                index, strategy, count
            );
            return Some(CascadeMatch {
                strategy: index,
                value,
            });
        }
    }
    None
}

/// The match set of the first strategy matching at least one node
pub fn select<'a>(
    document: &'a Html,
    strategies: &[SelectorStrategy],
) -> Option<CascadeMatch<Vec<ElementRef<'a>>>> {
    cascade(document, strategies, Some)
}
