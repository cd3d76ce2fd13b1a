use scraper::{ElementRef, Html, Selector};

pub mod cascade;
mod detail;
mod json_ld;
mod listing;

pub use cascade::{cascade, select, CascadeMatch, SelectorStrategy};
pub use detail::DetailExtractor;
pub use json_ld::structured_data_image;
pub use listing::{absolute_listing_url, ListingExtractor};

/// A fetched page together with the URL it was fetched from
pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

/// Collapse whitespace runs into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text content of an element
pub fn element_text(element: ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            log::warn!("Ignoring invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}

/// Descendants of `element` matching `selector`, never the element itself
pub(crate) fn descendants<'a>(element: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    let Some(selector) = parse_selector(selector) else {
        return Vec::new();
    };
    element
        .select(&selector)
        .filter(|found| found.id() != element.id())
        .collect()
}
