use super::cascade::{self, SelectorStrategy};
use super::{descendants, element_text, ParsingContext};
use crate::config::SourceConfig;
use crate::model::Candidate;
use log::debug;
use scraper::ElementRef;
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Headings searched for a card title
const TITLE_HEADINGS: &str = "h1, h2, h3";

/// Class fragments marking a card's title element
const TITLE_CLASS_PATTERNS: &[&str] = &["title", "headline", "name"];

/// Length of the card text used when nothing better names the card
const FALLBACK_TITLE_CHARS: usize = 100;

/// Finds recipe candidates on a search or listing page
#[derive(Debug, Default, Clone, Copy)]
pub struct ListingExtractor;

#[derive(Debug, Error)]
enum CardRejection {
    #[error("no link found")]
    MissingLink,
    #[error("no title found")]
    MissingTitle,
    #[error("{0} is not a recipe link")]
    OffPattern(String),
    #[error("{0} already listed")]
    Duplicate(String),
}

impl ListingExtractor {
    /// Up to `max_items` candidates whose URL paths contain the source's recipe path
    pub fn extract(
        &self,
        context: &ParsingContext,
        source: &SourceConfig,
        max_items: usize,
    ) -> Vec<Candidate> {
        if max_items == 0 {
            return Vec::new();
        }

        let strategies: Vec<SelectorStrategy> = source
            .listing_selectors
            .iter()
            .map(|selector| SelectorStrategy::css(selector.as_str()))
            .collect();

        let cards = match cascade::select(&context.document, &strategies) {
            Some(hit) => {
                debug!(
                    "{}: found {} cards using selector '{}'",
                    source.name,
                    hit.value.len(),
                    source.listing_selectors[hit.strategy]
                );
                hit.value
            }
            None => {
                let links = SelectorStrategy::links_containing(source.recipe_path.as_str())
                    .matches(&context.document);
                debug!(
                    "{}: no cards matched, found {} links containing '{}'",
                    source.name,
                    links.len(),
                    source.recipe_path
                );
                links
            }
        };

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for (index, card) in cards.into_iter().enumerate() {
            if candidates.len() >= max_items {
                break;
            }
            match candidate_from_card(card, source, &seen) {
                Ok(candidate) => {
                    debug!("{}: candidate '{}' -> {}", source.name, candidate.title, candidate.url);
                    seen.insert(candidate.url.clone());
                    candidates.push(candidate);
                }
                Err(reason) => debug!("{}: skipping card {}: {}", source.name, index + 1, reason),
            }
        }
        candidates
    }
}

fn candidate_from_card(
    card: ElementRef,
    source: &SourceConfig,
    seen: &HashSet<String>,
) -> Result<Candidate, CardRejection> {
    let href = card_href(card).ok_or(CardRejection::MissingLink)?;
    let url = absolute_listing_url(source.origin(), href);
    if !has_recipe_path(&url, &source.recipe_path) {
        return Err(CardRejection::OffPattern(url));
    }
    if seen.contains(&url) {
        return Err(CardRejection::Duplicate(url));
    }
    let title = card_title(card).ok_or(CardRejection::MissingTitle)?;
    Ok(Candidate { title, url })
}

/// Whether the URL's path, not its host or query, contains `recipe_path`
fn has_recipe_path(url: &str, recipe_path: &str) -> bool {
    Url::parse(url).is_ok_and(|url| url.path().contains(recipe_path))
}

/// Heading text, then a title-like class, then the card's own text
fn card_title(card: ElementRef) -> Option<String> {
    let non_empty = |text: String| (!text.is_empty()).then_some(text);

    descendants(card, TITLE_HEADINGS)
        .into_iter()
        .next()
        .and_then(|heading| non_empty(element_text(heading)))
        .or_else(|| {
            descendants(card, "[class]")
                .into_iter()
                .find(|el| {
                    let class = el.value().attr("class").unwrap_or_default().to_lowercase();
                    TITLE_CLASS_PATTERNS.iter().any(|p| class.contains(p))
                })
                .and_then(|el| non_empty(element_text(el)))
        })
        .or_else(|| {
            non_empty(
                element_text(card)
                    .chars()
                    .take(FALLBACK_TITLE_CHARS)
                    .collect::<String>()
                    .trim_end()
                    .to_string(),
            )
        })
}

/// The card's own href when it is a link, otherwise its first descendant link's
fn card_href(card: ElementRef) -> Option<&str> {
    let href = if card.value().name() == "a" {
        card.value().attr("href")
    } else {
        descendants(card, "a[href]")
            .into_iter()
            .next()
            .and_then(|link| link.value().attr("href"))
    }?;
    let href = href.trim();
    (!href.is_empty()).then_some(href)
}

/// Absolutize a listing link against the source origin
///
/// Absolute links are returned unchanged, protocol-relative links take the
/// origin's scheme, root-relative links are appended to the origin and bare
/// relative links are joined to the origin with a slash.
pub fn absolute_listing_url(origin: &str, href: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        let scheme = origin.split("://").next().unwrap_or("https");
        format!("{scheme}://{rest}")
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}
