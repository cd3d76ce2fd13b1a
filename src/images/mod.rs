//! Resolution of a single representative image for a recipe page.
//!
//! Discovery runs against the parsed page and tries, in order: scored image
//! candidates, site-specific rules, meta tags and JSON-LD. Every discovered
//! reference is normalized before it counts. Resolution then probes the
//! discovered URL and falls back to a category stock photo, so it always
//! yields a usable absolute URL.

mod category;
mod normalize;
mod scoring;
mod sites;

pub use category::{fallback_image, DEFAULT_IMAGE};
pub use normalize::normalize_image_url;

use crate::config::ImageConfig;
use crate::extractors::{cascade, select, structured_data_image, ParsingContext, SelectorStrategy};
use crate::fetchers::Fetcher;
use log::debug;
use scoring::{score, ImageFeatures, CANDIDATE_STRATEGIES};
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// URL tokens marking site chrome rather than food photos
const SKIP_PATTERNS: &[&str] = &["logo", "icon", "avatar", "banner", "ad", "sponsor"];

const MIN_SRC_CHARS: usize = 10;

const fn css(selector: &'static str) -> SelectorStrategy {
    SelectorStrategy::css_static(selector)
}

/// Meta tags carrying an image, in order of trust
const META_STRATEGIES: &[SelectorStrategy] = &[
    css(r#"meta[property="og:image"]"#),
    css(r#"meta[name="twitter:image"]"#),
    css(r#"meta[property="twitter:image"]"#),
    css(r#"meta[property="og:image:secure_url"]"#),
    css(r#"meta[name="image"]"#),
];

/// A usable image reference and how strongly its element looks like the
/// recipe photo
#[derive(Debug)]
struct ImageCandidate {
    url: String,
    score: u32,
}

pub struct ImageResolver {
    config: ImageConfig,
    probe_timeout: Duration,
}

impl ImageResolver {
    pub fn new(config: ImageConfig, probe_timeout: Duration) -> Self {
        Self {
            config,
            probe_timeout,
        }
    }

    /// Best normalized image reference found on the page, if any
    pub fn discover(&self, context: &ParsingContext) -> Option<String> {
        let page = match Url::parse(&context.url) {
            Ok(page) => Some(page),
            Err(e) => {
                debug!("{}: cannot resolve relative images: {}", context.url, e);
                None
            }
        };
        let document = &context.document;
        let normalize = |raw: String| normalize_image_url(&raw, page.as_ref(), &self.config);

        if let Some(url) = scored_image(document, &normalize) {
            debug!("{}: image from scored candidates", context.url);
            return Some(url);
        }

        let site_rule = page
            .as_ref()
            .and_then(Url::host_str)
            .and_then(sites::rule_for_host);
        if let Some(url) = site_rule
            .and_then(|rule| rule.find_image(document))
            .and_then(normalize)
        {
            debug!("{}: image from site rule", context.url);
            return Some(url);
        }

        if let Some(url) = meta_image(document).and_then(normalize) {
            debug!("{}: image from meta tags", context.url);
            return Some(url);
        }

        if let Some(url) = structured_data_image(document).and_then(normalize) {
            debug!("{}: image from structured data", context.url);
            return Some(url);
        }

        debug!("{}: no image discovered", context.url);
        None
    }

    /// A usable image URL for the recipe; never fails
    ///
    /// The discovered URL is kept when probing is disabled or the probe
    /// reports a successful `image/*` response. Anything else yields the
    /// category stock photo for the title and ingredients.
    pub async fn resolve(
        &self,
        discovered: Option<String>,
        title: &str,
        ingredients: &[String],
        fetcher: &dyn Fetcher,
    ) -> String {
        if let Some(url) = discovered {
            if !self.config.probe {
                return url;
            }
            match fetcher.probe(&url, self.probe_timeout).await {
                Ok(response) if response.is_image() => return url,
                Ok(response) => debug!(
                    "Image probe rejected {}: status {}, content type {:?}",
                    url, response.status, response.content_type
                ),
                Err(e) => debug!("Image probe failed for {}: {}", url, e),
            }
        }

        let fallback = fallback_image(title, ingredients);
        debug!("Using category image for '{}'", title);
        fallback.to_string()
    }
}

/// Highest-scoring candidate whose source normalizes; the first plausible
/// `<img>` when no such candidate scores
fn scored_image(document: &Html, normalize: impl Fn(String) -> Option<String>) -> Option<String> {
    let mut seen = HashSet::new();
    let mut best: Option<ImageCandidate> = None;

    for element in CANDIDATE_STRATEGIES
        .iter()
        .flat_map(|strategy| strategy.matches(document))
    {
        if !seen.insert(element.id()) {
            continue;
        }
        let Some(url) = image_source(element).and_then(&normalize) else {
            continue;
        };
        let candidate = ImageCandidate {
            url,
            score: score(&ImageFeatures::from_element(element)),
        };
        if best.as_ref().map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    if let Some(best) = best.filter(|b| b.score > 0) {
        debug!("Best image candidate scored {}", best.score);
        return Some(best.url);
    }

    select(document, &[css("img[src]")])?
        .value
        .into_iter()
        .filter_map(image_source)
        .filter(|src| src.chars().count() > MIN_SRC_CHARS && !is_skipped(src))
        .find_map(normalize)
}

fn image_source(img: ElementRef) -> Option<String> {
    ["src", "data-src", "data-lazy-src"]
        .iter()
        .filter_map(|name| img.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty() && !value.starts_with("data:"))
        .map(String::from)
}

/// Whether any URL token is, or for longer patterns contains, a skip pattern
fn is_skipped(src: &str) -> bool {
    let lower = src.to_lowercase();
    lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .any(|token| {
            SKIP_PATTERNS
                .iter()
                .any(|p| token == *p || (p.len() > 2 && token.contains(p)))
        })
}

/// First meta image whose content is already absolute
fn meta_image(document: &Html) -> Option<String> {
    cascade(document, META_STRATEGIES, |nodes| {
        nodes.into_iter().find_map(|meta| {
            let content = meta.value().attr("content")?.trim();
            (content.starts_with("http://") || content.starts_with("https://"))
                .then(|| content.to_string())
        })
    })
    .map(|hit| hit.value)
}
