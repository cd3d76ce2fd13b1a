use crate::extractors::{cascade, SelectorStrategy};
use scraper::{ElementRef, Html};

/// Where a known site keeps its hero image and which lazy-load attributes it uses
#[derive(Debug)]
pub(crate) struct SiteRule {
    pub host: &'static str,
    pub selectors: &'static [SelectorStrategy],
    pub lazy_attributes: &'static [&'static str],
}

impl SiteRule {
    /// Exact host or any subdomain of it
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        host == self.host
            || host
                .strip_suffix(self.host)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// First usable image reference under the site's selectors
    pub fn find_image(&self, document: &Html) -> Option<String> {
        cascade(document, self.selectors, |nodes| {
            nodes.into_iter().find_map(|img| self.image_reference(img))
        })
        .map(|hit| hit.value)
    }

    /// Lazy-load attributes first, then `src`; inline `data:` placeholders are skipped
    fn image_reference(&self, img: ElementRef) -> Option<String> {
        self.lazy_attributes
            .iter()
            .chain(std::iter::once(&"src"))
            .filter_map(|name| img.value().attr(name))
            .map(str::trim)
            .find(|value| !value.is_empty() && !value.starts_with("data:"))
            .map(String::from)
    }
}

const LAZY_ATTRIBUTES: &[&str] = &["data-src", "data-lazy-src"];

const fn css(selector: &'static str) -> SelectorStrategy {
    SelectorStrategy::css_static(selector)
}

pub(crate) const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        host: "allrecipes.com",
        selectors: &[
            css(r#"div[class*="primary-image"] img"#),
            css(r#"img[class*="primary-image"]"#),
            css(r#"div[class*="image-container"] img"#),
            css(r#"figure[class*="article"] img"#),
        ],
        lazy_attributes: LAZY_ATTRIBUTES,
    },
    SiteRule {
        host: "foodnetwork.com",
        selectors: &[
            css(r#"section[class*="o-RecipeLead"] img"#),
            css(r#"img[class*="m-MediaBlock__a-Image"]"#),
            css(r#"div[class*="m-MediaBlock"] img"#),
            css(r#"div[class*="o-AssetMultiMedia"] img"#),
        ],
        lazy_attributes: LAZY_ATTRIBUTES,
    },
];

pub(crate) fn rule_for_host(host: &str) -> Option<&'static SiteRule> {
    SITE_RULES.iter().find(|rule| rule.matches_host(host))
}
