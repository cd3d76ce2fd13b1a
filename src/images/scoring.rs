//! Scoring of `<img>` elements as the page's hero image.
//!
//! The rules are plain data so each one can be checked on its own; an
//! element's score is the sum of the points of every rule it satisfies.

use crate::extractors::SelectorStrategy;
use scraper::ElementRef;

/// Alt-text words suggesting the image shows the dish
pub(crate) const FOOD_KEYWORDS: &[&str] = &[
    "recipe", "food", "dish", "meal", "plate", "bowl", "chicken", "pasta", "salad", "soup",
    "cake", "beef", "fish",
];

const fn css(selector: &'static str) -> SelectorStrategy {
    SelectorStrategy::css_static(selector)
}

/// Image selectors in priority tiers: named hero classes, then content
/// images, then alt-text matches
pub(crate) const CANDIDATE_STRATEGIES: &[SelectorStrategy] = &[
    css(r#"img[class*="recipe"]"#),
    css(r#"img[class*="food"]"#),
    css(r#"img[class*="hero"]"#),
    css(r#"img[class*="main"]"#),
    css(r#"img[class*="featured"]"#),
    css(r#"img[class*="primary"]"#),
    css(r#"img[class*="lead"]"#),
    css(r#"[class*="content"] img"#),
    css(r#"[class*="article"] img"#),
    css("article img"),
    css("main img"),
    SelectorStrategy::ImagesWithAlt(FOOD_KEYWORDS),
];

/// Everything the rules look at, read once per element
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ImageFeatures {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Lowercase alt text
    pub alt: String,
    /// Lowercase class attribute
    pub class: String,
    /// Tag names of every ancestor element
    pub ancestors: Vec<String>,
}

impl ImageFeatures {
    pub fn from_element(element: ElementRef) -> Self {
        let attr = |name: &str| element.value().attr(name).unwrap_or_default();
        Self {
            width: parse_dimension(attr("width")),
            height: parse_dimension(attr("height")),
            alt: attr("alt").to_lowercase(),
            class: attr("class").to_lowercase(),
            ancestors: element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .map(|ancestor| ancestor.value().name().to_string())
                .collect(),
        }
    }
}

/// `"400"` and `"400px"` both read as 400
fn parse_dimension(value: &str) -> Option<u32> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

#[derive(Debug)]
pub(crate) enum ScoreRule {
    /// `(min_width, min_height, points)` tiers, first satisfied tier wins;
    /// both attributes must be present
    Dimensions(&'static [(u32, u32, u32)]),
    /// Alt text contains any food keyword
    AltKeyword(u32),
    /// Class attribute contains any of the fragments
    ClassContains(&'static [&'static str], u32),
    /// Element sits somewhere inside one of the tags
    WithinAncestor(&'static [&'static str], u32),
}

impl ScoreRule {
    pub fn points(&self, features: &ImageFeatures) -> u32 {
        match self {
            ScoreRule::Dimensions(tiers) => match (features.width, features.height) {
                (Some(width), Some(height)) => tiers
                    .iter()
                    .find(|(min_w, min_h, _)| width >= *min_w && height >= *min_h)
                    .map(|(_, _, points)| *points)
                    .unwrap_or(0),
                _ => 0,
            },
            ScoreRule::AltKeyword(points) => {
                if FOOD_KEYWORDS.iter().any(|k| features.alt.contains(k)) {
                    *points
                } else {
                    0
                }
            }
            ScoreRule::ClassContains(fragments, points) => {
                if fragments.iter().any(|f| features.class.contains(f)) {
                    *points
                } else {
                    0
                }
            }
            ScoreRule::WithinAncestor(tags, points) => {
                if features.ancestors.iter().any(|a| tags.contains(&a.as_str())) {
                    *points
                } else {
                    0
                }
            }
        }
    }
}

pub(crate) const SCORE_RULES: &[ScoreRule] = &[
    ScoreRule::Dimensions(&[(400, 300, 10), (300, 200, 5)]),
    ScoreRule::AltKeyword(8),
    ScoreRule::ClassContains(&["recipe"], 6),
    ScoreRule::ClassContains(&["hero", "main"], 4),
    ScoreRule::WithinAncestor(&["header", "article", "main"], 3),
];

pub(crate) fn score(features: &ImageFeatures) -> u32 {
    SCORE_RULES.iter().map(|rule| rule.points(features)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn features(html: &str) -> ImageFeatures {
        let document = Html::parse_document(html);
        let img = document
            .select(&Selector::parse("img").unwrap())
            .next()
            .unwrap();
        ImageFeatures::from_element(img)
    }

    #[test]
    fn test_dimension_tiers() {
        let rule = &SCORE_RULES[0];
        let sized = |w, h| ImageFeatures {
            width: Some(w),
            height: Some(h),
            ..Default::default()
        };
        assert_eq!(rule.points(&sized(800, 600)), 10);
        assert_eq!(rule.points(&sized(350, 250)), 5);
        assert_eq!(rule.points(&sized(200, 600)), 0);
        assert_eq!(
            rule.points(&ImageFeatures {
                width: Some(800),
                ..Default::default()
            }),
            0
        );
    }

    #[test]
    fn test_feature_extraction() {
        let f = features(
            r#"<article><div><img width="400px" height="300" alt="Roast Chicken" class="Hero-Image"></div></article>"#,
        );
        assert_eq!(f.width, Some(400));
        assert_eq!(f.height, Some(300));
        assert_eq!(f.alt, "roast chicken");
        assert_eq!(f.class, "hero-image");
        assert!(f.ancestors.iter().any(|a| a == "article"));
    }

    #[test]
    fn test_score_sums_every_rule() {
        let f = features(
            r#"<main><img width="600" height="400" alt="Finished dish" class="recipe-hero"></main>"#,
        );
        assert_eq!(score(&f), 10 + 8 + 6 + 4 + 3);
    }

    #[test]
    fn test_plain_image_scores_zero() {
        let f = features(r#"<div><img src="/x.png" alt="spacer"></div>"#);
        assert_eq!(score(&f), 0);
    }
}
