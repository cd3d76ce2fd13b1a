use super::cascade::{cascade, SelectorStrategy};
use super::{char_len, element_text, ParsingContext};
use crate::model::{ExtractedRecipe, UNKNOWN_TITLE};
use log::debug;
use scraper::{ElementRef, Html};
use std::ops::RangeInclusive;

const fn css(selector: &'static str) -> SelectorStrategy {
    SelectorStrategy::css_static(selector)
}

/// Title selectors, most specific first
const TITLE_STRATEGIES: &[SelectorStrategy] = &[
    css(r#"h1[class*="recipe-title"]"#),
    css(r#"h1[class*="title"]"#),
    css(r#"h1[class*="recipe"]"#),
    css(r#"h1[class*="headline"]"#),
    css(r#"h2[class*="title"]"#),
    css(r#"h2[class*="recipe"]"#),
    css("h1"),
];

const MIN_TITLE_CHARS: usize = 4;

/// Words that mark a list item as a step rather than an ingredient
const INSTRUCTION_WORDS: &[&str] = &[
    "step",
    "instruction",
    "direction",
    "preheat",
    "heat",
    "cook",
    "bake",
    "grill",
    "fry",
    "simmer",
    "boil",
];

/// Verbs that mark a paragraph as a cooking step
const COOKING_VERBS: &[&str] = &[
    "preheat", "heat", "cook", "add", "stir", "mix", "bake", "grill", "fry", "simmer", "boil",
    "season", "combine",
];

/// How the generic fallback filters on keywords
enum KeywordFilter {
    Exclude(&'static [&'static str]),
    Require(&'static [&'static str]),
}

impl KeywordFilter {
    fn accepts(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        match self {
            KeywordFilter::Exclude(words) => !words.iter().any(|w| lower.contains(w)),
            KeywordFilter::Require(words) => words.iter().any(|w| lower.contains(w)),
        }
    }
}

/// Extraction rules for a list-valued recipe field
struct FieldRules {
    name: &'static str,
    strategies: &'static [SelectorStrategy],
    chars: RangeInclusive<usize>,
    fallback: SelectorStrategy,
    fallback_chars: RangeInclusive<usize>,
    fallback_filter: KeywordFilter,
}

const INGREDIENTS: FieldRules = FieldRules {
    name: "ingredients",
    strategies: &[
        css(r#"[class*="ingredients-list"] li"#),
        css(r#"li[class*="ingredient"]"#),
        css(r#"[class*="ingredient"] li"#),
        css(r#"span[class*="ingredient"]"#),
        css(r#"div[class*="ingredient"]"#),
        css(r#"[class*="ingredient"]"#),
    ],
    chars: 4..=199,
    fallback: SelectorStrategy::ListItems,
    fallback_chars: 6..=199,
    fallback_filter: KeywordFilter::Exclude(INSTRUCTION_WORDS),
};

const INSTRUCTIONS: FieldRules = FieldRules {
    name: "instructions",
    strategies: &[
        css(r#"li[class*="instruction"]"#),
        css(r#"[class*="instructions"] li"#),
        css(r#"li[class*="step"]"#),
        css(r#"[class*="directions"] li"#),
        css(r#"[class*="instruction"]"#),
        css(r#"[class*="directions"]"#),
        css(r#"[class*="steps"]"#),
        css(r#"[class*="method"]"#),
    ],
    chars: 11..=499,
    fallback: SelectorStrategy::Paragraphs,
    fallback_chars: 21..=499,
    fallback_filter: KeywordFilter::Require(COOKING_VERBS),
};

/// Extracts title, ingredients and instructions from a recipe page
#[derive(Debug, Default, Clone, Copy)]
pub struct DetailExtractor;

impl DetailExtractor {
    /// The page's recipe, or `None` when it has fewer than two ingredients
    /// or no instruction
    pub fn extract(&self, context: &ParsingContext) -> Option<ExtractedRecipe> {
        let recipe = ExtractedRecipe {
            title: extract_title(&context.document),
            ingredients: extract_field(&context.document, &INGREDIENTS),
            instructions: extract_field(&context.document, &INSTRUCTIONS),
            image_url: None,
            source_url: context.url.clone(),
        };

        debug!(
            "{}: '{}' with {} ingredients, {} instructions",
            context.url,
            recipe.title,
            recipe.ingredients.len(),
            recipe.instructions.len()
        );

        if !recipe.is_valid() {
            debug!("{}: insufficient data, not a recipe page", context.url);
            return None;
        }
        Some(recipe)
    }
}

fn extract_title(document: &Html) -> String {
    cascade(document, TITLE_STRATEGIES, |nodes| {
        nodes
            .first()
            .map(|node| element_text(*node))
            .filter(|text| char_len(text) >= MIN_TITLE_CHARS)
    })
    .map(|hit| hit.value)
    .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn extract_field(document: &Html, rules: &FieldRules) -> Vec<String> {
    let hit = cascade(document, rules.strategies, |nodes| {
        let items = unique_texts(nodes, |text| rules.chars.contains(&char_len(text)));
        (!items.is_empty()).then_some(items)
    });
    if let Some(hit) = hit {
        debug!(
            "Found {} {} using {:?}",
            hit.value.len(),
            rules.name,
            rules.strategies[hit.strategy]
        );
        return hit.value;
    }

    let items = unique_texts(rules.fallback.matches(document), |text| {
        rules.fallback_chars.contains(&char_len(text)) && rules.fallback_filter.accepts(text)
    });
    debug!(
        "Found {} {} by scanning {:?}",
        items.len(),
        rules.name,
        rules.fallback
    );
    items
}

/// Normalized texts that pass `keep`, first occurrence only, in document order
fn unique_texts<F>(nodes: Vec<ElementRef>, keep: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut items: Vec<String> = Vec::new();
    for text in nodes.into_iter().map(element_text) {
        if keep(&text) && !items.contains(&text) {
            items.push(text);
        }
    }
    items
}
