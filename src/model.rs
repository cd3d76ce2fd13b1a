use serde::{Deserialize, Serialize};

/// Title recorded when no heading on the page qualifies
pub const UNKNOWN_TITLE: &str = "Unknown Recipe";

/// A recipe link discovered on a search or listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    /// Absolute URL of the recipe page
    pub url: String,
}

/// A normalized recipe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
    pub source_url: String,
}

impl ExtractedRecipe {
    /// A record is kept only with at least two ingredients and one instruction
    pub fn is_valid(&self) -> bool {
        self.ingredients.len() >= 2 && !self.instructions.is_empty()
    }
}
