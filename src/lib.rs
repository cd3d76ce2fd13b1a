pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod images;
pub mod model;
pub mod pipelines;
pub mod store;

pub use builder::{RecipeSearch, RecipeSearchBuilder, ResultOrigin, SearchResult};
pub use config::{HarvestConfig, HttpConfig, ImageConfig, SourceConfig};
pub use error::HarvestError;
pub use fetchers::{FetchOptions, Fetcher, ProbeResponse, RequestFetcher};
pub use model::{Candidate, ExtractedRecipe};
pub use pipelines::{Harvest, SourceOrchestrator, SourceSummary};
pub use store::{JsonLinesStore, MemoryStore, RecipeStore, StoredRecipe};

/// Search the configured sources for `query`, falling back to the built-in
/// catalog when nothing could be scraped
///
/// # Example
/// ```no_run
/// # use recipe_harvest::search_recipes;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = search_recipes("chicken recipes", 10).await?;
/// for recipe in &result.recipes {
///     println!("{}", recipe.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(query: &str, max_results: usize) -> Result<SearchResult, HarvestError> {
    RecipeSearch::builder()
        .query(query)
        .max_results(max_results)
        .build()
        .await
}
