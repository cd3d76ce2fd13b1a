use std::time::Duration;

use crate::catalog::fallback_recipes;
use crate::config::{HarvestConfig, SourceConfig};
use crate::fetchers::{Fetcher, RequestFetcher};
use crate::model::ExtractedRecipe;
use crate::pipelines::{SourceOrchestrator, SourceSummary};
use crate::HarvestError;
use log::info;

/// Where the records of a search came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    /// Extracted from the configured sources
    Scraped,
    /// Taken from the built-in catalog because scraping produced nothing
    Fallback,
}

/// Result of a recipe search
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub recipes: Vec<ExtractedRecipe>,
    /// Number of records in `recipes`
    pub total_found: usize,
    pub origin: ResultOrigin,
    /// Per-source breakdown of the scraping run
    pub sources: Vec<SourceSummary>,
}

/// Builder for configuring and executing recipe searches
#[derive(Default)]
pub struct RecipeSearchBuilder {
    query: Option<String>,
    max_results: Option<usize>,
    config: Option<HarvestConfig>,
    fetcher: Option<Box<dyn Fetcher>>,
    timeout: Option<Duration>,
    sources: Option<Vec<SourceConfig>>,
}

impl RecipeSearchBuilder {
    /// Set the search query
    ///
    /// # Example
    /// ```
    /// use recipe_harvest::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .query("chicken curry");
    /// ```
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the upper bound on scraped records, split evenly across sources
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Use an explicit configuration instead of `harvest.toml` and the environment
    pub fn config(mut self, config: HarvestConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the HTTP fetcher, e.g. with a canned one in tests
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Set a timeout for page fetches
    ///
    /// # Example
    /// ```
    /// use recipe_harvest::RecipeSearch;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .query("pasta")
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Replace the configured sources
    pub fn sources(mut self, sources: Vec<SourceConfig>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Run the search
    ///
    /// When every source comes back empty the built-in catalog, filtered by
    /// the query, is returned instead.
    ///
    /// # Errors
    /// Returns `HarvestError` if:
    /// - No sources are configured
    /// - The query is empty or `max_results` is zero
    /// - The configuration or HTTP client cannot be set up
    /// - The timeout is shorter than one second
    ///
    /// Failures of individual sources or pages are logged and never returned.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_harvest::RecipeSearch;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = RecipeSearch::builder()
    ///     .query("beef tacos")
    ///     .max_results(6)
    ///     .build()
    ///     .await?;
    /// println!("{} recipes", result.total_found);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<SearchResult, HarvestError> {
        let mut config = match self.config {
            Some(config) => config,
            None => HarvestConfig::load()?,
        };
        if let Some(timeout) = self.timeout {
            if timeout.as_secs() == 0 {
                return Err(HarvestError::BuilderError(
                    "timeout must be at least one second".to_string(),
                ));
            }
            config.http.timeout_secs = timeout.as_secs();
        }
        if let Some(sources) = self.sources {
            config.sources = sources;
        }

        let query = self.query.unwrap_or_else(|| config.default_query.clone());
        let max_results = self.max_results.unwrap_or(config.default_max_results);

        let fetcher: Box<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(RequestFetcher::new(&config.http)?),
        };

        let harvest = SourceOrchestrator::new(config, fetcher)
            .harvest(&query, max_results)
            .await?;

        let (recipes, origin) = if harvest.recipes.is_empty() {
            info!("No recipes scraped for '{}', using the fallback catalog", query);
            (fallback_recipes(&query, max_results), ResultOrigin::Fallback)
        } else {
            (harvest.recipes, ResultOrigin::Scraped)
        };

        Ok(SearchResult {
            total_found: recipes.len(),
            recipes,
            origin,
            sources: harvest.sources,
        })
    }
}

/// Main entry point for the builder API
pub struct RecipeSearch;

impl RecipeSearch {
    /// Creates a new builder for searching recipes
    ///
    /// # Example
    /// ```
    /// use recipe_harvest::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder();
    /// ```
    pub fn builder() -> RecipeSearchBuilder {
        RecipeSearchBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::{FetchOptions, ProbeResponse};
    use async_trait::async_trait;

    /// Every site is unreachable
    struct OfflineFetcher;

    #[async_trait]
    impl Fetcher for OfflineFetcher {
        async fn fetch(&self, url: &str, _options: &FetchOptions) -> Result<String, HarvestError> {
            Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: 503,
            })
        }

        async fn probe(&self, url: &str, _timeout: Duration) -> Result<ProbeResponse, HarvestError> {
            Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    #[tokio::test]
    async fn test_offline_search_uses_catalog() {
        let result = RecipeSearch::builder()
            .config(HarvestConfig::default())
            .fetcher(OfflineFetcher)
            .query("Chicken dinner")
            .max_results(2)
            .build()
            .await
            .unwrap();

        assert_eq!(result.origin, ResultOrigin::Fallback);
        assert_eq!(result.total_found, 2);
        assert_eq!(result.sources.len(), 2);
        assert!(result.sources.iter().all(|s| s.listing_error.is_some()));
    }

    #[tokio::test]
    async fn test_sources_override() {
        let mut sources = HarvestConfig::default().sources;
        sources.truncate(1);

        let result = RecipeSearch::builder()
            .config(HarvestConfig::default())
            .sources(sources)
            .fetcher(OfflineFetcher)
            .query("pasta")
            .max_results(5)
            .build()
            .await
            .unwrap();

        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.recipes[0].title, "Creamy Pasta with Chicken");
    }

    #[tokio::test]
    async fn test_subsecond_timeout_rejected() {
        let result = RecipeSearch::builder()
            .config(HarvestConfig::default())
            .fetcher(OfflineFetcher)
            .timeout(Duration::from_millis(200))
            .build()
            .await;
        assert!(matches!(result, Err(HarvestError::BuilderError(_))));
    }

    #[tokio::test]
    async fn test_defaults_from_config() {
        let mut config = HarvestConfig::default();
        config.default_query = "beef tacos".to_string();
        config.default_max_results = 4;

        let result = RecipeSearch::builder()
            .config(config)
            .fetcher(OfflineFetcher)
            .build()
            .await
            .unwrap();

        assert_eq!(result.recipes.len(), 1);
        assert_eq!(result.recipes[0].title, "Beef Tacos");
    }
}
