use crate::config::{HarvestConfig, SourceConfig};
use crate::error::HarvestError;
use crate::extractors::{DetailExtractor, ListingExtractor, ParsingContext};
use crate::fetchers::{FetchOptions, Fetcher, RequestFetcher};
use crate::images::ImageResolver;
use crate::model::{Candidate, ExtractedRecipe};
use log::{debug, info, warn};
use std::time::Duration;

/// What one source contributed to a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSummary {
    pub name: String,
    /// Candidates found on the listing page
    pub candidates: usize,
    /// Valid records produced from those candidates
    pub recipes: usize,
    /// Why the listing page could not be used, if it failed
    pub listing_error: Option<String>,
}

/// Records harvested across every source, in source order
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub recipes: Vec<ExtractedRecipe>,
    pub sources: Vec<SourceSummary>,
}

/// Drives listing, detail and image extraction for every configured source.
///
/// Failures below the run level never propagate: a source whose listing page
/// cannot be fetched contributes nothing, and a candidate whose page fails or
/// holds no recipe is skipped.
pub struct SourceOrchestrator {
    config: HarvestConfig,
    fetcher: Box<dyn Fetcher>,
    listing: ListingExtractor,
    detail: DetailExtractor,
    images: ImageResolver,
}

impl SourceOrchestrator {
    pub fn new(config: HarvestConfig, fetcher: Box<dyn Fetcher>) -> Self {
        let images = ImageResolver::new(config.images.clone(), config.http.probe_timeout());
        Self {
            config,
            fetcher,
            listing: ListingExtractor,
            detail: DetailExtractor,
            images,
        }
    }

    /// Orchestrator fetching over HTTP with the configured client settings
    pub fn with_http(config: HarvestConfig) -> Result<Self, HarvestError> {
        let fetcher = RequestFetcher::new(&config.http)?;
        Ok(Self::new(config, Box::new(fetcher)))
    }

    /// Harvest up to `max_results` records for `query`.
    ///
    /// The bound is split evenly across sources by integer division, so a
    /// source can receive a quota of zero and is then skipped.
    pub async fn harvest(&self, query: &str, max_results: usize) -> Result<Harvest, HarvestError> {
        let sources = &self.config.sources;
        if sources.is_empty() {
            return Err(HarvestError::NoSourcesConfigured);
        }
        let query = query.trim();
        if query.is_empty() {
            return Err(HarvestError::InvalidQuery("query is empty".to_string()));
        }
        if max_results == 0 {
            return Err(HarvestError::InvalidQuery(
                "max_results must be at least 1".to_string(),
            ));
        }

        let quota = max_results / sources.len();
        let mut harvest = Harvest::default();

        for source in sources {
            if quota == 0 {
                warn!(
                    "{}: skipped, {} results across {} sources leaves no quota",
                    source.name,
                    max_results,
                    sources.len()
                );
                harvest.sources.push(SourceSummary {
                    name: source.name.clone(),
                    ..Default::default()
                });
                continue;
            }

            let (recipes, summary) = self.harvest_source(source, query, quota).await;
            info!(
                "{}: {} recipes from {} candidates",
                source.name, summary.recipes, summary.candidates
            );
            harvest.recipes.extend(recipes);
            harvest.sources.push(summary);
        }

        info!(
            "Harvested {} recipes for '{}' from {} sources",
            harvest.recipes.len(),
            query,
            sources.len()
        );
        Ok(harvest)
    }

    async fn harvest_source(
        &self,
        source: &SourceConfig,
        query: &str,
        quota: usize,
    ) -> (Vec<ExtractedRecipe>, SourceSummary) {
        let mut summary = SourceSummary {
            name: source.name.clone(),
            ..Default::default()
        };
        let options = source.fetch_options(&self.config.http);
        let search_url = source.search_url_for(query);

        info!("{}: searching {}", source.name, search_url);
        let html = match self.fetcher.fetch(&search_url, &options).await {
            Ok(html) => html,
            Err(e) => {
                warn!("{}: listing page failed: {}", source.name, e);
                summary.listing_error = Some(e.to_string());
                return (Vec::new(), summary);
            }
        };

        let candidates = {
            let context = ParsingContext::new(search_url.as_str(), &html);
            self.listing.extract(&context, source, quota)
        };
        summary.candidates = candidates.len();

        let pacing = self.config.pacing_delay();
        let mut recipes = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            if index > 0 {
                pace(pacing).await;
            }
            debug!(
                "{}: candidate {}/{}: {}",
                source.name,
                index + 1,
                candidates.len(),
                candidate.url
            );
            match self.harvest_candidate(candidate, &options).await {
                Ok(Some(recipe)) => recipes.push(recipe),
                Ok(None) => debug!("{}: no recipe at {}", source.name, candidate.url),
                Err(e) => warn!("{}: skipping {}: {}", source.name, candidate.url, e),
            }
        }

        summary.recipes = recipes.len();
        (recipes, summary)
    }

    async fn harvest_candidate(
        &self,
        candidate: &Candidate,
        options: &FetchOptions,
    ) -> Result<Option<ExtractedRecipe>, HarvestError> {
        let html = self.fetcher.fetch(&candidate.url, options).await?;

        // the parsed document is not Send and must be gone before the probe
        let (recipe, discovered) = {
            let context = ParsingContext::new(candidate.url.as_str(), &html);
            match self.detail.extract(&context) {
                Some(recipe) => {
                    let discovered = self.images.discover(&context);
                    (recipe, discovered)
                }
                None => return Ok(None),
            }
        };

        let image_url = self
            .images
            .resolve(
                discovered,
                &recipe.title,
                &recipe.ingredients,
                self.fetcher.as_ref(),
            )
            .await;

        Ok(Some(ExtractedRecipe {
            image_url: Some(image_url),
            ..recipe
        }))
    }
}

async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
