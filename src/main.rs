use log::info;
use recipe_harvest::store::save_all;
use recipe_harvest::{HarvestConfig, JsonLinesStore, RecipeSearch};
use std::env;
use std::io;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // recipe-harvest [QUERY] [MAX]
    let args: Vec<String> = env::args().collect();
    let config = HarvestConfig::load()?;
    let query = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| config.default_query.clone());
    let max_results = match args.get(2) {
        Some(max) => max
            .parse::<usize>()
            .map_err(|e| format!("MAX must be a positive number, got '{}': {}", max, e))?,
        None => config.default_max_results,
    };

    let result = RecipeSearch::builder()
        .query(query.as_str())
        .max_results(max_results)
        .config(config)
        .build()
        .await?;

    let mut store = JsonLinesStore::new(io::stdout().lock());
    let saved = save_all(&mut store, &result.recipes)?;

    info!(
        "Saved {} recipes for '{}' ({:?})",
        saved.len(),
        query,
        result.origin
    );
    Ok(())
}
