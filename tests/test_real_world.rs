use recipe_harvest::{search_recipes, HarvestConfig, RecipeSearch, ResultOrigin};

#[tokio::test]
#[ignore] // This test requires network access
async fn test_live_chicken_search() {
    let _ = env_logger::try_init();

    match search_recipes("chicken recipes", 4).await {
        Ok(result) => {
            println!("Origin: {:?}", result.origin);
            for summary in &result.sources {
                println!("{summary:?}");
            }

            assert_eq!(result.total_found, result.recipes.len());
            assert!(!result.recipes.is_empty());
            for recipe in &result.recipes {
                println!("{} -> {:?}", recipe.title, recipe.image_url);
                assert!(recipe.is_valid());
                assert!(recipe
                    .image_url
                    .as_deref()
                    .is_some_and(|u| u.starts_with("http")));
            }
        }
        Err(e) => {
            panic!("Search failed: {e}");
        }
    }
}

#[tokio::test]
#[ignore] // This test requires network access
async fn test_live_single_source() {
    let _ = env_logger::try_init();

    let mut config = HarvestConfig::default();
    config.sources.truncate(1);

    let result = RecipeSearch::builder()
        .config(config)
        .query("banana bread")
        .max_results(2)
        .build()
        .await
        .unwrap();

    if result.origin == ResultOrigin::Scraped {
        assert!(result
            .recipes
            .iter()
            .all(|r| r.source_url.contains("allrecipes.com/recipe/")));
    }
}
