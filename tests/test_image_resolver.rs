use recipe_harvest::extractors::ParsingContext;
use recipe_harvest::images::{fallback_image, ImageResolver};
use recipe_harvest::{HttpConfig, ImageConfig, RequestFetcher};
use std::time::Duration;

fn recipe_page(image_markup: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head><title>Recipe</title></head>
        <body>
            <article>
                {image_markup}
                <h1 class="recipe-title">Chicken Parmesan</h1>
            </article>
        </body>
        </html>
        "#
    )
}

fn resolver() -> ImageResolver {
    ImageResolver::new(ImageConfig::default(), Duration::from_secs(2))
}

fn ingredients() -> Vec<String> {
    vec!["2 chicken breasts".to_string(), "1 cup marinara".to_string()]
}

#[tokio::test]
async fn test_reachable_image_is_kept() {
    let mut server = mockito::Server::new_async().await;
    let probe = server
        .mock("HEAD", "/media/parm.jpg")
        .with_status(200)
        .with_header("content-type", "image/jpeg")
        .create_async()
        .await;

    let page_url = format!("{}/recipes/chicken-parmesan", server.url());
    let html = recipe_page(r#"<img class="recipe-image" src="/media/parm.jpg?w=1200" alt="Chicken parmesan">"#);
    let discovered = resolver().discover(&ParsingContext::new(page_url.as_str(), &html));
    assert_eq!(discovered, Some(format!("{}/media/parm.jpg", server.url())));

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let resolved = resolver()
        .resolve(discovered, "Chicken Parmesan", &ingredients(), &fetcher)
        .await;

    probe.assert_async().await;
    assert_eq!(resolved, format!("{}/media/parm.jpg", server.url()));
}

#[tokio::test]
async fn test_non_image_response_falls_back_to_category() {
    let mut server = mockito::Server::new_async().await;
    let probe = server
        .mock("HEAD", "/media/parm.jpg")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .create_async()
        .await;

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let resolved = resolver()
        .resolve(
            Some(format!("{}/media/parm.jpg", server.url())),
            "Chicken Parmesan",
            &ingredients(),
            &fetcher,
        )
        .await;

    probe.assert_async().await;
    assert_eq!(resolved, fallback_image("Chicken Parmesan", &[]));
    assert!(resolved.contains("photo-1604503468506"));
}

#[tokio::test]
async fn test_missing_image_falls_back_to_category() {
    let mut server = mockito::Server::new_async().await;
    let probe = server
        .mock("HEAD", "/media/gone.jpg")
        .with_status(404)
        .with_header("content-type", "image/jpeg")
        .create_async()
        .await;

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let resolved = resolver()
        .resolve(
            Some(format!("{}/media/gone.jpg", server.url())),
            "Beef Stew",
            &[],
            &fetcher,
        )
        .await;

    probe.assert_async().await;
    assert!(resolved.contains("photo-1600891964092"));
}

#[tokio::test]
async fn test_nothing_discovered_uses_category_without_probing() {
    let server = mockito::Server::new_async().await;
    let page_url = format!("{}/recipes/plain", server.url());
    let context = ParsingContext::new(page_url.as_str(), &recipe_page(""));

    let discovered = resolver().discover(&context);
    assert!(discovered.is_none());

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let resolved = resolver()
        .resolve(discovered, "Chicken Parmesan", &ingredients(), &fetcher)
        .await;
    assert!(resolved.starts_with("https://images.unsplash.com/"));
}

#[tokio::test]
async fn test_probe_disabled_keeps_discovered_url() {
    let config = ImageConfig {
        probe: false,
        ..ImageConfig::default()
    };
    let resolver = ImageResolver::new(config, Duration::from_secs(2));
    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();

    // nothing listens here; with probing off no request is made
    let resolved = resolver
        .resolve(
            Some("http://127.0.0.1:9/offline.jpg".to_string()),
            "Soup",
            &[],
            &fetcher,
        )
        .await;
    assert_eq!(resolved, "http://127.0.0.1:9/offline.jpg");
}

#[test]
fn test_meta_and_structured_data_fallbacks() {
    let resolver = resolver();

    let og = r#"<head><meta property="og:image" content="https://images.unsplash.com/photo-9?w=1600"></head>"#;
    let discovered = resolver.discover(&ParsingContext::new("https://example.com/r", og));
    assert_eq!(
        discovered.as_deref(),
        Some("https://images.unsplash.com/photo-9?w=400&h=300&fit=crop")
    );

    let ld = r#"<script type="application/ld+json">
        {"@context": "https://schema.org", "@graph": [{"@type": "Recipe", "image": ["//cdn.example.com/r.webp"]}]}
    </script>"#;
    let discovered = resolver.discover(&ParsingContext::new("https://example.com/r", ld));
    assert_eq!(discovered.as_deref(), Some("https://cdn.example.com/r.webp"));
}
