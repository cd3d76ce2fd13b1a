use crate::fetchers::FetchOptions;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Main harvest configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct HarvestConfig {
    /// HTTP client settings shared by every source
    #[serde(default)]
    pub http: HttpConfig,
    /// Image resolution settings
    #[serde(default)]
    pub images: ImageConfig,
    /// Sites to search, in the order they are scraped
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    /// Delay between consecutive detail fetches within one source, in milliseconds
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,
    /// Query used when the caller does not supply one
    #[serde(default = "default_query")]
    pub default_query: String,
    /// Result bound used when the caller does not supply one
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            images: ImageConfig::default(),
            sources: default_sources(),
            pacing_delay_ms: default_pacing_delay_ms(),
            default_query: default_query(),
            default_max_results: default_max_results(),
        }
    }
}

impl HarvestConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with HARVEST__ prefix
    /// 2. harvest.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: HARVEST__HTTP__TIMEOUT_SECS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}

/// HTTP settings applied to every page fetch
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Page fetch timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Image reachability probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Extra request headers sent with every page fetch
    #[serde(default = "default_headers")]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            probe_timeout_secs: default_probe_timeout(),
            user_agent: default_user_agent(),
            headers: default_headers(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Settings for the image resolution pipeline
#[derive(Debug, Deserialize, Clone)]
pub struct ImageConfig {
    /// Check that resolved images are reachable before accepting them
    #[serde(default = "default_probe")]
    pub probe: bool,
    /// Width requested from resizing image hosts
    #[serde(default = "default_image_width")]
    pub width: u32,
    /// Height requested from resizing image hosts
    #[serde(default = "default_image_height")]
    pub height: u32,
    #[serde(default = "default_image_fit")]
    pub fit: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            probe: default_probe(),
            width: default_image_width(),
            height: default_image_height(),
            fit: default_image_fit(),
        }
    }
}

/// One recipe site: where to search and how to recognise its recipe pages
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub name: String,
    /// Scheme and host used to absolutize listing links, e.g. `https://www.allrecipes.com`
    pub base_url: String,
    /// Search page URL with a `{query}` placeholder
    pub search_url: String,
    /// Replacement for whitespace inside the query
    #[serde(default = "default_query_separator")]
    pub query_separator: String,
    /// Listing card selectors, most specific first
    #[serde(default)]
    pub listing_selectors: Vec<String>,
    /// Path fragment every recipe link must contain
    pub recipe_path: String,
    /// Per-source header overrides merged over `HttpConfig::headers`
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl SourceConfig {
    /// Search page URL for `query`, whitespace runs replaced by the separator
    pub fn search_url_for(&self, query: &str) -> String {
        let encoded = query
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(&self.query_separator);
        self.search_url.replace("{query}", &encoded)
    }

    /// Scheme and host without a trailing slash
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Request settings for every fetch issued on behalf of this source
    pub fn fetch_options(&self, http: &HttpConfig) -> FetchOptions {
        let mut headers = http.headers.clone();
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        FetchOptions {
            headers,
            timeout: http.timeout(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    10
}

fn default_probe_timeout() -> u64 {
    5
}

fn default_pacing_delay_ms() -> u64 {
    1000
}

fn default_query() -> String {
    "chicken recipes".to_string()
}

fn default_max_results() -> usize {
    10
}

fn default_probe() -> bool {
    true
}

fn default_image_width() -> u32 {
    400
}

fn default_image_height() -> u32 {
    300
}

fn default_image_fit() -> String {
    "crop".to_string()
}

fn default_query_separator() -> String {
    "+".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_headers() -> HashMap<String, String> {
    [
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
        ("Accept-Language", "en-US,en;q=0.5"),
        ("Connection", "keep-alive"),
        ("Upgrade-Insecure-Requests", "1"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            name: "allrecipes".to_string(),
            base_url: "https://www.allrecipes.com".to_string(),
            search_url: "https://www.allrecipes.com/search?q={query}".to_string(),
            query_separator: "+".to_string(),
            listing_selectors: to_strings(&[
                r#"div[class*="card__detailsContainer"]"#,
                r#"div[class*="recipe-card"]"#,
                r#"div[class*="search-result"]"#,
                r#"article[class*="recipe"]"#,
                r#"div[class*="recipe-item"]"#,
            ]),
            recipe_path: "/recipe/".to_string(),
            headers: HashMap::new(),
        },
        SourceConfig {
            name: "foodnetwork".to_string(),
            base_url: "https://www.foodnetwork.com".to_string(),
            search_url: "https://www.foodnetwork.com/search/{query}-".to_string(),
            query_separator: "-".to_string(),
            listing_selectors: to_strings(&[
                r#"div[class*="o-ResultCard"]"#,
                r#"div[class*="recipe-card"]"#,
                r#"div[class*="search-result"]"#,
                r#"article[class*="recipe"]"#,
                r#"div[class*="recipe-item"]"#,
                r#"div[class*="card"]"#,
            ]),
            recipe_path: "/recipes/".to_string(),
            headers: HashMap::new(),
        },
    ]
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Load configuration from file and environment variables
///
/// Environment variable format: HARVEST__PACING_DELAY_MS=0
pub fn load_config() -> Result<HarvestConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("harvest").required(false))
        // Use double underscore for nested: HARVEST__IMAGES__PROBE
        .add_source(
            Environment::with_prefix("HARVEST")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
