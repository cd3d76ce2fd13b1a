use thiserror::Error;

/// Errors that can occur while harvesting recipes
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Network failure, timeout or connection error
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The remote host answered with a non-success status
    #[error("{url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    /// A page URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Error parsing HTTP header values
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Error parsing HTTP header names
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// A run was requested without any source to scrape
    #[error("No recipe sources configured")]
    NoSourcesConfigured,

    /// The query string or result bound was rejected before scraping started
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// The persistence collaborator rejected a record
    #[error("Store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
