use crate::error::HarvestError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

mod request;

pub use request::RequestFetcher;

/// Request settings for a single page fetch
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub timeout: Duration,
}

/// Outcome of a lightweight existence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub content_type: Option<String>,
}

impl ProbeResponse {
    /// Successful status and an `image/*` content type
    pub fn is_image(&self) -> bool {
        (200..300).contains(&self.status)
            && self
                .content_type
                .as_deref()
                .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
                .unwrap_or(false)
    }
}

/// Retrieves pages and probes resources over HTTP
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body; non-success statuses are errors
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, HarvestError>;

    /// HEAD `url` with a short timeout
    async fn probe(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, HarvestError>;
}
