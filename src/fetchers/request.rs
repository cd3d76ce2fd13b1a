use super::{FetchOptions, Fetcher, ProbeResponse};
use crate::config::HttpConfig;
use crate::error::HarvestError;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{redirect, Client};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

const REDIRECT_LIMIT: usize = 10;

/// `Fetcher` backed by an async reqwest client
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(http: &HttpConfig) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .timeout(http.timeout())
            .user_agent(http.user_agent.as_str())
            .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
            .build()?;

        Ok(Self { client })
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, HarvestError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.insert(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
    }
    Ok(map)
}

#[async_trait]
impl Fetcher for RequestFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, HarvestError> {
        debug!("GET {}", url);
        let parsed = Url::parse(url)?;
        let response = self
            .client
            .get(parsed)
            .headers(header_map(&options.headers)?)
            .timeout(options.timeout)
            .send()
            .await?;

        let status = response.status();
        debug!("{} responded with {}", url, status);
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    async fn probe(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, HarvestError> {
        let response = self.client.head(url).timeout(timeout).send().await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        Ok(ProbeResponse {
            status: response.status().as_u16(),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_map_rejects_invalid_name() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "x".to_string());
        assert!(matches!(
            header_map(&headers),
            Err(HarvestError::InvalidHeaderName(_))
        ));
    }

    #[test]
    fn test_header_map_copies_headers() {
        let mut headers = HashMap::new();
        headers.insert("Accept-Language".to_string(), "en-US".to_string());
        let map = header_map(&headers).unwrap();
        assert_eq!(map.get("accept-language").unwrap(), "en-US");
    }
}
