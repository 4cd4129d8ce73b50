use log::{debug, warn};
use reqwest::blocking::Client;
use std::time::Duration;

use super::ResponseCache;
use crate::error::Result;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; RecipeCrawler/0.1)";

/// Blocking HTTP fetcher with an optional transparent response cache
pub struct RequestFetcher {
    client: Client,
    cache: Option<ResponseCache>,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self {
            client,
            cache: None,
        })
    }

    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// GET `url` and return its body.
    ///
    /// Non-success statuses are not errors: the body is returned as-is and
    /// simply not cached.
    pub fn fetch(&self, url: &str) -> Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url)? {
                debug!("Cache hit: {}", url);
                return Ok(body);
            }
        }

        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            warn!("{} responded with {}", url, status);
        } else if let Some(cache) = &self.cache {
            cache.put(url, &body)?;
        }

        Ok(body)
    }
}
