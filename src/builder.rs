use log::info;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::config::CrawlerConfig;
use crate::error::{CrawlError, Result};
use crate::extractors::{DetailExtractor, ListingCrawler, SiteLayout};
use crate::fetchers::{RequestFetcher, ResponseCache};
use crate::model::Recipe;
use crate::store::RecordStore;

/// Outcome of one crawl run
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Detail-page URLs discovered on the listing pages
    pub urls: Vec<String>,
    /// Recipes extracted, in URL order
    pub recipes: Vec<Recipe>,
    /// Detail pages skipped for lacking a title
    pub skipped: usize,
}

/// Builder for configuring a [`RecipeCrawler`]
#[derive(Debug, Default)]
pub struct RecipeCrawlerBuilder {
    base_url: Option<String>,
    start_url: Option<String>,
    delay: Option<Duration>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    layout: Option<SiteLayout>,
    cache_path: Option<PathBuf>,
    cache_expiry: Option<Duration>,
}

impl RecipeCrawlerBuilder {
    /// Start from a loaded configuration
    ///
    /// # Example
    /// ```
    /// use recipe_crawler::{CrawlerConfig, RecipeCrawler};
    ///
    /// let builder = RecipeCrawler::builder().config(&CrawlerConfig::default());
    /// ```
    pub fn config(mut self, config: &CrawlerConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.start_url = Some(config.start_url.clone());
        self.delay = Some(config.delay());
        self.timeout = Some(config.timeout());
        self.user_agent = Some(config.user_agent.clone());
        self.layout = Some(config.site.clone());
        self.cache_path = config.cache.enabled.then(|| config.cache.path.clone());
        self.cache_expiry = config.cache.expire_after_secs.map(Duration::from_secs);
        self
    }

    /// Origin that relative links are resolved against
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// First listing page; defaults to the base URL
    pub fn start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = Some(url.into());
        self
    }

    /// Fixed delay between page fetches
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Site markup to look for
    pub fn layout(mut self, layout: SiteLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Cache responses in the given SQLite file
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    pub fn cache_expiry(mut self, expire_after: Duration) -> Self {
        self.cache_expiry = Some(expire_after);
        self
    }

    /// Fetch every page from the network
    pub fn no_cache(mut self) -> Self {
        self.cache_path = None;
        self
    }

    /// Validate the URLs and open the HTTP client and cache
    ///
    /// # Errors
    /// Returns `CrawlError` if:
    /// - No base URL was specified
    /// - The base or start URL does not parse
    /// - The HTTP client or the cache file cannot be opened
    pub fn build(self) -> Result<RecipeCrawler> {
        let base_url = self.base_url.ok_or_else(|| {
            CrawlError::BuilderError("No base URL specified. Use .base_url()".to_string())
        })?;
        let base = Url::parse(&base_url)?;
        let start_url = base
            .join(self.start_url.as_deref().unwrap_or(base_url.as_str()))?
            .to_string();

        let mut fetcher = RequestFetcher::new(self.timeout, self.user_agent.as_deref())?;
        if let Some(path) = &self.cache_path {
            fetcher = fetcher.with_cache(ResponseCache::open(path, self.cache_expiry)?);
        }

        Ok(RecipeCrawler {
            base,
            start_url,
            delay: self.delay.unwrap_or_default(),
            layout: self.layout.unwrap_or_default(),
            fetcher,
        })
    }
}

/// Crawls listing pages, extracts each recipe and hands the batch to storage
pub struct RecipeCrawler {
    base: Url,
    start_url: String,
    delay: Duration,
    layout: SiteLayout,
    fetcher: RequestFetcher,
}

impl RecipeCrawler {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_crawler::RecipeCrawler;
    ///
    /// let builder = RecipeCrawler::builder().base_url("https://povar.ru");
    /// ```
    pub fn builder() -> RecipeCrawlerBuilder {
        RecipeCrawlerBuilder::default()
    }

    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    pub fn fetcher(&self) -> &RequestFetcher {
        &self.fetcher
    }

    /// Every detail-page URL reachable from the start page
    pub fn collect_urls(&self) -> Result<Vec<String>> {
        ListingCrawler::new(&self.fetcher, &self.layout, &self.base, self.delay)
            .collect_urls(&self.start_url)
    }

    /// Extract one detail page; `Ok(None)` when the page has no title
    pub fn extract(&self, url: &str) -> Result<Option<Recipe>> {
        DetailExtractor::new(&self.fetcher, &self.layout, self.delay).extract(url)
    }

    /// Crawl listings, then extract every discovered recipe
    pub fn crawl(&self) -> Result<CrawlReport> {
        info!("Starting crawl at {}", self.start_url);
        let urls = self.collect_urls()?;

        let extractor = DetailExtractor::new(&self.fetcher, &self.layout, self.delay);
        let mut report = CrawlReport::default();
        for (i, url) in urls.iter().enumerate() {
            info!("[{}/{}] Recipe: {}", i + 1, urls.len(), url);
            match extractor.extract(url)? {
                Some(recipe) => report.recipes.push(recipe),
                None => report.skipped += 1,
            }
        }
        report.urls = urls;

        info!(
            "Crawl finished: {} recipes, {} pages skipped",
            report.recipes.len(),
            report.skipped
        );
        Ok(report)
    }

    /// Crawl and write the results in a single batch
    pub fn run(&self, store: &mut RecordStore) -> Result<CrawlReport> {
        let report = self.crawl()?;
        store.write(&report.recipes)?;
        Ok(report)
    }
}
