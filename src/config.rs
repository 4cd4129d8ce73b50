use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::extractors::SiteLayout;

/// Main crawler configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CrawlerConfig {
    /// Origin used to resolve relative links
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// First listing page of the crawl
    #[serde(default = "default_start_url")]
    pub start_url: String,
    /// SQLite file holding the record table
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Table the crawl writes into
    #[serde(default = "default_table")]
    pub table: String,
    /// Fixed delay between page fetches in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// HTTP response cache
    #[serde(default)]
    pub cache: CacheConfig,
    /// Class names, ids and labels of the crawled site
    #[serde(default)]
    pub site: SiteLayout,
}

/// Configuration for the transparent HTTP response cache
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// SQLite file holding cached responses
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// Entries older than this are fetched again; never expire when unset
    #[serde(default)]
    pub expire_after_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            path: default_cache_path(),
            expire_after_secs: None,
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            start_url: default_start_url(),
            database_path: default_database_path(),
            table: default_table(),
            delay_ms: default_delay_ms(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            cache: CacheConfig::default(),
            site: SiteLayout::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://povar.ru".to_string()
}

fn default_start_url() -> String {
    "https://povar.ru/list/".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("recipes.db")
}

pub(crate) fn default_table() -> String {
    "Recs_Table".to_string()
}

fn default_delay_ms() -> u64 {
    500
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeCrawler/0.1)".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("http_cache.sqlite")
}

impl CrawlerConfig {
    /// Load configuration from `recipe-crawler.toml` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPES__ prefix
/// 2. recipe-crawler.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPES__CACHE__ENABLED=false
pub fn load_config() -> Result<CrawlerConfig, ConfigError> {
    build(File::with_name("recipe-crawler").required(false))
}

/// Load configuration from an explicit file, still honouring environment overrides
pub fn load_config_from(path: &Path) -> Result<CrawlerConfig, ConfigError> {
    build(File::from(path).required(true))
}

fn build<S>(file: S) -> Result<CrawlerConfig, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("RECIPES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
