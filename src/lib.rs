pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod html;
pub mod model;
pub mod store;

pub use builder::{CrawlReport, RecipeCrawler, RecipeCrawlerBuilder};
pub use crate::config::{load_config, load_config_from, CacheConfig, CrawlerConfig};
pub use error::{CrawlError, Result};
pub use extractors::SiteLayout;
pub use model::Recipe;
pub use store::{RecordStore, TableSchema};

use log::info;

/// Crawl the configured site and store every recipe in the configured table.
///
/// The table is written once, after the whole crawl has finished.
pub fn run_crawl(config: &CrawlerConfig) -> Result<CrawlReport> {
    let crawler = RecipeCrawler::builder().config(config).build()?;
    let mut store = RecordStore::open(&config.database_path, TableSchema::new(&config.table)?)?;

    let report = crawler.run(&mut store)?;
    info!(
        "Stored {} recipes in {} ({} rows total)",
        report.recipes.len(),
        config.database_path.display(),
        store.count()?
    );
    Ok(report)
}

/// Delete every row of `table` in the configured database.
///
/// Fails with `CrawlError::TableNotFound` instead of creating an unknown table.
pub fn clear_table(config: &CrawlerConfig, table: &str) -> Result<usize> {
    let mut store = RecordStore::open_existing(&config.database_path, TableSchema::new(table)?)?;
    store.clear()
}
