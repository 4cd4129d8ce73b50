use clap::Parser;
use log::info;
use std::path::PathBuf;

use recipe_crawler::{clear_table, load_config, load_config_from, run_crawl, Result};

/// Crawl recipes into a local SQLite table
#[derive(Parser, Debug)]
#[command(name = "recipe-crawler", version, about)]
struct Cli {
    /// Run the crawl and store every recipe found
    #[arg(short, long)]
    work: bool,

    /// Delete all rows of the given table
    #[arg(short, long, value_name = "TABLE")]
    delete: Option<String>,

    /// Configuration file (default: ./recipe-crawler.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if !cli.work && cli.delete.is_none() {
        println!("Nothing to do. Use --work to crawl or --delete <TABLE> to clear a table.");
        return Ok(());
    }

    if cli.work {
        info!("Crawling {}", config.start_url);
        let report = run_crawl(&config)?;
        info!(
            "Crawl complete: {} recipes from {} links",
            report.recipes.len(),
            report.urls.len()
        );
    }

    if let Some(table) = &cli.delete {
        let removed = clear_table(&config, table)?;
        info!("Table {} cleared ({} rows removed)", table, removed);
    }

    Ok(())
}
