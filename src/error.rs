use thiserror::Error;

/// Result type used across the crawler
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Errors that can occur while crawling or storing recipes
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Failed to fetch a page
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Database operation failed (record table or response cache)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A link could not be parsed or resolved against the base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// I/O error while preparing local files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A required element is missing from a fetched page
    #[error("Missing element `{element}` on {url}")]
    MissingElement { element: String, url: String },

    /// Table name is not a plain SQL identifier
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    /// Table to clear does not exist in the database
    #[error("Table {0:?} does not exist")]
    TableNotFound(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),
}

impl CrawlError {
    pub fn missing(element: impl Into<String>, url: impl Into<String>) -> Self {
        Self::MissingElement {
            element: element.into(),
            url: url.into(),
        }
    }
}
