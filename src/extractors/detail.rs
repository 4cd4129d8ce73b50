use log::{debug, info};
use scraper::{ElementRef, Html};
use std::thread;
use std::time::Duration;

use super::SiteLayout;
use crate::error::{CrawlError, Result};
use crate::fetchers::RequestFetcher;
use crate::html::{child_texts, text_of, Attr, Query};
use crate::model::Recipe;

/// Fetches detail pages and turns them into recipes
pub struct DetailExtractor<'a> {
    fetcher: &'a RequestFetcher,
    layout: &'a SiteLayout,
    delay: Duration,
}

impl<'a> DetailExtractor<'a> {
    pub fn new(fetcher: &'a RequestFetcher, layout: &'a SiteLayout, delay: Duration) -> Self {
        Self {
            fetcher,
            layout,
            delay,
        }
    }

    /// Fetch and parse one detail page; `Ok(None)` when it has no title
    pub fn extract(&self, url: &str) -> Result<Option<Recipe>> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let body = self.fetcher.fetch(url)?;
        let document = Html::parse_document(&body);
        parse_recipe(&document, self.layout, url)
    }
}

/// Extract a recipe from a parsed detail page.
///
/// A page without a title block yields `Ok(None)`. Any other missing block is
/// an error.
pub fn parse_recipe(document: &Html, layout: &SiteLayout, url: &str) -> Result<Option<Recipe>> {
    let Some(title) = document.find_first("h1", &[Attr::Class(&layout.title_class)]) else {
        info!("No recipe title on {}, skipping", url);
        return Ok(None);
    };
    let title = text_of(title);

    let author = document
        .find_first("div", &[Attr::Class(&layout.author_class)])
        .map(text_of)
        .ok_or_else(|| CrawlError::missing("author", url))?;

    let ingredients = document
        .find_first("table", &[Attr::Class(&layout.ingredients_class)])
        .ok_or_else(|| CrawlError::missing("ingredients table", url))?;
    let ingredients = join_lines(ingredients.find_all("tr", &[]).into_iter().map(row_text));

    let instructions = document
        .find_first("div", &[Attr::Id(&layout.instructions_id)])
        .ok_or_else(|| CrawlError::missing("instructions", url))?;

    let mut steps = Vec::new();

    let paragraphs = instructions.find_all("p", &[]);
    if paragraphs.first().is_some_and(|p| !text_of(*p).is_empty()) {
        debug!("Text-based recipe: {}", url);
        steps.extend(paragraphs.into_iter().map(text_of));
    }

    // Photo steps add to the text steps when a page carries both
    if let Some(photo_steps) =
        document.find_first("div", &[Attr::Class(&layout.photo_steps_class)])
    {
        debug!("Photo-step recipe: {}", url);
        steps.extend(child_texts(photo_steps));
    }

    Ok(Some(Recipe::new(
        title,
        author,
        ingredients,
        join_lines(steps),
    )))
}

/// Text of a table row, cells separated by a space
fn row_text(row: ElementRef<'_>) -> String {
    let cells: Vec<String> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(text_of)
        .filter(|cell| !cell.is_empty())
        .collect();
    if cells.is_empty() {
        text_of(row)
    } else {
        cells.join(" ")
    }
}

fn join_lines(lines: impl IntoIterator<Item = String>) -> String {
    lines
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
