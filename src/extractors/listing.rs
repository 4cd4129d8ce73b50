use log::{debug, info, warn};
use scraper::Html;
use std::collections::HashSet;
use std::thread;
use std::time::Duration;
use url::Url;

use super::SiteLayout;
use crate::error::{CrawlError, Result};
use crate::fetchers::RequestFetcher;
use crate::html::{text_of, Attr, Query};

/// Links found on one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute detail-page URLs in card order
    pub recipe_urls: Vec<String>,
    /// Absolute URL of the next listing page, if any
    pub next_page: Option<String>,
}

impl ListingPage {
    /// Parse a listing page. Returns `None` when the page has no listing container.
    pub fn parse(
        document: &Html,
        layout: &SiteLayout,
        base: &Url,
        page_url: &str,
    ) -> Result<Option<Self>> {
        let Some(listing) = document.find_first("div", &[Attr::Class(&layout.listing_class)])
        else {
            return Ok(None);
        };

        let mut recipe_urls = Vec::new();
        for card in listing.find_all("div", &[Attr::Class(&layout.card_class)]) {
            let link = card
                .find_first("a", &[Attr::Is("itemprop", &layout.card_link_itemprop)])
                .or_else(|| {
                    card.find_first("div", &[Attr::Class(&layout.card_title_class)])
                        .and_then(|title| title.find_first("a", &[]))
                })
                .and_then(|a| a.value().attr("href"))
                .ok_or_else(|| CrawlError::missing("recipe card link", page_url))?;
            recipe_urls.push(base.join(link)?.to_string());
        }

        Ok(Some(Self {
            recipe_urls,
            next_page: find_next_page(document, layout, base)?,
        }))
    }
}

/// The last pagination link whose text contains the "next" label
fn find_next_page(document: &Html, layout: &SiteLayout, base: &Url) -> Result<Option<String>> {
    let Some(pagination) = document.find_first("table", &[Attr::Class(&layout.pagination_class)])
    else {
        return Ok(None);
    };

    let href = pagination
        .find_all("a", &[])
        .into_iter()
        .filter(|a| text_of(*a).contains(layout.next_label.as_str()))
        .filter_map(|a| a.value().attr("href"))
        .last();

    match href {
        Some(href) => Ok(Some(base.join(href)?.to_string())),
        None => Ok(None),
    }
}

/// Walks paginated listing pages and collects detail-page URLs
pub struct ListingCrawler<'a> {
    fetcher: &'a RequestFetcher,
    layout: &'a SiteLayout,
    base: &'a Url,
    delay: Duration,
}

impl<'a> ListingCrawler<'a> {
    pub fn new(
        fetcher: &'a RequestFetcher,
        layout: &'a SiteLayout,
        base: &'a Url,
        delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            layout,
            base,
            delay,
        }
    }

    /// Follow "next" links from `start_url` until pagination runs out.
    ///
    /// Stops early when a "next" link points to a page already crawled.
    pub fn collect_urls(&self, start_url: &str) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        let mut visited = HashSet::new();
        let mut page_url = self.base.join(start_url)?.to_string();

        loop {
            if !visited.is_empty() && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            visited.insert(page_url.clone());

            info!("Listing page: {}", page_url);
            let body = self.fetcher.fetch(&page_url)?;
            let document = Html::parse_document(&body);

            let Some(page) = ListingPage::parse(&document, self.layout, self.base, &page_url)?
            else {
                info!("No recipe listing on {}, stopping", page_url);
                break;
            };

            debug!("Found {} recipe links on {}", page.recipe_urls.len(), page_url);
            urls.extend(page.recipe_urls);

            match page.next_page {
                Some(next) if visited.contains(&next) => {
                    warn!("Next page {} was already crawled, stopping", next);
                    break;
                }
                Some(next) => page_url = next,
                None => break,
            }
        }

        info!(
            "Collected {} recipe links from {} listing pages",
            urls.len(),
            visited.len()
        );
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://povar.ru").unwrap()
    }

    fn parse(html: &str) -> Result<Option<ListingPage>> {
        let document = Html::parse_document(html);
        ListingPage::parse(&document, &SiteLayout::default(), &base(), "https://povar.ru/list/")
    }

    #[test]
    fn test_cards_and_next_link() {
        let page = parse(
            r#"
            <div class="recipe_list_new">
                <div class="recipe_l in_seen v2"><a itemprop="url" href="/recipes/borsch-1.html">Борщ</a></div>
                <div class="recipe_l in_seen v2"><div class="title"><a href="/recipes/shchi-2.html">Щи</a></div></div>
                <div class="banner"><a href="/ads">ad</a></div>
            </div>
            <table class="page_selector"><tr>
                <td><a href="/list/1/">1</a></td>
                <td><a href="/list/2/">Следующая &rarr;</a></td>
            </tr></table>
            "#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            page.recipe_urls,
            vec![
                "https://povar.ru/recipes/borsch-1.html".to_string(),
                "https://povar.ru/recipes/shchi-2.html".to_string(),
            ]
        );
        assert_eq!(page.next_page.as_deref(), Some("https://povar.ru/list/2/"));
    }

    #[test]
    fn test_no_next_label_ends_pagination() {
        let page = parse(
            r#"
            <div class="recipe_list_new"></div>
            <table class="page_selector"><tr><td><a href="/list/1/">Предыдущая</a></td></tr></table>
            "#,
        )
        .unwrap()
        .unwrap();
        assert!(page.recipe_urls.is_empty());
        assert!(page.next_page.is_none());
    }

    #[test]
    fn test_missing_pagination_table_ends_pagination() {
        let page = parse(r#"<div class="recipe_list_new"></div>"#)
            .unwrap()
            .unwrap();
        assert!(page.next_page.is_none());
    }

    #[test]
    fn test_missing_listing_container() {
        assert!(parse("<html><body><p>Nothing here</p></body></html>")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_card_without_link_is_an_error() {
        let result = parse(
            r#"<div class="recipe_list_new"><div class="recipe_l in_seen v2"><span>?</span></div></div>"#,
        );
        assert!(matches!(result, Err(CrawlError::MissingElement { .. })));
    }
}
