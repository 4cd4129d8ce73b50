use serde::Deserialize;

mod detail;
mod listing;

pub use detail::{parse_recipe, DetailExtractor};
pub use listing::{ListingCrawler, ListingPage};

/// Markup of the crawled site: class names, ids and the pagination label.
///
/// Multi-word class values match an element's whole class list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteLayout {
    /// `div` wrapping the recipe cards of a listing page
    pub listing_class: String,
    /// `div` of a single recipe card
    pub card_class: String,
    /// `itemprop` of the card link
    pub card_link_itemprop: String,
    /// `div` holding the card title link, used when the `itemprop` link is absent
    pub card_title_class: String,
    /// `table` with the page links
    pub pagination_class: String,
    /// Visible text of the "next page" link
    pub next_label: String,
    /// `h1` of a detail page
    pub title_class: String,
    /// `div` with author attribution
    pub author_class: String,
    /// `table` of ingredients
    pub ingredients_class: String,
    /// id of the `div` with textual instructions
    pub instructions_id: String,
    /// `div` with photo steps
    pub photo_steps_class: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            listing_class: "recipe_list_new".to_string(),
            card_class: "recipe_l in_seen v2".to_string(),
            card_link_itemprop: "url".to_string(),
            card_title_class: "title".to_string(),
            pagination_class: "page_selector".to_string(),
            next_label: "Следующая".to_string(),
            title_class: "title".to_string(),
            author_class: "el user_date".to_string(),
            ingredients_class: "ingr".to_string(),
            instructions_id: "how".to_string(),
            photo_steps_class: "step_images_n".to_string(),
        }
    }
}
