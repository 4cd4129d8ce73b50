#![allow(dead_code)]

use recipe_crawler::RecipeCrawler;

/// Listing page with the given card links and an optional "next" link
pub fn listing_page(cards: &[&str], next: Option<&str>) -> String {
    let cards: String = cards
        .iter()
        .map(|href| {
            format!(
                r#"<div class="recipe_l in_seen v2">
                    <a itemprop="url" href="{href}"><img src="thumb.jpg"></a>
                    <div class="title"><a href="{href}">Recipe</a></div>
                </div>"#
            )
        })
        .collect();
    let next = next
        .map(|href| format!(r#"<td><a href="{href}">Следующая</a></td>"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
        <html><body>
            <div class="recipe_list_new">{cards}</div>
            <table class="page_selector"><tr><td><a href="/list/">1</a></td>{next}</tr></table>
        </body></html>"#
    )
}

/// Text-based detail page
pub fn detail_page(title: &str, ingredients: &[&str], steps: &[&str]) -> String {
    let rows: String = ingredients
        .iter()
        .map(|i| format!("<tr><td>{i}</td></tr>"))
        .collect();
    let paragraphs: String = steps.iter().map(|s| format!("<p>{s}</p>")).collect();

    format!(
        r#"<!DOCTYPE html>
        <html><body>
            <h1 class="title">{title}</h1>
            <div class="el user_date">Автор: Повар</div>
            <table class="ingr">{rows}</table>
            <div id="how">{paragraphs}</div>
        </body></html>"#
    )
}

pub fn page_without_title() -> String {
    r#"<!DOCTYPE html><html><body><p>Рецепт удалён</p></body></html>"#.to_string()
}

pub fn serve(server: &mut mockito::Server, path: &str, body: String) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .expect(1)
        .create()
}

/// Crawler pointed at the mock server, without delay or cache
pub fn crawler(server: &mockito::Server, start: &str) -> RecipeCrawler {
    RecipeCrawler::builder()
        .base_url(server.url())
        .start_url(start)
        .no_cache()
        .build()
        .unwrap()
}
