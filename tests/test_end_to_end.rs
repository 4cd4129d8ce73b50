mod common;

use common::{detail_page, listing_page, serve};
use recipe_crawler::{
    clear_table, run_crawl, CrawlError, CrawlerConfig, Recipe, RecordStore, TableSchema,
};

#[test]
fn test_single_listing_page_two_recipes() {
    let mut server = mockito::Server::new();
    let listing = serve(
        &mut server,
        "/list/",
        listing_page(&["/recipes/borsch.html", "/recipes/bliny.html"], None),
    );
    let borsch = serve(
        &mut server,
        "/recipes/borsch.html",
        detail_page(
            "Борщ",
            &["Свёкла 2 шт", "Капуста 300 г", "Вода 3 л"],
            &["Нарезать овощи.", "Варить 1 час."],
        ),
    );
    let bliny = serve(
        &mut server,
        "/recipes/bliny.html",
        detail_page(
            "Блины",
            &["Молоко 500 мл", "Мука 200 г", "Яйцо 2 шт"],
            &["Замесить тесто.", "Жарить."],
        ),
    );

    let dir = tempfile::tempdir().unwrap();
    let mut store =
        RecordStore::open(&dir.path().join("recipes.db"), TableSchema::default()).unwrap();

    let report = common::crawler(&server, "/list/").run(&mut store).unwrap();

    listing.assert();
    borsch.assert();
    bliny.assert();

    assert_eq!(report.urls.len(), 2);
    assert_eq!(report.recipes.len(), 2);
    assert_eq!(report.skipped, 0);

    let rows = store.load_all().unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert!(row.id.is_some());
        assert!(!row.title.is_empty());
        assert_eq!(row.author, "Автор: Повар");
        assert_eq!(row.ingredients.lines().count(), 3);
        assert_eq!(row.description.lines().count(), 2);
    }
    assert_eq!(rows[0].title, "Борщ");
    assert_eq!(rows[0].ingredients, "Свёкла 2 шт\nКапуста 300 г\nВода 3 л");
    assert_eq!(rows[0].description, "Нарезать овощи.\nВарить 1 час.");
    assert_eq!(rows[1].title, "Блины");
}

#[test]
fn test_run_crawl_then_clear_table() {
    let mut server = mockito::Server::new();
    let _m1 = serve(
        &mut server,
        "/list/",
        listing_page(&["/recipes/1.html"], None),
    );
    let _m2 = serve(
        &mut server,
        "/recipes/1.html",
        detail_page("Каша", &["Крупа"], &["Сварить."]),
    );

    let dir = tempfile::tempdir().unwrap();
    let mut config = CrawlerConfig::default();
    config.base_url = server.url();
    config.start_url = "/list/".to_string();
    config.delay_ms = 0;
    config.database_path = dir.path().join("recipes.db");
    config.cache.path = dir.path().join("http_cache.sqlite");

    let report = run_crawl(&config).unwrap();
    assert_eq!(report.recipes.len(), 1);

    let store = RecordStore::open(&config.database_path, TableSchema::default()).unwrap();
    assert_eq!(store.count().unwrap(), 1);

    assert_eq!(clear_table(&config, "Recs_Table").unwrap(), 1);
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(clear_table(&config, "Recs_Table").unwrap(), 0);
}

#[test]
fn test_clear_table_rejects_invalid_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = CrawlerConfig::default();
    config.database_path = dir.path().join("recipes.db");

    assert!(clear_table(&config, "Recs Table").is_err());
}

#[test]
fn test_clear_table_unknown_table_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = CrawlerConfig::default();
    config.database_path = dir.path().join("recipes.db");

    let mut store = RecordStore::open(&config.database_path, TableSchema::default()).unwrap();
    store
        .write(&[Recipe::new("Каша", "Иван", "Крупа", "Сварить.")])
        .unwrap();

    let result = clear_table(&config, "Recs_Tabel");
    assert!(matches!(result, Err(CrawlError::TableNotFound(_))));
    assert_eq!(store.count().unwrap(), 1);
}
