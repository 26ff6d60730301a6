//! Catalog Loading Integration Tests
//!
//! Tests for reading the catalog CSV from disk and the preferences file.

use audioshelf::library::{
    CatalogSource, CsvCatalogSource, JsonFilePreferences, LoadError, StaticCatalogSource,
    ViewPreferences,
};
use audioshelf::{Book, PageSize, SortConfig, SortField};
use tempfile::TempDir;

const CATALOG: &str = "\
title,series,series_index_display,series_index_sort,author,narrator,year,genre,duration_hhmm,cover_href
The Eye of the World,The Wheel of Time,1,1,Robert Jordan,Michael Kramer,1990,Fantasy,29:57,covers/eye.jpg
The Great Hunt,The Wheel of Time,2,2,Robert Jordan,Michael Kramer,1990,Fantasy,27:05,
Project Hail Mary,,,,Andy Weir,Ray Porter,2021,Science Fiction,16:10,
";

#[tokio::test]
async fn test_load_csv_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.csv");
    std::fs::write(&path, CATALOG).unwrap();

    let source = CsvCatalogSource::new(&path);
    let books = source.load().await.unwrap();

    assert_eq!(books.len(), 3);
    assert_eq!(books[0].id, 1);
    assert_eq!(books[0].cover.as_deref(), Some("covers/eye.jpg"));
    assert_eq!(books[1].cover, None);
    assert_eq!(books[2].duration_minutes, 970);
    assert_eq!(books[2].series, None);
}

#[tokio::test]
async fn test_load_with_byte_order_mark() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.csv");
    std::fs::write(&path, format!("\u{feff}{}", CATALOG)).unwrap();

    let books = CsvCatalogSource::new(&path).load().await.unwrap();
    assert_eq!(books[0].title, "The Eye of the World");
}

#[tokio::test]
async fn test_missing_catalog_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.csv");

    let result = CsvCatalogSource::new(&path).load().await;
    match result {
        Err(LoadError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sources_are_interchangeable() {
    let sources: Vec<Box<dyn CatalogSource>> = vec![
        Box::new(StaticCatalogSource::new(vec![
            Book::new(1, "A"),
            Book::new(2, "B"),
        ])),
        Box::new(StaticCatalogSource::default()),
    ];

    let mut counts = Vec::new();
    for source in &sources {
        counts.push(source.load().await.unwrap().len());
    }
    assert_eq!(counts, vec![2, 0]);
}

#[test]
fn test_preferences_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("preferences.json");

    let prefs = ViewPreferences {
        sort: SortConfig::desc(SortField::Year),
        page_size: PageSize::new(50).unwrap(),
        ..Default::default()
    };

    let mut store = JsonFilePreferences::open(&path).unwrap();
    prefs.save(&mut store).unwrap();

    let reopened = JsonFilePreferences::open(&path).unwrap();
    let loaded = ViewPreferences::load(&reopened, ViewPreferences::default()).unwrap();
    assert_eq!(loaded, prefs);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"sort_field\": \"year\""));
}

#[test]
fn test_corrupt_preferences_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("preferences.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(JsonFilePreferences::open(&path).is_err());
}
