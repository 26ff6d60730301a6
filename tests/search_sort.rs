//! Search and Sort Integration Tests
//!
//! Tests for multi-token filtering, accent folding and field-aware ordering.

use audioshelf::core::natural_cmp;
use audioshelf::{filter, normalize, sort, Book, SortConfig, SortField};
use std::cmp::Ordering;

fn catalog() -> Vec<Book> {
    vec![
        Book::new(1, "The Eye of the World")
            .with_author("Robert Jordan")
            .with_narrator("Michael Kramer")
            .with_series("The Wheel of Time", "1")
            .with_year("1990")
            .with_genre("Fantasy")
            .with_duration(1797),
        Book::new(2, "Project Hail Mary")
            .with_author("Andy Weir")
            .with_narrator("Ray Porter")
            .with_year("2021")
            .with_genre("Science Fiction")
            .with_duration(970),
        Book::new(3, "Le Café des Chats")
            .with_author("Émile Zola")
            .with_narrator("Zoë Martin")
            .with_year("c. 1880")
            .with_genre("Literary")
            .with_duration(330),
        Book::new(4, "The Great Hunt")
            .with_author("Robert Jordan")
            .with_narrator("Kate Reading")
            .with_series("The Wheel of Time", "2")
            .with_year("1990")
            .with_genre("Fantasy")
            .with_duration(1625),
    ]
}

fn ids(books: &[&Book]) -> Vec<u64> {
    books.iter().map(|b| b.id).collect()
}

#[test]
fn test_all_tokens_must_match() {
    let books = catalog();

    assert_eq!(ids(&filter(&books, "jordan")), vec![1, 4]);
    assert_eq!(ids(&filter(&books, "jordan kramer")), vec![1]);
    assert_eq!(ids(&filter(&books, "kramer jordan")), vec![1]);
    assert!(filter(&books, "jordan weir").is_empty());
}

#[test]
fn test_search_spans_fields() {
    let books = catalog();

    // series name, genre and narrator are all searchable
    assert_eq!(ids(&filter(&books, "wheel")), vec![1, 4]);
    assert_eq!(ids(&filter(&books, "science")), vec![2]);
    assert_eq!(ids(&filter(&books, "porter")), vec![2]);
}

#[test]
fn test_accent_and_case_insensitive() {
    let books = catalog();

    assert_eq!(ids(&filter(&books, "café")), vec![3]);
    assert_eq!(ids(&filter(&books, "CAFE")), vec![3]);
    assert_eq!(ids(&filter(&books, "emile zoe")), vec![3]);
    assert_eq!(normalize("  Émile   ZOLA "), "emile zola");
}

#[test]
fn test_blank_query_returns_everything() {
    let books = catalog();

    assert_eq!(ids(&filter(&books, "")), vec![1, 2, 3, 4]);
    assert_eq!(ids(&filter(&books, "   \t ")), vec![1, 2, 3, 4]);
}

#[test]
fn test_sort_by_duration() {
    let books = vec![
        Book::new(1, "A").with_duration(330),
        Book::new(2, "B").with_duration(195),
        Book::new(3, "C").with_duration(525),
    ];

    let asc = sort(&books, SortConfig::asc(SortField::Duration));
    let minutes: Vec<u32> = asc.iter().map(|b| b.duration_minutes).collect();
    assert_eq!(minutes, vec![195, 330, 525]);

    let desc = sort(&books, SortConfig::desc(SortField::Duration));
    let minutes: Vec<u32> = desc.iter().map(|b| b.duration_minutes).collect();
    assert_eq!(minutes, vec![525, 330, 195]);
}

#[test]
fn test_sort_by_year_with_unparseable_values() {
    let books = vec![
        Book::new(1, "A").with_year("2001"),
        Book::new(2, "B").with_year("unknown"),
        Book::new(3, "C").with_year("1999-05-01"),
        Book::new(4, "D"),
    ];

    // unparseable years sort as 0, ties keep input order
    let sorted = sort(&books, SortConfig::asc(SortField::Year));
    assert_eq!(ids(&sorted), vec![2, 4, 3, 1]);
}

#[test]
fn test_sort_by_title_is_natural_and_folded() {
    let books = vec![
        Book::new(1, "Book 10"),
        Book::new(2, "book 2"),
        Book::new(3, "Éclair"),
        Book::new(4, "Apple"),
    ];

    let sorted = sort(&books, SortConfig::asc(SortField::Title));
    assert_eq!(ids(&sorted), vec![4, 2, 1, 3]);
    assert_eq!(natural_cmp("Book 2", "Book 10"), Ordering::Less);
}

#[test]
fn test_sort_is_stable_in_both_directions() {
    let books = catalog();

    // books 1 and 4 share author and year
    let asc = sort(&books, SortConfig::asc(SortField::Author));
    assert_eq!(ids(&asc), vec![2, 3, 1, 4]);

    let desc = sort(&books, SortConfig::desc(SortField::Author));
    assert_eq!(ids(&desc), vec![1, 4, 3, 2]);

    let by_year = sort(&books, SortConfig::desc(SortField::Year));
    assert_eq!(ids(&by_year), vec![2, 1, 4, 3]);
}

#[test]
fn test_sort_by_series_puts_standalone_first() {
    let books = catalog();
    let sorted = sort(&books, SortConfig::asc(SortField::Series));
    assert_eq!(ids(&sorted), vec![2, 3, 1, 4]);
}

#[test]
fn test_sort_leaves_input_untouched() {
    let books = catalog();
    let _ = sort(&books, SortConfig::desc(SortField::Title));
    let original: Vec<u64> = books.iter().map(|b| b.id).collect();
    assert_eq!(original, vec![1, 2, 3, 4]);
}
