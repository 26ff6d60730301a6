//! Field-aware, stable ordering of catalog records.

use std::cmp::Ordering;

use crate::domain::{Book, SortConfig, SortDirection, SortField};

use super::normalize::{compare_folded, normalize};

/// Precomputed comparison key for one record
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(i64),
    Text(String),
}

fn sort_key(book: &Book, field: SortField) -> SortKey {
    match field {
        SortField::Duration => SortKey::Number(i64::from(book.duration_minutes)),
        SortField::Year => SortKey::Number(book.parsed_year().unwrap_or(0)),
        SortField::Title => SortKey::Text(normalize(&book.title)),
        SortField::Author => SortKey::Text(normalize(&book.author)),
        SortField::Series => SortKey::Text(normalize(book.series_name())),
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => compare_folded(x, y),
        // Keys of one sort always share a variant
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

/// Compare two records under a sort configuration
pub fn compare(a: &Book, b: &Book, config: SortConfig) -> Ordering {
    let ord = compare_keys(&sort_key(a, config.field), &sort_key(b, config.field));
    match config.direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Return the records ordered by `config`. The input is left untouched.
///
/// Records with equal keys keep their relative input order in both
/// directions: descending reverses the comparison, not the result.
pub fn sort<'a, I>(records: I, config: SortConfig) -> Vec<&'a Book>
where
    I: IntoIterator<Item = &'a Book>,
{
    let mut keyed: Vec<(SortKey, &'a Book)> = records
        .into_iter()
        .map(|book| (sort_key(book, config.field), book))
        .collect();

    keyed.sort_by(|(ka, _), (kb, _)| {
        let ord = compare_keys(ka, kb);
        match config.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(_, book)| book).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(books: &[&Book]) -> Vec<u64> {
        books.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_sort_by_duration() {
        let books = vec![
            Book::new(1, "B").with_duration(330),
            Book::new(2, "A").with_duration(195),
            Book::new(3, "C").with_duration(525),
        ];

        let asc = sort(&books, SortConfig::asc(SortField::Duration));
        let minutes: Vec<u32> = asc.iter().map(|b| b.duration_minutes).collect();
        assert_eq!(minutes, vec![195, 330, 525]);

        let desc = sort(&books, SortConfig::desc(SortField::Duration));
        let minutes: Vec<u32> = desc.iter().map(|b| b.duration_minutes).collect();
        assert_eq!(minutes, vec![525, 330, 195]);

        // Input untouched
        assert_eq!(books[0].id, 1);
    }

    #[test]
    fn test_sort_by_year_treats_garbage_as_zero() {
        let books = vec![
            Book::new(1, "a").with_year("2001"),
            Book::new(2, "b").with_year("unknown"),
            Book::new(3, "c").with_year("1999"),
            Book::new(4, "d"),
        ];

        let sorted = sort(&books, SortConfig::asc(SortField::Year));
        assert_eq!(ids(&sorted), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_sort_titles_naturally() {
        let books = vec![
            Book::new(1, "Book 10"),
            Book::new(2, "book 2"),
            Book::new(3, "Éclair"),
            Book::new(4, "apple"),
        ];

        let sorted = sort(&books, SortConfig::asc(SortField::Title));
        assert_eq!(ids(&sorted), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_missing_series_sorts_first() {
        let books = vec![
            Book::new(1, "a").with_series("Mistborn", "1"),
            Book::new(2, "b"),
            Book::new(3, "c").with_series("Discworld", "1"),
        ];

        let sorted = sort(&books, SortConfig::asc(SortField::Series));
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn test_desc_is_stable_for_ties() {
        let books = vec![
            Book::new(1, "a").with_author("Pratchett"),
            Book::new(2, "b").with_author("Adams"),
            Book::new(3, "c").with_author("pratchett"),
            Book::new(4, "d").with_author("Adams"),
        ];

        let asc = sort(&books, SortConfig::asc(SortField::Author));
        assert_eq!(ids(&asc), vec![2, 4, 1, 3]);

        let desc = sort(&books, SortConfig::desc(SortField::Author));
        assert_eq!(ids(&desc), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_compare_matches_sort() {
        let a = Book::new(1, "a").with_duration(10);
        let b = Book::new(2, "b").with_duration(20);
        assert_eq!(compare(&a, &b, SortConfig::asc(SortField::Duration)), Ordering::Less);
        assert_eq!(compare(&a, &b, SortConfig::desc(SortField::Duration)), Ordering::Greater);
    }
}
