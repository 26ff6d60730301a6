//! Multi-token search over the catalog.
//!
//! Every whitespace-separated token of the query must appear somewhere in
//! the record's searchable text (title, author, narrator, series, genre).
//! Matching is case- and accent-insensitive and token order does not matter.

use crate::domain::Book;

use super::normalize::normalize;

/// Normalized, non-empty query tokens
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Normalized concatenation of a record's searchable fields
pub fn haystack(book: &Book) -> String {
    let joined = [
        book.title.as_str(),
        book.author.as_str(),
        book.narrator.as_str(),
        book.series_name(),
        book.genre.as_str(),
    ]
    .join(" ");

    normalize(&joined)
}

/// Check a record against pre-tokenized query terms
pub fn matches(book: &Book, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let hay = haystack(book);
    tokens.iter().all(|t| hay.contains(t.as_str()))
}

/// Keep the records matching every query token, preserving their order.
///
/// A blank query returns every record.
pub fn filter<'a, I>(records: I, query: &str) -> Vec<&'a Book>
where
    I: IntoIterator<Item = &'a Book>,
{
    let tokens = tokenize(query);
    records
        .into_iter()
        .filter(|book| matches(book, &tokens))
        .collect()
}
