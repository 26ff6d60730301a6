//! The book record every catalog view is built from.

use serde::{Deserialize, Serialize};

/// A single audiobook in the catalog.
///
/// Records are created once by a catalog source and never mutated;
/// filtered, sorted and paginated views hold references to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Row identifier, unique within one load
    pub id: u64,

    pub title: String,

    pub author: String,

    pub narrator: String,

    /// Series name, `None` for standalone books
    #[serde(default)]
    pub series: Option<String>,

    /// Position within the series as written on the tag ("2", "1.5", "IV", "Prequel")
    #[serde(default)]
    pub series_index: String,

    /// Release year as tagged; not guaranteed to be numeric
    #[serde(default)]
    pub year: String,

    #[serde(default)]
    pub genre: String,

    /// Total running time in whole minutes
    pub duration_minutes: u32,

    /// Cover image path or URL
    #[serde(default)]
    pub cover: Option<String>,
}

impl Book {
    /// Create a book with the given id and title; every other field is empty
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: String::new(),
            narrator: String::new(),
            series: None,
            series_index: String::new(),
            year: String::new(),
            genre: String::new(),
            duration_minutes: 0,
            cover: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_narrator(mut self, narrator: impl Into<String>) -> Self {
        self.narrator = narrator.into();
        self
    }

    /// Place the book in a series at the given index
    pub fn with_series(mut self, series: impl Into<String>, index: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self.series_index = index.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Series name, or `""` for standalone books
    pub fn series_name(&self) -> &str {
        self.series.as_deref().unwrap_or("")
    }

    /// Trimmed series name if the book belongs to a non-blank series
    pub fn series_key(&self) -> Option<&str> {
        self.series
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Leading integer of the year field, if any.
    ///
    /// "2015" and "2015-03-01" both give 2015; "unknown" gives `None`.
    pub fn parsed_year(&self) -> Option<i64> {
        parse_leading_int(&self.year)
    }
}

/// Parse the leading run of ASCII digits (with optional sign) of a trimmed string
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let book = Book::new(7, "The Way of Kings")
            .with_author("Brandon Sanderson")
            .with_narrator("Michael Kramer, Kate Reading")
            .with_series("The Stormlight Archive", "1")
            .with_year("2010")
            .with_genre("Fantasy")
            .with_duration(2729);

        assert_eq!(book.id, 7);
        assert_eq!(book.series_name(), "The Stormlight Archive");
        assert_eq!(book.series_index, "1");
        assert_eq!(book.duration_minutes, 2729);
        assert!(book.cover.is_none());
    }

    #[test]
    fn test_series_key_ignores_blank() {
        let standalone = Book::new(1, "Project Hail Mary");
        assert_eq!(standalone.series_key(), None);

        let blank = Book::new(2, "Blank").with_series("   ", "");
        assert_eq!(blank.series_key(), None);

        let padded = Book::new(3, "Dune").with_series("  Dune  ", "1");
        assert_eq!(padded.series_key(), Some("Dune"));
    }

    #[test]
    fn test_parsed_year() {
        assert_eq!(Book::new(1, "a").with_year("2015").parsed_year(), Some(2015));
        assert_eq!(Book::new(1, "a").with_year(" 1999-04-01").parsed_year(), Some(1999));
        assert_eq!(Book::new(1, "a").with_year("unknown").parsed_year(), None);
        assert_eq!(Book::new(1, "a").parsed_year(), None);
    }
}
