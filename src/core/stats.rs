//! Catalog statistics: totals, top lists, duration buckets and insights.
//!
//! Aggregation never fails. An empty catalog yields a zeroed report and
//! malformed field values (blank names, unparseable years) are skipped.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::domain::Book;

/// Default length of the top-N lists
pub const DEFAULT_TOP_N: usize = 10;

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Length bucket of a single audiobook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationCategory {
    /// Under 5 hours
    Novella,
    /// 5 to 10 hours inclusive
    Short,
    /// Over 10, up to 15 hours
    Medium,
    /// Over 15, up to 24 hours
    Long,
    /// Over 24 hours
    ExtraLong,
}

impl DurationCategory {
    pub const ALL: [DurationCategory; 5] = [
        DurationCategory::Novella,
        DurationCategory::Short,
        DurationCategory::Medium,
        DurationCategory::Long,
        DurationCategory::ExtraLong,
    ];

    /// Bucket for a running time in minutes.
    ///
    /// Boundaries are compared in minutes so that exactly 10h (600) is Short
    /// and 601 is Medium, exactly 24h (1440) is Long and 1441 is Extra Long.
    pub fn from_minutes(minutes: u32) -> Self {
        match minutes {
            m if m < 5 * 60 => DurationCategory::Novella,
            m if m <= 10 * 60 => DurationCategory::Short,
            m if m <= 15 * 60 => DurationCategory::Medium,
            m if m <= 24 * 60 => DurationCategory::Long,
            _ => DurationCategory::ExtraLong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationCategory::Novella => "Novella (< 5h)",
            DurationCategory::Short => "Short (5-10h)",
            DurationCategory::Medium => "Medium (10-15h)",
            DurationCategory::Long => "Long (15-24h)",
            DurationCategory::ExtraLong => "Extra Long (24h+)",
        }
    }
}

impl fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value and how many books carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: usize,
}

/// Histogram bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: DurationCategory,
    pub count: usize,
    /// Share of all books, 1 decimal
    pub percentage: f64,
}

/// How long it would take to listen to everything
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListeningTime {
    pub days: f64,
    pub weeks: f64,
    pub months: f64,
    pub years: f64,
}

impl ListeningTime {
    fn from_hours(total_hours: u64) -> Self {
        let days = total_hours as f64 / 24.0;
        Self {
            days: round_to(days, 1),
            weeks: round_to(days / 7.0, 1),
            months: round_to(days / 30.0, 1),
            years: round_to(days / 365.0, 2),
        }
    }

    /// Largest unit that reaches one, with the next unit down in parentheses
    pub fn summary(&self) -> String {
        if self.years >= 1.0 {
            format!("{} years ({:.1} months)", self.years, self.months)
        } else if self.months >= 1.0 {
            format!("{:.1} months ({:.1} weeks)", self.months, self.weeks)
        } else if self.weeks >= 1.0 {
            format!("{:.1} weeks ({:.1} days)", self.weeks, self.days)
        } else {
            format!("{:.1} days", self.days)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    pub books_per_author: f64,
    pub books_per_narrator: f64,
    /// Distinct series relative to book count, in percent
    pub series_percentage: f64,
    pub avg_books_per_series: f64,
}

/// Aggregated view of a whole catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_books: usize,
    pub total_minutes: u64,
    pub total_hours: u64,
    pub average_duration_minutes: u64,
    pub average_duration_hours: f64,

    pub unique_authors: usize,
    pub unique_narrators: usize,
    pub unique_series: usize,
    pub unique_genres: usize,

    pub top_authors: Vec<RankedEntry>,
    pub top_narrators: Vec<RankedEntry>,
    pub top_series: Vec<RankedEntry>,
    pub top_genres: Vec<RankedEntry>,
    pub top_years: Vec<RankedEntry>,

    pub duration_categories: Vec<CategoryCount>,
    pub listening_time: ListeningTime,
    pub insights: Insights,

    /// "{min} - {max}" over parseable years, or "N/A"
    pub year_range: String,
}

impl Statistics {
    /// Count for one duration bucket
    pub fn category_count(&self, category: DurationCategory) -> usize {
        self.duration_categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}

/// Frequency table that remembers first-seen order for tie-breaking
#[derive(Debug, Default)]
struct Tally {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, raw: &str) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
                self.order.push(value.to_string());
            }
        }
    }

    fn distinct(&self) -> usize {
        self.order.len()
    }

    /// Highest counts first; equal counts keep first-seen order
    fn top(&self, n: usize) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = self
            .order
            .iter()
            .map(|name| RankedEntry {
                name: name.clone(),
                count: self.counts.get(name).copied().unwrap_or(0),
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(n);
        entries
    }
}

fn ratio(numerator: usize, denominator: usize, decimals: i32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round_to(numerator as f64 / denominator as f64, decimals)
    }
}

/// Aggregate with the default top-N length
pub fn aggregate<'a, I>(records: I) -> Statistics
where
    I: IntoIterator<Item = &'a Book>,
{
    aggregate_with_top(records, DEFAULT_TOP_N)
}

/// Aggregate a catalog, keeping `top_n` entries per ranked list
pub fn aggregate_with_top<'a, I>(records: I, top_n: usize) -> Statistics
where
    I: IntoIterator<Item = &'a Book>,
{
    let mut total_books = 0usize;
    let mut total_minutes = 0u64;
    let mut authors = Tally::default();
    let mut narrators = Tally::default();
    let mut series = Tally::default();
    let mut genres = Tally::default();
    let mut years = Tally::default();
    let mut buckets: HashMap<DurationCategory, usize> = HashMap::new();
    let mut parsed_years: BTreeSet<i64> = BTreeSet::new();

    for book in records {
        total_books += 1;
        total_minutes += u64::from(book.duration_minutes);

        authors.add(&book.author);
        narrators.add(&book.narrator);
        series.add(book.series_name());
        genres.add(&book.genre);
        years.add(&book.year);

        *buckets
            .entry(DurationCategory::from_minutes(book.duration_minutes))
            .or_default() += 1;

        if let Some(year) = book.parsed_year() {
            parsed_years.insert(year);
        }
    }

    let total_hours = total_minutes / 60;
    let average_duration_minutes = if total_books == 0 {
        0
    } else {
        total_minutes / total_books as u64
    };

    let duration_categories = DurationCategory::ALL
        .iter()
        .map(|&category| {
            let count = buckets.get(&category).copied().unwrap_or(0);
            CategoryCount {
                category,
                count,
                percentage: ratio(count * 100, total_books, 1),
            }
        })
        .collect();

    let series_books: usize = series.counts.values().sum();
    let insights = Insights {
        books_per_author: ratio(total_books, authors.distinct(), 1),
        books_per_narrator: ratio(total_books, narrators.distinct(), 1),
        series_percentage: ratio(series.distinct() * 100, total_books, 1),
        avg_books_per_series: ratio(series_books, series.distinct(), 1),
    };

    let year_range = match (parsed_years.first(), parsed_years.last()) {
        (Some(min), Some(max)) => format!("{} - {}", min, max),
        _ => "N/A".to_string(),
    };

    Statistics {
        total_books,
        total_minutes,
        total_hours,
        average_duration_minutes,
        average_duration_hours: round_to(average_duration_minutes as f64 / 60.0, 1),
        unique_authors: authors.distinct(),
        unique_narrators: narrators.distinct(),
        unique_series: series.distinct(),
        unique_genres: genres.distinct(),
        top_authors: authors.top(top_n),
        top_narrators: narrators.top(top_n),
        top_series: series.top(top_n),
        top_genres: genres.top(top_n),
        top_years: years.top(top_n),
        duration_categories,
        listening_time: ListeningTime::from_hours(total_hours),
        insights,
        year_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let stats = aggregate(&Vec::<Book>::new());

        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.total_minutes, 0);
        assert_eq!(stats.average_duration_minutes, 0);
        assert_eq!(stats.unique_authors, 0);
        assert!(stats.top_authors.is_empty());
        assert_eq!(stats.year_range, "N/A");
        assert_eq!(stats.insights, Insights::default());
        assert_eq!(stats.listening_time, ListeningTime::default());
        assert!(stats.duration_categories.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_duration_boundaries() {
        assert_eq!(DurationCategory::from_minutes(0), DurationCategory::Novella);
        assert_eq!(DurationCategory::from_minutes(299), DurationCategory::Novella);
        assert_eq!(DurationCategory::from_minutes(300), DurationCategory::Short);
        assert_eq!(DurationCategory::from_minutes(600), DurationCategory::Short);
        assert_eq!(DurationCategory::from_minutes(601), DurationCategory::Medium);
        assert_eq!(DurationCategory::from_minutes(900), DurationCategory::Medium);
        assert_eq!(DurationCategory::from_minutes(901), DurationCategory::Long);
        assert_eq!(DurationCategory::from_minutes(1440), DurationCategory::Long);
        assert_eq!(DurationCategory::from_minutes(1441), DurationCategory::ExtraLong);
        assert_eq!(DurationCategory::from_minutes(1500), DurationCategory::ExtraLong);
    }

    #[test]
    fn test_totals_and_averages() {
        let books = vec![
            Book::new(1, "a").with_duration(90),
            Book::new(2, "b").with_duration(100),
        ];
        let stats = aggregate(&books);

        assert_eq!(stats.total_minutes, 190);
        assert_eq!(stats.total_hours, 3);
        assert_eq!(stats.average_duration_minutes, 95);
        assert_eq!(stats.average_duration_hours, 1.6);
    }

    #[test]
    fn test_top_list_ties_keep_first_seen_order() {
        let books = vec![
            Book::new(1, "a").with_author("Zelazny"),
            Book::new(2, "b").with_author("Asimov"),
            Book::new(3, "c").with_author("Asimov"),
            Book::new(4, "d").with_author("Banks"),
            Book::new(5, "e").with_author("Zelazny"),
            Book::new(6, "f").with_author("  "),
        ];
        let stats = aggregate(&books);

        let names: Vec<&str> = stats.top_authors.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Zelazny", "Asimov", "Banks"]);
        assert_eq!(stats.unique_authors, 3);
    }

    #[test]
    fn test_top_list_truncates() {
        let books: Vec<Book> = (0..15)
            .map(|i| Book::new(i, "t").with_genre(format!("Genre {}", i)))
            .collect();
        assert_eq!(aggregate(&books).top_genres.len(), 10);
        assert_eq!(aggregate_with_top(&books, 3).top_genres.len(), 3);
    }

    #[test]
    fn test_year_range_ignores_garbage() {
        let books = vec![
            Book::new(1, "a").with_year("2010"),
            Book::new(2, "b").with_year("n/a"),
            Book::new(3, "c").with_year("1987-05-01"),
        ];
        assert_eq!(aggregate(&books).year_range, "1987 - 2010");
    }

    #[test]
    fn test_listening_time_summary() {
        let time = ListeningTime::from_hours(24 * 400);
        assert_eq!(time.days, 400.0);
        assert_eq!(time.years, 1.1);
        assert!(time.summary().starts_with("1.1 years"));

        let short = ListeningTime::from_hours(36);
        assert_eq!(short.summary(), "1.5 days");
    }

    #[test]
    fn test_insights() {
        let books = vec![
            Book::new(1, "a").with_author("A").with_series("S1", "1"),
            Book::new(2, "b").with_author("A").with_series("S1", "2"),
            Book::new(3, "c").with_author("B").with_series("S2", "1"),
            Book::new(4, "d").with_author("B"),
        ];
        let stats = aggregate(&books);

        assert_eq!(stats.insights.books_per_author, 2.0);
        assert_eq!(stats.insights.books_per_narrator, 0.0);
        assert_eq!(stats.insights.series_percentage, 50.0);
        assert_eq!(stats.insights.avg_books_per_series, 1.5);
    }
}
