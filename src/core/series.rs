//! Series completion tracking.
//!
//! Books are grouped by series name, their indices are parsed to positions
//! and the integer positions between the lowest and highest present one
//! are checked for holes. The status labels are a product choice, so the
//! cut-offs live in [`CompletionThresholds`] and can be set from config.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Book, ConfigError};

use super::index::{index_position, normalize_index};
use super::stats::round_to;

/// Cut-offs for the completion status labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionThresholds {
    /// Completion percentage at or above which a series is mostly complete
    #[serde(default = "default_mostly_complete_pct")]
    pub mostly_complete_pct: f64,

    /// A series missing at most this many positions is mostly complete
    #[serde(default = "default_mostly_complete_max_missing")]
    pub mostly_complete_max_missing: usize,

    /// Completion percentage at or above which a series is in progress
    #[serde(default = "default_in_progress_pct")]
    pub in_progress_pct: f64,

    /// Positions above this are treated as tag noise (e.g. a year in the index field)
    #[serde(default = "default_max_position")]
    pub max_position: u32,
}

fn default_mostly_complete_pct() -> f64 {
    75.0
}
fn default_mostly_complete_max_missing() -> usize {
    1
}
fn default_in_progress_pct() -> f64 {
    50.0
}
fn default_max_position() -> u32 {
    500
}

impl Default for CompletionThresholds {
    fn default() -> Self {
        Self {
            mostly_complete_pct: default_mostly_complete_pct(),
            mostly_complete_max_missing: default_mostly_complete_max_missing(),
            in_progress_pct: default_in_progress_pct(),
            max_position: default_max_position(),
        }
    }
}

impl CompletionThresholds {
    /// Reject percentages outside 0..=100 or in the wrong order
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("mostly_complete_pct", self.mostly_complete_pct),
            ("in_progress_pct", self.in_progress_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if self.in_progress_pct > self.mostly_complete_pct {
            return Err(ConfigError::InvalidThreshold {
                name: "in_progress_pct",
                value: self.in_progress_pct,
            });
        }

        if self.max_position == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "max_position",
                value: 0.0,
            });
        }

        Ok(())
    }
}

/// Completion label of one series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionStatus {
    Complete,
    MostlyComplete,
    InProgress,
    Incomplete,
}

impl CompletionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CompletionStatus::Complete => "Complete",
            CompletionStatus::MostlyComplete => "Mostly Complete",
            CompletionStatus::InProgress => "In Progress",
            CompletionStatus::Incomplete => "Incomplete",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One book as listed inside its series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEntry {
    pub id: u64,
    pub title: String,
    pub author: String,
    /// Index as shown to the user ("IV" becomes "4")
    pub index_display: String,
    pub position: Option<f64>,
    pub year: String,
    pub cover: Option<String>,
}

/// Completion analysis of one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesCompletion {
    pub name: String,
    /// Author of the first book encountered
    pub author: String,
    pub book_count: usize,
    /// Distinct whole-number positions present, ascending
    pub positions: Vec<u32>,
    /// Whole-number positions between the lowest and highest present one with no book
    pub missing: Vec<u32>,
    /// `None` when no whole-number position could be inferred
    pub completion_pct: Option<f64>,
    pub status: CompletionStatus,
    /// Books ordered by position; unparseable indices last
    pub books: Vec<SeriesEntry>,
}

impl SeriesCompletion {
    pub fn has_gaps(&self) -> bool {
        !self.missing.is_empty()
    }

    /// Missing positions collapsed into inclusive ranges: [3, 4, 7] → [(3, 4), (7, 7)]
    pub fn gap_ranges(&self) -> Vec<(u32, u32)> {
        let mut ranges: Vec<(u32, u32)> = Vec::new();
        for &pos in &self.missing {
            match ranges.last_mut() {
                Some((_, end)) if *end + 1 == pos => *end = pos,
                _ => ranges.push((pos, pos)),
            }
        }
        ranges
    }
}

/// Subset of series to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesFilter {
    #[default]
    All,
    Complete,
    Incomplete,
    Gaps,
}

impl SeriesFilter {
    pub fn accepts(&self, series: &SeriesCompletion) -> bool {
        match self {
            SeriesFilter::All => true,
            SeriesFilter::Complete => series.status == CompletionStatus::Complete,
            SeriesFilter::Incomplete => series.status != CompletionStatus::Complete,
            SeriesFilter::Gaps => series.has_gaps(),
        }
    }
}

impl FromStr for SeriesFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(SeriesFilter::All),
            "complete" => Ok(SeriesFilter::Complete),
            "incomplete" => Ok(SeriesFilter::Incomplete),
            "gaps" => Ok(SeriesFilter::Gaps),
            _ => Err(format!("Unknown series filter: {}", s)),
        }
    }
}

/// Completion analysis of a whole catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesReport {
    /// Least complete first, then by name
    pub series: Vec<SeriesCompletion>,
    pub total_series: usize,
    pub complete_series: usize,
    pub incomplete_series: usize,
    pub standalone_books: usize,
    pub total_books: usize,
}

impl SeriesReport {
    pub fn filtered(&self, filter: SeriesFilter) -> Vec<&SeriesCompletion> {
        self.series.iter().filter(|s| filter.accepts(s)).collect()
    }

    pub fn get(&self, name: &str) -> Option<&SeriesCompletion> {
        self.series.iter().find(|s| s.name == name)
    }
}

fn whole_position(position: f64, max: u32) -> Option<u32> {
    if position.fract() != 0.0 || position < 1.0 || position > f64::from(max) {
        return None;
    }
    Some(position as u32)
}

fn classify(
    positions: &BTreeSet<u32>,
    missing: &[u32],
    completion: Option<f64>,
    thresholds: &CompletionThresholds,
) -> CompletionStatus {
    let Some(pct) = completion else {
        return CompletionStatus::InProgress;
    };

    let starts_at_one = positions.first() == Some(&1);
    if missing.is_empty() && starts_at_one {
        CompletionStatus::Complete
    } else if pct >= thresholds.mostly_complete_pct
        || missing.len() <= thresholds.mostly_complete_max_missing
    {
        CompletionStatus::MostlyComplete
    } else if pct >= thresholds.in_progress_pct {
        CompletionStatus::InProgress
    } else {
        CompletionStatus::Incomplete
    }
}

fn analyze_group(
    name: &str,
    books: &[&Book],
    thresholds: &CompletionThresholds,
) -> SeriesCompletion {
    let mut entries: Vec<SeriesEntry> = books
        .iter()
        .map(|book| SeriesEntry {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            index_display: normalize_index(&book.series_index),
            position: index_position(&book.series_index),
            year: book.year.clone(),
            cover: book.cover.clone(),
        })
        .collect();

    entries.sort_by(|a, b| match (a.position, b.position) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let positions: BTreeSet<u32> = entries
        .iter()
        .filter_map(|e| e.position)
        .filter_map(|p| whole_position(p, thresholds.max_position))
        .collect();

    let (missing, completion_pct) = match (positions.first(), positions.last()) {
        (Some(&min), Some(&max)) => {
            let missing: Vec<u32> = (min..=max).filter(|k| !positions.contains(k)).collect();
            let span = (max - min + 1) as f64;
            let pct = round_to(positions.len() as f64 / span * 100.0, 1);
            (missing, Some(pct))
        }
        _ => (Vec::new(), None),
    };

    let status = classify(&positions, &missing, completion_pct, thresholds);

    SeriesCompletion {
        name: name.to_string(),
        author: books.first().map(|b| b.author.clone()).unwrap_or_default(),
        book_count: books.len(),
        positions: positions.into_iter().collect(),
        missing,
        completion_pct,
        status,
        books: entries,
    }
}

/// Analyze every series in the catalog
pub fn analyze_series_completion<'a, I>(
    records: I,
    thresholds: &CompletionThresholds,
) -> SeriesReport
where
    I: IntoIterator<Item = &'a Book>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Book>> = HashMap::new();
    let mut standalone_books = 0;
    let mut total_books = 0;

    for book in records {
        total_books += 1;
        match book.series_key() {
            Some(name) => {
                groups
                    .entry(name)
                    .or_insert_with(|| {
                        order.push(name);
                        Vec::new()
                    })
                    .push(book);
            }
            None => standalone_books += 1,
        }
    }

    let mut series: Vec<SeriesCompletion> = order
        .iter()
        .map(|name| {
            let books = groups.get(name).map(Vec::as_slice).unwrap_or(&[]);
            analyze_group(name, books, thresholds)
        })
        .collect();

    series.sort_by(|a, b| {
        let by_pct = match (a.completion_pct, b.completion_pct) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_pct.then_with(|| a.name.cmp(&b.name))
    });

    let complete_series = series
        .iter()
        .filter(|s| s.status == CompletionStatus::Complete)
        .count();

    SeriesReport {
        total_series: series.len(),
        complete_series,
        incomplete_series: series.len() - complete_series,
        standalone_books,
        total_books,
        series,
    }
}
