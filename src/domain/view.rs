//! View configuration: how a catalog listing is ordered and paged.
//!
//! These are plain derived settings. They are parsed from CLI flags, the
//! config file or stored preferences, and rejected loudly when invalid.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Title,
    Author,
    Year,
    Duration,
    Series,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Title,
        SortField::Author,
        SortField::Year,
        SortField::Duration,
        SortField::Series,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Year => "year",
            SortField::Duration => "duration",
            SortField::Series => "series",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "year" => Ok(SortField::Year),
            "duration" => Ok(SortField::Duration),
            "series" => Ok(SortField::Series),
            _ => Err(ConfigError::UnknownSortField(s.to_string())),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction (header-click toggle)
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ConfigError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Field and direction of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Selecting the current field flips the direction; a new field starts ascending.
    pub fn select(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.toggled())
        } else {
            Self::asc(field)
        }
    }
}

/// Number of items per page, or everything on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PageSize {
    Count(NonZeroUsize),
    All,
}

impl PageSize {
    /// Page size of `n` items; zero is a caller bug and is rejected.
    pub fn new(n: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(n)
            .map(PageSize::Count)
            .ok_or(ConfigError::NonPositivePageSize(n as i64))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        // 25 per page
        PageSize::Count(NonZeroUsize::MIN.saturating_add(24))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Count(n) => write!(f, "{}", n),
            PageSize::All => f.write_str("all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }

        match trimmed.parse::<i64>() {
            Ok(n) if n > 0 => PageSize::new(n as usize),
            Ok(n) => Err(ConfigError::NonPositivePageSize(n)),
            Err(_) => Err(ConfigError::InvalidPageSize(s.to_string())),
        }
    }
}

impl TryFrom<String> for PageSize {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PageSize> for String {
    fn from(value: PageSize) -> Self {
        value.to_string()
    }
}

/// How the listing is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cards" | "card" => Ok(ViewMode::Cards),
            "table" => Ok(ViewMode::Table),
            _ => Err(ConfigError::UnknownViewMode(s.to_string())),
        }
    }
}

/// Invalid view or analysis configuration.
///
/// These indicate a caller bug or a broken config file, never bad catalog data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Unknown sort field: {0} (expected one of title, author, year, duration, series)")]
    UnknownSortField(String),

    #[error("Unknown sort direction: {0} (expected asc or desc)")]
    UnknownSortDirection(String),

    #[error("Page size must be a positive integer, got {0}")]
    NonPositivePageSize(i64),

    #[error("Invalid page size: {0} (expected a positive integer or \"all\")")]
    InvalidPageSize(String),

    #[error("Unknown view mode: {0} (expected cards or table)")]
    UnknownViewMode(String),

    #[error("Invalid completion threshold {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
}
