//! Catalog sources: where book records come from.
//!
//! The catalog tool writes a CSV with one row per audiobook. Loading it is
//! the typing boundary: raw text columns are coerced into [`Book`] records
//! here so the query layer can assume well-typed input.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::Book;

/// Failure to deliver a catalog
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Catalog not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

/// Anything that can deliver the full set of book records
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable source name (for logs)
    fn name(&self) -> &str;

    /// Load every record, or fail as a whole
    async fn load(&self) -> Result<Vec<Book>, LoadError>;
}

/// One CSV row as written by the cataloger. Every column is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogRow {
    title: String,
    series: String,
    series_index_display: String,
    series_index_sort: String,
    author: String,
    narrator: String,
    year: String,
    genre: String,
    duration_hhmm: String,
    duration_minutes: String,
    cover_href: String,
}

/// Parse "H:MM" (or "H:MM:SS") into whole minutes
pub fn parse_duration_hhmm(raw: &str) -> Option<u32> {
    let mut parts = raw.trim().split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    hours.checked_mul(60)?.checked_add(minutes)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl CatalogRow {
    fn into_book(self, id: u64) -> Book {
        let duration_minutes = match self.duration_minutes.trim().parse::<u32>() {
            Ok(minutes) => minutes,
            Err(_) if self.duration_hhmm.trim().is_empty() => 0,
            Err(_) => parse_duration_hhmm(&self.duration_hhmm).unwrap_or_else(|| {
                warn!(row = id, value = %self.duration_hhmm, "Unparseable duration, using 0");
                0
            }),
        };

        let series_index = if self.series_index_display.trim().is_empty() {
            self.series_index_sort.trim().to_string()
        } else {
            self.series_index_display.trim().to_string()
        };

        Book {
            id,
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            narrator: self.narrator.trim().to_string(),
            series: non_blank(self.series),
            series_index,
            year: self.year.trim().to_string(),
            genre: self.genre.trim().to_string(),
            duration_minutes,
            cover: non_blank(self.cover_href),
        }
    }
}

/// Parse catalog CSV content. Row ids are 1-based row numbers.
pub fn parse_csv(content: &str) -> Result<Vec<Book>, LoadError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut books = Vec::new();
    for (i, result) in reader.deserialize::<CatalogRow>().enumerate() {
        let row = result.map_err(|e| LoadError::Malformed {
            line: e.position().map_or(0, |p| p.line()),
            message: e.to_string(),
        })?;
        books.push(row.into_book(i as u64 + 1));
    }

    Ok(books)
}

/// Catalog CSV on disk
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for CsvCatalogSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn load(&self) -> Result<Vec<Book>, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        let books = parse_csv(&content)?;
        info!(path = %self.path.display(), books = books.len(), "Loaded catalog");
        Ok(books)
    }
}

/// Fixed in-memory catalog
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    books: Vec<Book>,
}

impl StaticCatalogSource {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn load(&self) -> Result<Vec<Book>, LoadError> {
        debug!(books = self.books.len(), "Serving static catalog");
        Ok(self.books.clone())
    }
}
