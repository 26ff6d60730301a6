//! Catalog loading and preference persistence.
//!
//! These are the only parts of the crate that touch the filesystem. The
//! catalog CSV is produced by the audiobook cataloger:
//!
//! ```text
//! title,series,series_index_display,series_index_sort,author,narrator,year,genre,duration_hhmm,cover_href
//! The Eye of the World,The Wheel of Time,1,1,Robert Jordan,Michael Kramer,1990,Fantasy,29:57,covers/eye.jpg
//! ```

pub mod catalog;
pub mod prefs;

pub use catalog::{parse_csv, CatalogSource, CsvCatalogSource, LoadError, StaticCatalogSource};
pub use prefs::{JsonFilePreferences, MemoryPreferences, PreferenceStore, ViewPreferences};
