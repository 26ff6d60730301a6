//! audioshelf - Query and analysis layer for an audiobook catalog
//!
//! Turns a flat catalog of audiobook records into searchable, sortable,
//! paginated listings, catalog-wide statistics and a series completion
//! report.
//!
//! # Architecture
//!
//! The query logic is pure and synchronous:
//! - Records are loaded once through a `CatalogSource`
//! - Listings are derived by filtering, sorting and paginating borrowed records
//! - Statistics and series reports are computed from the same records
//!
//! # Modules
//!
//! - `core`: Query logic (normalize, search, sort, paginate, stats, series)
//! - `domain`: Data structures (Book, sort and page settings)
//! - `library`: Catalog loading and preference persistence
//! - `config`: Layered configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog, newest first
//! audioshelf list --sort year --desc
//!
//! # Search across title, author, narrator, series and genre
//! audioshelf search wheel jordan
//!
//! # Series with missing books
//! audioshelf series --filter gaps
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod library;

pub use crate::core::{
    aggregate, analyze_series_completion, filter, normalize, paginate, sort, CatalogView,
    ViewQuery,
};
pub use crate::domain::{Book, PageSize, SortConfig, SortDirection, SortField};
