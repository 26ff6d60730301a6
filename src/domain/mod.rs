//! Domain types for the audiobook catalog.
//!
//! This module contains the core data structures:
//! - Book: An immutable catalog record
//! - View: Sort/page settings and their configuration errors

pub mod book;
pub mod view;

// Re-export commonly used types
pub use book::Book;
pub use view::{ConfigError, PageSize, SortConfig, SortDirection, SortField, ViewMode};
