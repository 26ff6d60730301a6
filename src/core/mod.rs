//! Catalog query and aggregation logic.
//!
//! This module contains:
//! - Normalize: Case/accent folding and natural ordering
//! - Search: Multi-token AND filtering
//! - Sort: Stable field-aware ordering
//! - Paginate: Page window computation
//! - Stats: Catalog-wide statistics
//! - Series: Series completion tracking
//! - Index: Series index parsing
//! - View: The search → sort → paginate pipeline
//!
//! Everything here is synchronous and side-effect free.

pub mod index;
pub mod normalize;
pub mod paginate;
pub mod search;
pub mod series;
pub mod sort;
pub mod stats;
pub mod view;

// Re-export commonly used types
pub use index::{index_position, normalize_index};
pub use normalize::{natural_cmp, normalize};
pub use paginate::{paginate, Page};
pub use search::filter;
pub use series::{
    analyze_series_completion, CompletionStatus, CompletionThresholds, SeriesCompletion,
    SeriesFilter, SeriesReport,
};
pub use sort::sort;
pub use stats::{aggregate, aggregate_with_top, DurationCategory, Statistics};
pub use view::{CatalogView, ViewQuery};
