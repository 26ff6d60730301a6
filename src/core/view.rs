//! The listing pipeline: search, then sort, then paginate.

use serde::Serialize;

use crate::domain::{Book, PageSize, SortConfig};

use super::paginate::{paginate, Page};
use super::search::filter;
use super::sort::sort;

/// Everything a listing screen needs to ask for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewQuery {
    pub search: String,
    pub sort: SortConfig,
    pub page_size: PageSize,
    /// 1-based; clamped into range
    pub page: usize,
}

impl ViewQuery {
    pub fn new(sort: SortConfig, page_size: PageSize) -> Self {
        Self {
            search: String::new(),
            sort,
            page_size,
            page: 1,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// One rendered page of a catalog listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView<'a> {
    /// Records matching the search, before paging
    pub matched: usize,
    /// Size of the catalog the view was built from
    pub catalog_size: usize,
    pub page: Page<&'a Book>,
}

impl<'a> CatalogView<'a> {
    pub fn build(records: &'a [Book], query: &ViewQuery) -> Self {
        let matched = filter(records, &query.search);
        let ordered = sort(matched, query.sort);
        let page = paginate(&ordered, query.page_size, query.page);

        Self {
            matched: ordered.len(),
            catalog_size: records.len(),
            page,
        }
    }

    pub fn items(&self) -> &[&'a Book] {
        &self.page.items
    }
}
