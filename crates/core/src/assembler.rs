//! Response envelope for listing and search results.

use serde::Serialize;

use crate::movie::MovieRecord;
use crate::pagination::total_pages;

/// Pagination metadata. `total_movies` is the match count when searching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_movies: u64,
}

impl Pagination {
    pub fn new(current_page: u32, total: u64, page_size: u32) -> Self {
        Self {
            current_page,
            total_pages: total_pages(total, page_size),
            total_movies: total,
        }
    }

    /// Safe defaults reported alongside a failure.
    pub fn fallback(current_page: u32) -> Self {
        Self {
            current_page,
            total_pages: 1,
            total_movies: 0,
        }
    }
}

/// `{ success, data, pagination }` returned by listing and search.
#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub success: bool,
    pub data: Vec<MovieRecord>,
    pub pagination: Pagination,
}

/// Combine one page of records with its metadata.
pub fn assemble(records: Vec<MovieRecord>, total: u64, page: u32, page_size: u32) -> MoviePage {
    MoviePage {
        success: true,
        data: records,
        pagination: Pagination::new(page, total, page_size),
    }
}
