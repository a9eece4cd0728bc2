//! Movie search: exact substring matching or typo-tolerant fuzzy matching.
//!
//! The active strategy is a deployment choice made once at startup
//! ([`SearchKind`], config `SEARCH_STRATEGY`), not a per-request switch. A
//! deployment may also run with search disabled, in which case every search
//! fails with [`CoreError::SearchUnavailable`].

mod exact;
mod fuzzy;

pub use exact::ExactSearch;
pub use fuzzy::{similarity, FuzzySearch};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::CatalogStore;
use crate::error::CoreError;
use crate::movie::MovieRecord;
use crate::query::QueryDescriptor;

/// Minimum similarity (0.0 - 1.0) for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Message returned when a search is requested without a term.
pub const TERM_REQUIRED: &str = "Query parameter \"q\" is required";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchKind {
    #[default]
    Exact,
    Fuzzy,
    Disabled,
}

impl SearchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Exact => "exact",
            SearchKind::Fuzzy => "fuzzy",
            SearchKind::Disabled => "disabled",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "substring" => Ok(SearchKind::Exact),
            "fuzzy" => Ok(SearchKind::Fuzzy),
            "disabled" | "off" | "none" => Ok(SearchKind::Disabled),
            other => Err(format!(
                "unknown search strategy '{other}' (expected exact, fuzzy, or disabled)"
            )),
        }
    }
}

/// One page of matches plus the total number of matches.
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    pub records: Vec<MovieRecord>,
    pub total: u64,
}

/// A way of finding records whose name matches a term.
#[async_trait]
pub trait SearchStrategy: Send + Sync {
    fn kind(&self) -> SearchKind;

    /// Return the requested page of matches for `term`, already ordered.
    async fn search(
        &self,
        store: &dyn CatalogStore,
        term: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchHits, CoreError>;
}

/// The configured search strategy, if any.
#[derive(Clone)]
pub struct SearchEngine {
    strategy: Option<Arc<dyn SearchStrategy>>,
}

impl SearchEngine {
    pub fn new(kind: SearchKind, fuzzy_threshold: f64) -> Self {
        let strategy: Option<Arc<dyn SearchStrategy>> = match kind {
            SearchKind::Exact => Some(Arc::new(ExactSearch)),
            SearchKind::Fuzzy => Some(Arc::new(FuzzySearch::new(fuzzy_threshold))),
            SearchKind::Disabled => None,
        };
        Self { strategy }
    }

    pub fn kind(&self) -> SearchKind {
        self.strategy
            .as_ref()
            .map_or(SearchKind::Disabled, |s| s.kind())
    }

    /// Run the active strategy for a search query.
    ///
    /// A descriptor without a term is a validation error; the listing path
    /// handles that case instead.
    pub async fn search(
        &self,
        store: &dyn CatalogStore,
        query: &QueryDescriptor,
    ) -> Result<SearchHits, CoreError> {
        let term = query
            .term
            .as_deref()
            .ok_or_else(|| CoreError::Validation(TERM_REQUIRED.into()))?;
        let strategy = self.strategy.as_ref().ok_or(CoreError::SearchUnavailable)?;
        strategy.search(store, term, query.page, query.page_size).await
    }
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("kind", &self.kind())
            .finish()
    }
}
