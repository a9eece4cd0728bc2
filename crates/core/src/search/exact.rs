use async_trait::async_trait;

use super::{SearchHits, SearchKind, SearchStrategy};
use crate::catalog::CatalogStore;
use crate::error::CoreError;
use crate::pagination::offset;

/// Case-insensitive substring match on name, pushed down to the store.
///
/// Keeps the store's recency ordering and lets it apply skip/limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSearch;

#[async_trait]
impl SearchStrategy for ExactSearch {
    fn kind(&self) -> SearchKind {
        SearchKind::Exact
    }

    async fn search(
        &self,
        store: &dyn CatalogStore,
        term: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchHits, CoreError> {
        let (records, total) = store
            .find_by_name(term, offset(page, page_size), page_size)
            .await?;
        Ok(SearchHits { records, total })
    }
}
