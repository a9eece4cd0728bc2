use async_trait::async_trait;
use strsim::normalized_levenshtein;

use super::{SearchHits, SearchKind, SearchStrategy};
use crate::catalog::CatalogStore;
use crate::error::CoreError;
use crate::pagination::paginate;

/// Typo-tolerant matching by normalized edit distance.
///
/// Similarity cannot be pushed to the store, so every search loads the full
/// catalog, scores each name, and paginates the ranked result in memory.
/// Results are ordered by descending score; equal scores keep recency order.
#[derive(Debug, Clone, Copy)]
pub struct FuzzySearch {
    threshold: f64,
}

impl FuzzySearch {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Similarity of `term` to `name` in `0.0..=1.0`, case-insensitive.
///
/// Takes the best of the whole name and every run of consecutive name words
/// as long as the term, so "matrix" scores well against "The Matrix".
pub fn similarity(term: &str, name: &str) -> f64 {
    let term = term.trim().to_lowercase();
    let name = name.trim().to_lowercase();

    let mut best = normalized_levenshtein(&term, &name);

    let words: Vec<&str> = name.split_whitespace().collect();
    let width = term.split_whitespace().count().max(1);
    if words.len() > width {
        for window in words.windows(width) {
            best = best.max(normalized_levenshtein(&term, &window.join(" ")));
        }
    }
    best
}

#[async_trait]
impl SearchStrategy for FuzzySearch {
    fn kind(&self) -> SearchKind {
        SearchKind::Fuzzy
    }

    async fn search(
        &self,
        store: &dyn CatalogStore,
        term: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchHits, CoreError> {
        let candidates = store.all().await?;

        let mut scored: Vec<(f64, _)> = candidates
            .into_iter()
            .map(|record| (similarity(term, &record.name), record))
            .filter(|(score, _)| *score >= self.threshold)
            .collect();
        // Stable sort: ties stay newest first.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let ranked: Vec<_> = scored.into_iter().map(|(_, record)| record).collect();
        Ok(SearchHits {
            total: ranked.len() as u64,
            records: paginate(&ranked, page, page_size),
        })
    }
}
