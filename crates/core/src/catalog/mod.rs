//! Persistence boundary for movie records.
//!
//! Every store orders listings newest first (`created_at DESC`). Stores that
//! can push name matching and offset/limit down to their backend do so in
//! [`CatalogStore::find_by_name`]; [`CatalogStore::all`] exists for strategies
//! that must score every record in memory.

mod memory;

pub use memory::MemoryCatalogStore;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::movie::{MovieRecord, NewMovie};
use crate::types::MovieId;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Persist a new record. The store assigns the id and timestamps.
    async fn insert(&self, input: NewMovie) -> Result<MovieRecord, CoreError>;

    /// Full replace of name, image, and links. `None` if `id` is unknown.
    async fn update(&self, id: MovieId, input: NewMovie)
        -> Result<Option<MovieRecord>, CoreError>;

    /// Hard delete. Returns `true` if a record was removed.
    async fn delete(&self, id: MovieId) -> Result<bool, CoreError>;

    async fn get(&self, id: MovieId) -> Result<Option<MovieRecord>, CoreError>;

    /// One page of the full catalog, newest first.
    async fn list_page(&self, offset: u64, limit: u32) -> Result<Vec<MovieRecord>, CoreError>;

    async fn count(&self) -> Result<u64, CoreError>;

    /// Case-insensitive substring match on name, newest first.
    ///
    /// Returns the requested page and the total number of matches.
    async fn find_by_name(
        &self,
        term: &str,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<MovieRecord>, u64), CoreError>;

    /// Every record, newest first.
    async fn all(&self) -> Result<Vec<MovieRecord>, CoreError>;
}
