//! Postgres-backed [`CatalogStore`].

use std::sync::Arc;

use async_trait::async_trait;
use marquee_core::catalog::CatalogStore;
use marquee_core::error::CoreError;
use marquee_core::movie::{MovieRecord, NewMovie};
use marquee_core::types::MovieId;

use crate::repositories::MovieRepo;
use crate::{DbPool, LazyPool};

/// Catalog store over a lazily opened Postgres pool.
///
/// Every operation first awaits [`LazyPool::get`], so the first request after
/// startup opens the connection and concurrent cold-start requests share it.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: Arc<LazyPool>,
}

impl PgCatalogStore {
    pub fn new(pool: Arc<LazyPool>) -> Self {
        Self { pool }
    }

    async fn pool(&self) -> Result<&DbPool, CoreError> {
        self.pool.get().await.map_err(db_error)
    }
}

fn db_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Catalog store query failed");
    CoreError::Internal(format!("Database error: {err}"))
}

fn to_u64(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn insert(&self, input: NewMovie) -> Result<MovieRecord, CoreError> {
        let row = MovieRepo::create(self.pool().await?, &input)
            .await
            .map_err(db_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: MovieId,
        input: NewMovie,
    ) -> Result<Option<MovieRecord>, CoreError> {
        let row = MovieRepo::update(self.pool().await?, id, &input)
            .await
            .map_err(db_error)?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: MovieId) -> Result<bool, CoreError> {
        MovieRepo::delete(self.pool().await?, id)
            .await
            .map_err(db_error)
    }

    async fn get(&self, id: MovieId) -> Result<Option<MovieRecord>, CoreError> {
        let row = MovieRepo::find_by_id(self.pool().await?, id)
            .await
            .map_err(db_error)?;
        Ok(row.map(Into::into))
    }

    async fn list_page(&self, offset: u64, limit: u32) -> Result<Vec<MovieRecord>, CoreError> {
        let rows = MovieRepo::list_page(self.pool().await?, to_i64(offset), i64::from(limit))
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, CoreError> {
        let n = MovieRepo::count(self.pool().await?)
            .await
            .map_err(db_error)?;
        Ok(to_u64(n))
    }

    async fn find_by_name(
        &self,
        term: &str,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<MovieRecord>, u64), CoreError> {
        let pool = self.pool().await?;
        let rows = MovieRepo::search_name(pool, term, to_i64(offset), i64::from(limit))
            .await
            .map_err(db_error)?;
        let total = MovieRepo::count_name(pool, term)
            .await
            .map_err(db_error)?;
        Ok((rows.into_iter().map(Into::into).collect(), to_u64(total)))
    }

    async fn all(&self) -> Result<Vec<MovieRecord>, CoreError> {
        let rows = MovieRepo::list_all(self.pool().await?)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
