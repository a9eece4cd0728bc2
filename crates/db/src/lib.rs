//! Postgres persistence for the movie catalog.
//!
//! - [`LazyPool`] -- connection pool opened on first use, shared afterwards.
//! - [`repositories::MovieRepo`] -- sqlx queries against the `movies` table.
//! - [`store::PgCatalogStore`] -- the [`CatalogStore`](marquee_core::catalog::CatalogStore)
//!   implementation the API uses in production.

pub mod models;
pub mod repositories;
pub mod store;

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;

pub use store::PgCatalogStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// A pool that connects on first use.
///
/// Concurrent first callers all await the same in-flight initialization, so
/// at most one connection attempt runs at a time. A failed attempt leaves the
/// cell empty and the next caller tries again.
#[derive(Debug)]
pub struct LazyPool {
    database_url: String,
    max_connections: u32,
    migrate: bool,
    cell: OnceCell<DbPool>,
}

impl LazyPool {
    pub fn new(database_url: impl Into<String>, max_connections: u32, migrate: bool) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            migrate,
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already-open pool (used by tests).
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            database_url: String::new(),
            max_connections: 0,
            migrate: false,
            cell: OnceCell::new_with(Some(pool)),
        }
    }

    /// Return the shared pool, opening it (and migrating) on first call.
    pub async fn get(&self) -> Result<&DbPool, sqlx::Error> {
        self.get_with(|| self.open()).await
    }

    /// Return the pool, running `init` only if no pool is stored yet.
    ///
    /// Callers arriving while `init` is in flight wait for its outcome.
    async fn get_with<F, Fut>(&self, init: F) -> Result<&DbPool, sqlx::Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DbPool, sqlx::Error>>,
    {
        self.cell.get_or_try_init(init).await
    }

    async fn open(&self) -> Result<DbPool, sqlx::Error> {
        tracing::info!(
            max_connections = self.max_connections,
            "Opening database connection pool"
        );
        let pool = create_pool(&self.database_url, self.max_connections).await?;
        if self.migrate {
            run_migrations(&pool)
                .await
                .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
            tracing::info!("Database migrations applied");
        }
        Ok(pool)
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Close the pool if it was ever opened.
    pub async fn close(&self) {
        if let Some(pool) = self.cell.get() {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }
}
