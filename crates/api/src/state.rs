use std::sync::Arc;

use marquee_core::catalog::CatalogStore;
use marquee_core::search::SearchEngine;
use marquee_db::LazyPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Where movie records are read and written.
    pub store: Arc<dyn CatalogStore>,
    /// The deployment's search strategy (possibly disabled).
    pub search: SearchEngine,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Lazily opened Postgres pool, when the postgres backend is active.
    pub db: Option<Arc<LazyPool>>,
}
