use std::net::SocketAddr;
use std::sync::Arc;

use marquee_core::catalog::{CatalogStore, MemoryCatalogStore};
use marquee_core::search::SearchEngine;
use marquee_db::{LazyPool, PgCatalogStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_api::config::{ServerConfig, StoreBackend};
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=debug,marquee_db=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store.backend,
        search = %config.search_strategy,
        link_schema = %config.link_schema,
        "Loaded server configuration"
    );
    if config.admin_password_hash.is_none() {
        tracing::warn!("ADMIN_PASSWORD_HASH is not set; admin login is disabled");
    }

    // --- Catalog store ---
    // The Postgres pool is opened by the first request that needs it.
    let (store, db): (Arc<dyn CatalogStore>, Option<Arc<LazyPool>>) = match config.store.backend
    {
        StoreBackend::Postgres => {
            let url = config
                .store
                .database_url
                .clone()
                .expect("DATABASE_URL must be set when STORE_BACKEND=postgres");
            let lazy = Arc::new(LazyPool::new(
                url,
                config.store.max_connections,
                config.store.run_migrations,
            ));
            let store: Arc<dyn CatalogStore> = Arc::new(PgCatalogStore::new(Arc::clone(&lazy)));
            (store, Some(lazy))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory catalog store; data is lost on restart");
            let store: Arc<dyn CatalogStore> = Arc::new(MemoryCatalogStore::new());
            (store, None)
        }
    };

    // --- Search ---
    let search = SearchEngine::new(config.search_strategy, config.fuzzy_threshold);

    // --- App state ---
    let state = AppState {
        store,
        search,
        config: Arc::new(config.clone()),
        db: db.clone(),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    if let Some(lazy) = db {
        lazy.close().await;
    }
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
