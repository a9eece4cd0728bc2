use std::str::FromStr;

use marquee_core::movie::LinkSchema;
use marquee_core::search::{SearchKind, DEFAULT_FUZZY_THRESHOLD};

use crate::auth::jwt::JwtConfig;

/// Where movie records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "unknown store backend '{other}' (expected postgres or memory)"
            )),
        }
    }
}

/// Catalog store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Required when `backend` is [`StoreBackend::Postgres`].
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Apply migrations when the pool is first opened.
    pub run_migrations: bool,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store: StoreConfig,
    /// Active search strategy for this deployment.
    pub search_strategy: SearchKind,
    /// Minimum similarity for fuzzy matches.
    pub fuzzy_threshold: f64,
    /// The single download-link shape this deployment accepts.
    pub link_schema: LinkSchema,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Argon2 PHC hash of the admin password. Login is refused when unset.
    pub admin_password_hash: Option<String>,
    /// Add the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_BACKEND`        | `postgres`                 |
    /// | `DATABASE_URL`         | -- (required for postgres) |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    /// | `RUN_MIGRATIONS`       | `true`                     |
    /// | `SEARCH_STRATEGY`      | `exact`                    |
    /// | `FUZZY_THRESHOLD`      | `0.6`                      |
    /// | `LINK_SCHEMA`          | `qualities`                |
    /// | `ADMIN_PASSWORD_HASH`  | unset (login disabled)     |
    /// | `COOKIE_SECURE`        | `true`                     |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values or a missing `DATABASE_URL` for the
    /// postgres backend; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");
        let port: u16 = parse_env("PORT", "3000");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", "30");

        let backend: StoreBackend = parse_env("STORE_BACKEND", "postgres");
        let database_url = std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty());
        assert!(
            backend != StoreBackend::Postgres || database_url.is_some(),
            "DATABASE_URL must be set when STORE_BACKEND=postgres"
        );
        let store = StoreConfig {
            backend,
            database_url,
            max_connections: parse_env("DB_MAX_CONNECTIONS", "10"),
            run_migrations: parse_env("RUN_MIGRATIONS", "true"),
        };

        let search_strategy: SearchKind = parse_env("SEARCH_STRATEGY", "exact");
        let fuzzy_threshold: f64 =
            parse_env("FUZZY_THRESHOLD", &DEFAULT_FUZZY_THRESHOLD.to_string());
        assert!(
            (0.0..=1.0).contains(&fuzzy_threshold),
            "FUZZY_THRESHOLD must be between 0.0 and 1.0"
        );

        let link_schema: LinkSchema = parse_env("LINK_SCHEMA", "qualities");

        let admin_password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .ok()
            .filter(|h| !h.is_empty());

        let cookie_secure: bool = parse_env("COOKIE_SECURE", "true");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            search_strategy,
            fuzzy_threshold,
            link_schema,
            jwt,
            admin_password_hash,
            cookie_secure,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or(key, default)
        .parse()
        .unwrap_or_else(|e| panic!("{key} is invalid: {e}"))
}
