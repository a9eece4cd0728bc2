#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use marquee_api::auth::jwt::{generate_admin_token, JwtConfig};
use marquee_api::auth::password::hash_password;
use marquee_api::config::{ServerConfig, StoreBackend, StoreConfig};
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_core::catalog::MemoryCatalogStore;
use marquee_core::movie::LinkSchema;
use marquee_core::search::{SearchEngine, SearchKind, DEFAULT_FUZZY_THRESHOLD};

/// Plaintext admin password accepted by every test app.
pub const TEST_PASSWORD: &str = "open-sesame-123";

/// Argon2 is slow in debug builds, so hash the test password once.
fn test_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_PASSWORD).expect("hashing should succeed"))
        .clone()
}

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config(search: SearchKind, link_schema: LinkSchema) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
            run_migrations: false,
        },
        search_strategy: search,
        fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        link_schema,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 60,
        },
        admin_password_hash: None,
        cookie_secure: false,
    }
}

/// A router over a fresh in-memory catalog.
///
/// `Router` is cheap to clone, so each request runs against a clone while
/// the underlying store is shared.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
}

impl TestApp {
    /// Exact search, list-of-links schema, admin login disabled.
    pub fn new() -> Self {
        Self::from_config(test_config(SearchKind::Exact, LinkSchema::List))
    }

    pub fn with(search: SearchKind, link_schema: LinkSchema) -> Self {
        Self::from_config(test_config(search, link_schema))
    }

    /// Like [`TestApp::new`] but with [`TEST_PASSWORD`] configured for login.
    pub fn with_login() -> Self {
        let mut config = test_config(SearchKind::Exact, LinkSchema::List);
        config.admin_password_hash = Some(test_password_hash());
        Self::from_config(config)
    }

    pub fn from_config(config: ServerConfig) -> Self {
        let state = AppState {
            store: Arc::new(MemoryCatalogStore::new()),
            search: SearchEngine::new(config.search_strategy, config.fuzzy_threshold),
            config: Arc::new(config.clone()),
            db: None,
        };
        let router = build_app_router(state, &config);
        Self { router, config }
    }

    /// `Cookie` header value carrying a freshly minted admin session.
    pub fn admin_cookie(&self) -> String {
        let token = generate_admin_token(&self.config.jwt).expect("token generation should succeed");
        format!("auth_token={token}")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Method::GET, uri, None, None).await
    }

    /// POST a movie with a valid admin session.
    pub async fn admin_post(&self, uri: &str, body: Value) -> Response<Body> {
        let cookie = self.admin_cookie();
        self.request(Method::POST, uri, Some(body), Some(&cookie)).await
    }

    pub async fn admin_put(&self, uri: &str, body: Value) -> Response<Body> {
        let cookie = self.admin_cookie();
        self.request(Method::PUT, uri, Some(body), Some(&cookie)).await
    }

    pub async fn admin_delete(&self, uri: &str) -> Response<Body> {
        let cookie = self.admin_cookie();
        self.request(Method::DELETE, uri, None, Some(&cookie)).await
    }

    /// Create a movie with a list-of-links body and return its id.
    pub async fn seed_movie(&self, name: &str) -> String {
        let body = serde_json::json!({
            "name": name,
            "image": "http://img/cover.png",
            "link": ["http://dl/file.mkv"],
        });
        let response = self.admin_post("/api/movies", body).await;
        assert_eq!(response.status(), axum::http::StatusCode::CREATED);
        body_json(response).await["data"]["id"]
            .as_str()
            .expect("id is a string")
            .to_string()
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
