pub mod auth;
pub mod health;
pub mod movie;

use axum::Router;

use crate::router::method_not_allowed;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 admin login, sets auth_token cookie (public)
/// /auth/logout                clear auth_token cookie (public)
///
/// /movies                     list (public), create (admin)
/// /movies/search              search by name (public)
/// /movies/{id}                get (public), update, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/movies", movie::router())
        .method_not_allowed_fallback(method_not_allowed)
}
