//! Handlers for the `/auth` resource (admin login and logout).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use marquee_core::error::CoreError;
use serde::Deserialize;
use validator::Validate;

use crate::auth::cookie::{clear_cookie, session_cookie};
use crate::auth::jwt::generate_admin_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

fn invalid_password() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid password".into()))
}

/// POST /api/auth/login
///
/// Check the admin password and, on success, set the `auth_token` cookie.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let Some(hash) = state.config.admin_password_hash.as_deref() else {
        tracing::warn!("Login attempted but ADMIN_PASSWORD_HASH is not configured");
        return Err(invalid_password());
    };

    let valid = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!("Admin login rejected");
        return Err(invalid_password());
    }

    let jwt = &state.config.jwt;
    let token = generate_admin_token(jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(&token, jwt.expiry_secs(), state.config.cookie_secure);

    tracing::info!("Admin logged in");
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse::ok("Logged in")),
    ))
}

/// POST /api/auth/logout
///
/// Expire the session cookie. Succeeds whether or not a session existed.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_cookie(state.config.cookie_secure))]),
        Json(MessageResponse::ok("Logged out")),
    )
}
