//! Cookie-based admin gate for mutating endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use marquee_core::error::CoreError;

use crate::auth::cookie::{read_cookie, AUTH_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carries a valid, unexpired admin session.
///
/// Use this as the first extractor of any handler that mutates the catalog:
///
/// ```ignore
/// async fn create(_admin: AdminSession, State(state): State<AppState>) -> AppResult<()> {
///     Ok(())
/// }
/// ```
///
/// Every failure is rejected with 401 and the message `Unauthorized`,
/// without saying why.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Token id of the session, for audit logging.
    pub jti: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = || AppError::Core(CoreError::Unauthorized("Unauthorized".into()));

        let token = read_cookie(&parts.headers, AUTH_COOKIE).ok_or_else(unauthorized)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected admin session token");
            unauthorized()
        })?;

        if !claims.admin {
            return Err(unauthorized());
        }

        Ok(AdminSession { jti: claims.jti })
    }
}
