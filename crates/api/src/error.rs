use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_core::assembler::Pagination;
use marquee_core::error::CoreError;
use serde_json::{json, Value};

/// User-facing message when the search backend is not available.
pub const SEARCH_UNAVAILABLE_MESSAGE: &str =
    "Search is temporarily unavailable. Please try again later.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ success: false, message, code }`
/// bodies; internal failures also carry an `error` detail string.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `marquee_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable detail.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// No route matches the request path.
    #[error("Route not found")]
    RouteNotFound,

    /// The path exists but not for this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status code and JSON body for this error.
    pub fn to_parts(&self) -> (StatusCode, Value) {
        let (status, code, message, detail) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id = %id, "Entity not found");
                    (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        format!("{entity} not found"),
                        None,
                    )
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
                }
                CoreError::SearchUnavailable => {
                    tracing::warn!("Search requested but no search strategy is configured");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "SEARCH_UNAVAILABLE",
                        SEARCH_UNAVAILABLE_MESSAGE.to_string(),
                        None,
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "Server Error".to_string(),
                        Some(msg.clone()),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Server Error".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Route not found".to_string(),
                None,
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
                None,
            ),
            AppError::Timeout => {
                tracing::warn!("Request timed out");
                (
                    StatusCode::REQUEST_TIMEOUT,
                    "REQUEST_TIMEOUT",
                    "Request timed out".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "success": false,
            "message": message,
            "code": code,
        });
        if let Some(detail) = detail {
            body["error"] = Value::String(detail);
        }
        (status, body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();
        (status, axum::Json(body)).into_response()
    }
}

/// Error from a listing or search endpoint.
///
/// Same body as [`AppError`] plus a `pagination` object with safe defaults
/// (the requested page, one total page) so clients can still render controls.
#[derive(Debug)]
pub struct PageError {
    pub error: AppError,
    pub page: u32,
}

impl PageError {
    pub fn new(error: impl Into<AppError>, page: u32) -> Self {
        Self {
            error: error.into(),
            page,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, mut body) = self.error.to_parts();
        body["pagination"] = json!(Pagination::fallback(self.page));
        (status, axum::Json(body)).into_response()
    }
}
