//! Status codes and bodies produced by `AppError` and `PageError`.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use marquee_api::error::{AppError, PageError, SEARCH_UNAVAILABLE_MESSAGE};
use marquee_core::error::CoreError;
use serde_json::Value;

async fn into_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_not_found_names_the_entity() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Movie",
        id: "abc".into(),
    });
    let (status, body) = err.to_parts();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Movie not found");
    assert_eq!(body["code"], "NOT_FOUND");
}

#[test]
fn test_validation_maps_to_400() {
    let (status, body) = AppError::from(CoreError::Validation("bad".into())).to_parts();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "bad");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body.get("error").is_none());
}

#[test]
fn test_internal_hides_detail_in_message() {
    let (status, body) = AppError::from(CoreError::Internal("pool timed out".into())).to_parts();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server Error");
    assert_eq!(body["error"], "pool timed out");
}

#[test]
fn test_search_unavailable_is_friendly() {
    let (status, body) = AppError::from(CoreError::SearchUnavailable).to_parts();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], SEARCH_UNAVAILABLE_MESSAGE);
    assert_eq!(body["code"], "SEARCH_UNAVAILABLE");
}

#[test]
fn test_core_error_converts_transparently() {
    let err: AppError = CoreError::Unauthorized("Unauthorized".into()).into();
    assert_matches!(err, AppError::Core(CoreError::Unauthorized(_)));
    assert_eq!(err.to_string(), "Unauthorized: Unauthorized");
}

#[tokio::test]
async fn test_page_error_includes_fallback_pagination() {
    let err = PageError::new(CoreError::Internal("boom".into()), 3);
    let (status, body) = into_json(err.into_response()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["pagination"]["currentPage"], 3);
    assert_eq!(body["pagination"]["totalPages"], 1);
    assert_eq!(body["pagination"]["totalMovies"], 0);
}

#[tokio::test]
async fn test_bad_request_response() {
    let (status, body) = into_json(AppError::BadRequest("nope".into()).into_response()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "nope");
}

#[test]
fn test_routing_errors_map_to_their_statuses() {
    let cases = [
        (AppError::RouteNotFound, StatusCode::NOT_FOUND, "NOT_FOUND"),
        (AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
        (AppError::Timeout, StatusCode::REQUEST_TIMEOUT, "REQUEST_TIMEOUT"),
    ];
    for (err, status, code) in cases {
        let (actual, body) = err.to_parts();
        assert_eq!(actual, status);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], code);
    }
}
