//! HTTP-level integration tests for `GET /api/movies/search`.

mod common;

use axum::http::StatusCode;
use common::{body_json, TestApp};
use marquee_core::movie::LinkSchema;
use marquee_core::search::SearchKind;

fn names(json: &serde_json::Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_missing_or_blank_query_returns_400() {
    let app = TestApp::new();
    app.seed_movie("The Matrix").await;

    for uri in ["/api/movies/search", "/api/movies/search?q=", "/api/movies/search?q=%20%20"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Query parameter \"q\" is required");
    }

    // Listing is unaffected.
    let response = app.get("/api/movies").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["pagination"]["totalMovies"], 1);
}

#[tokio::test]
async fn test_exact_search_is_case_insensitive_substring() {
    let app = TestApp::new();
    app.seed_movie("The Matrix").await;
    app.seed_movie("Heat").await;

    for q in ["matrix", "MATRIX", "he%20Mat"] {
        let json = body_json(app.get(&format!("/api/movies/search?q={q}")).await).await;
        assert_eq!(names(&json), ["The Matrix"], "q {q}");
        assert_eq!(json["pagination"]["totalMovies"], 1);
    }
}

#[tokio::test]
async fn test_exact_search_paginates_matches() {
    let app = TestApp::new();
    for i in 0..12 {
        app.seed_movie(&format!("Alien {i}")).await;
    }
    app.seed_movie("Heat").await;

    let json = body_json(app.get("/api/movies/search?q=alien&page=2").await).await;
    assert_eq!(names(&json), ["Alien 1", "Alien 0"]);
    assert_eq!(json["pagination"]["currentPage"], 2);
    assert_eq!(json["pagination"]["totalPages"], 2);
    assert_eq!(json["pagination"]["totalMovies"], 12);
}

#[tokio::test]
async fn test_exact_search_without_matches_reports_one_empty_page() {
    let app = TestApp::new();
    app.seed_movie("Heat").await;

    let json = body_json(app.get("/api/movies/search?q=zzz").await).await;
    assert_eq!(json["success"], true);
    assert!(names(&json).is_empty());
    assert_eq!(json["pagination"]["totalPages"], 1);
    assert_eq!(json["pagination"]["totalMovies"], 0);
}

#[tokio::test]
async fn test_fuzzy_search_tolerates_typos() {
    let app = TestApp::with(SearchKind::Fuzzy, LinkSchema::List);
    app.seed_movie("Interstellar").await;
    app.seed_movie("Shrek").await;

    let json = body_json(app.get("/api/movies/search?q=Interstelar").await).await;
    assert_eq!(names(&json), ["Interstellar"]);
    assert_eq!(json["pagination"]["totalMovies"], 1);
}

#[tokio::test]
async fn test_fuzzy_search_orders_by_similarity() {
    let app = TestApp::with(SearchKind::Fuzzy, LinkSchema::List);
    app.seed_movie("Heat").await;
    app.seed_movie("Heist").await;

    // "Heist" is newer, but "Heat" is the exact title.
    let json = body_json(app.get("/api/movies/search?q=heat").await).await;
    assert_eq!(names(&json)[0], "Heat");
}

#[tokio::test]
async fn test_disabled_search_returns_friendly_message() {
    let app = TestApp::with(SearchKind::Disabled, LinkSchema::List);
    app.seed_movie("The Matrix").await;

    let response = app.get("/api/movies/search?q=matrix&page=2").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "SEARCH_UNAVAILABLE");
    assert_eq!(
        json["message"],
        "Search is temporarily unavailable. Please try again later."
    );
    assert_eq!(json["pagination"]["currentPage"], 2);
    assert_eq!(json["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_repeated_query_parameters_use_first_value() {
    let app = TestApp::new();
    app.seed_movie("The Matrix").await;
    app.seed_movie("Heat").await;

    let response = app.get("/api/movies/search?q=matrix&q=heat&page=1&page=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(names(&json), ["The Matrix"]);
    assert_eq!(json["pagination"]["currentPage"], 1);
}
