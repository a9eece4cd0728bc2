//! Handlers for the `/movies` resource: listing, search, and admin CRUD.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marquee_core::assembler::{assemble, MoviePage};
use marquee_core::error::CoreError;
use marquee_core::movie::{MovieInput, MovieRecord, NewMovie};
use marquee_core::search::TERM_REQUIRED;
use marquee_core::types::MovieId;

use crate::error::{AppError, AppResult, PageError};
use crate::middleware::auth::AdminSession;
use crate::query::{PageParams, SearchParams};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a path id. Anything that is not a UUID cannot name a movie.
fn parse_id(raw: &str) -> AppResult<MovieId> {
    raw.parse::<MovieId>().map_err(|_| not_found(raw))
}

fn not_found(id: impl ToString) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Movie",
        id: id.to_string(),
    })
}

/// Unwrap a JSON body and validate it against the deployment's link schema.
fn validated_body(
    state: &AppState,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<NewMovie> {
    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(input.validate(state.config.link_schema)?)
}

// ---------------------------------------------------------------------------
// Listing and search
// ---------------------------------------------------------------------------

/// GET /api/movies?page=
///
/// One page of the catalog, newest first. Offset and limit go to the store.
pub async fn list(
    State(state): State<AppState>,
    params: PageParams,
) -> Result<Json<MoviePage>, PageError> {
    let query = params.descriptor();

    let records = state
        .store
        .list_page(query.offset(), query.page_size)
        .await
        .map_err(|e| PageError::new(e, query.page))?;
    let total = state
        .store
        .count()
        .await
        .map_err(|e| PageError::new(e, query.page))?;

    Ok(Json(assemble(records, total, query.page, query.page_size)))
}

/// GET /api/movies/search?q=&page=
///
/// Runs the deployment's search strategy. A missing or blank `q` is a 400;
/// a disabled search backend yields a friendly 500 message.
pub async fn search(
    State(state): State<AppState>,
    params: SearchParams,
) -> Result<Json<MoviePage>, PageError> {
    let query = params.descriptor();
    if query.is_listing() {
        return Err(PageError::new(
            AppError::BadRequest(TERM_REQUIRED.into()),
            query.page,
        ));
    }

    let start = Instant::now();
    let hits = state
        .search
        .search(state.store.as_ref(), &query)
        .await
        .map_err(|e| PageError::new(e, query.page))?;

    tracing::debug!(
        query = ?query.term,
        strategy = %state.search.kind(),
        page = query.page,
        matches = hits.total,
        duration_ms = start.elapsed().as_millis() as u64,
        "Search executed",
    );

    Ok(Json(assemble(
        hits.records,
        hits.total,
        query.page,
        query.page_size,
    )))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/movies
pub async fn create(
    admin: AdminSession,
    State(state): State<AppState>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<MovieRecord>>)> {
    let input = validated_body(&state, body)?;
    let movie = state.store.insert(input).await?;

    tracing::info!(movie_id = %movie.id, name = %movie.name, session = %admin.jti, "Movie created");
    Ok((StatusCode::CREATED, Json(DataResponse::ok(movie))))
}

/// GET /api/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<MovieRecord>>> {
    let movie_id = parse_id(&id)?;
    let movie = state
        .store
        .get(movie_id)
        .await?
        .ok_or_else(|| not_found(movie_id))?;
    Ok(Json(DataResponse::ok(movie)))
}

/// PUT /api/movies/{id}
///
/// Full replace of name, image, and links.
pub async fn update(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<DataResponse<MovieRecord>>> {
    let movie_id = parse_id(&id)?;
    let input = validated_body(&state, body)?;
    let movie = state
        .store
        .update(movie_id, input)
        .await?
        .ok_or_else(|| not_found(movie_id))?;

    tracing::info!(movie_id = %movie.id, session = %admin.jti, "Movie updated");
    Ok(Json(DataResponse::ok(movie)))
}

/// DELETE /api/movies/{id}
pub async fn delete(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let movie_id = parse_id(&id)?;
    if !state.store.delete(movie_id).await? {
        return Err(not_found(movie_id));
    }

    tracing::info!(movie_id = %movie_id, session = %admin.jti, "Movie deleted");
    Ok(Json(MessageResponse::ok("Movie deleted successfully")))
}
