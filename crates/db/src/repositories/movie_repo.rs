//! Repository for the `movies` table.

use marquee_core::movie::NewMovie;
use marquee_core::types::{new_movie_id, MovieId};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::movie::MovieRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image, download_links, created_at, updated_at";

/// Default ordering for every listing: newest first, id as tiebreaker.
const ORDER: &str = "ORDER BY created_at DESC, id DESC";

/// Provides CRUD and name-search queries for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewMovie) -> Result<MovieRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (id, name, image, download_links)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(new_movie_id())
            .bind(&input.name)
            .bind(&input.image)
            .bind(Json(&input.links))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: MovieId) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace name, image, and links. Returns `None` if no row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: MovieId,
        input: &NewMovie,
    ) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                name = $2,
                image = $3,
                download_links = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image)
            .bind(Json(&input.links))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a movie. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: MovieId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of movies, newest first.
    pub async fn list_page(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies {ORDER} LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
    }

    /// Case-insensitive substring search on name, newest first.
    ///
    /// The term is matched literally; `%`, `_` and `\` carry no pattern meaning.
    pub async fn search_name(
        pool: &PgPool,
        term: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MovieRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE name ILIKE $1 ESCAPE '\\'
             {ORDER} LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(contains_pattern(term))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of movies [`search_name`](Self::search_name) would match in total.
    pub async fn count_name(pool: &PgPool, term: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies WHERE name ILIKE $1 ESCAPE '\\'")
            .bind(contains_pattern(term))
            .fetch_one(pool)
            .await
    }

    /// Every movie, newest first. Used by in-memory fuzzy scoring.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies {ORDER}");
        sqlx::query_as::<_, MovieRow>(&query).fetch_all(pool).await
    }
}

/// Wrap `term` in `%...%` after escaping LIKE metacharacters.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
