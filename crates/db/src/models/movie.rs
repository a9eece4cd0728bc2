//! Row mapping for the `movies` table.

use marquee_core::movie::{DownloadLinks, MovieRecord};
use marquee_core::types::{MovieId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: MovieId,
    pub name: String,
    pub image: String,
    pub download_links: Json<DownloadLinks>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MovieRow> for MovieRecord {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image: row.image,
            links: row.download_links.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
