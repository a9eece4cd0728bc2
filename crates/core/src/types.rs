/// Movie identifiers are UUID v7, assigned by the store on insert.
pub type MovieId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, time-ordered movie identifier.
pub fn new_movie_id() -> MovieId {
    uuid::Uuid::now_v7()
}
