#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No search strategy is configured for this deployment.
    #[error("Search engine unavailable")]
    SearchUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}
