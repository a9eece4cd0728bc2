//! Domain layer for the movie catalog.
//!
//! Holds everything that does not need a database or an HTTP stack: the
//! movie record model, query normalization, the search strategies, the
//! paginator, and the response assembler. Persistence is reached through the
//! [`catalog::CatalogStore`] trait so the same pipeline runs against Postgres
//! in production and against [`catalog::MemoryCatalogStore`] in tests.

pub mod assembler;
pub mod catalog;
pub mod error;
pub mod movie;
pub mod pagination;
pub mod query;
pub mod search;
pub mod types;
