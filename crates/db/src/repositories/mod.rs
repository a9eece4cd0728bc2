//! Repository layer: one zero-sized struct per table with async query methods.

pub mod movie_repo;

pub use movie_repo::MovieRepo;
