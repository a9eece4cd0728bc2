//! Authentication primitives for the admin gate.
//!
//! - [`password`] -- Argon2id verification of the admin password.
//! - [`jwt`] -- session token generation and validation.
//! - [`cookie`] -- reading and writing the `auth_token` cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
