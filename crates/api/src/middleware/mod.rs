//! Request extractors that gate access.
//!
//! - [`auth::AdminSession`] -- requires a valid `auth_token` session cookie.

pub mod auth;
