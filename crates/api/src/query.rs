//! Raw query parameter extractors for listing and search handlers.
//!
//! Values stay untyped strings here; [`QueryDescriptor`] normalizes them so
//! a malformed query string never turns into an extractor rejection. When a
//! key repeats, the first value wins.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::Uri;
use marquee_core::query::QueryDescriptor;

/// Decode the query string into ordered key/value pairs.
///
/// Decoding into a pair list accepts repeated keys, and a query string that
/// cannot be decoded at all is treated as empty.
fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// `?page=` on the listing endpoint.
#[derive(Debug, Default)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn descriptor(&self) -> QueryDescriptor {
        QueryDescriptor::from_raw(None, self.page.as_deref())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PageParams {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(&parts.uri);
        Ok(Self {
            page: first(&pairs, "page"),
        })
    }
}

/// `?q=&page=` on the search endpoint.
#[derive(Debug, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
}

impl SearchParams {
    pub fn descriptor(&self) -> QueryDescriptor {
        QueryDescriptor::from_raw(self.q.as_deref(), self.page.as_deref())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SearchParams {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(&parts.uri);
        Ok(Self {
            q: first(&pairs, "q"),
            page: first(&pairs, "page"),
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn search_params(uri: &str) -> SearchParams {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        SearchParams::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn first_value_wins_for_repeated_keys() {
        let params = search_params("/search?q=matrix&q=heat&page=2&page=5").await;
        assert_eq!(params.q.as_deref(), Some("matrix"));
        assert_eq!(params.page.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn values_are_percent_decoded() {
        let params = search_params("/search?q=he%20Mat").await;
        assert_eq!(params.q.as_deref(), Some("he Mat"));
        assert_eq!(params.page, None);
    }

    #[tokio::test]
    async fn missing_query_string_is_empty() {
        let params = search_params("/search").await;
        assert_eq!(params.q, None);
        assert!(params.descriptor().is_listing());
        assert_eq!(params.descriptor().page, 1);
    }
}
