pub mod health;
pub mod logs;
pub mod metrics;
pub mod services;
pub mod stats;
pub mod topology;
pub mod traces;

use axum::Json;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Attach the pagination headers every list endpoint reports
/// (total/filtered counts plus the offset/limit that produced this page)
/// to a JSON array body.
pub fn paginated_json<T: Serialize>(
    items: Vec<T>,
    total: usize,
    filtered: usize,
    offset: usize,
    limit: usize,
) -> Response {
    let header = |n: usize| HeaderValue::try_from(n.to_string()).expect("digits are valid header value bytes");
    let mut headers = HeaderMap::new();
    headers.insert("x-total-count", header(total));
    headers.insert("x-filtered-count", header(filtered));
    headers.insert("x-offset", header(offset));
    headers.insert("x-limit", header(limit));
    (headers, Json(items)).into_response()
}
