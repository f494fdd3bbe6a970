// Résumé generation: structured document in, PDF out.
// The engine is synchronous and CPU-bound; handlers run it inside spawn_blocking.

pub mod handlers;
pub mod policy;

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};

/// `application/pdf` response carrying extra metadata headers.
pub fn pdf_response(bytes: Vec<u8>, headers: Vec<(HeaderName, HeaderValue)>) -> Response {
    let mut response = bytes.into_response();
    let map = response.headers_mut();
    map.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    for (name, value) in headers {
        map.insert(name, value);
    }
    response
}
