//! HTTP request handlers for the mock server.

pub mod projects;
pub mod repositories;

pub use projects::*;
pub use repositories::*;

use axum::{http::StatusCode, response::IntoResponse, Json};

/// JSON error body in the shape the registry uses.
pub(crate) fn error_response(status: StatusCode, message: String) -> axum::response::Response {
    (
        status,
        Json(serde_json::json!({
            "code": status.as_u16(),
            "message": message
        })),
    )
        .into_response()
}
