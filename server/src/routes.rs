use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::guard::Principal;

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Echoes the admin making the request.
pub async fn whoami_handler(Extension(principal): Extension<Principal>) -> Json<Principal> {
    Json(principal)
}
