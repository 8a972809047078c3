use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("this route is accessible only for admins.")]
    AdminOnly,

    #[error("Environment misconfigured: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::AdminOnly => StatusCode::FORBIDDEN,
            AppError::Config { .. } | AppError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
