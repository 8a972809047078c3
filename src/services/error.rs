use thiserror::Error;

/// Shown when the server rejects a call without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "خطایی رخ داد، دوباره تلاش کنید";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        }
    }

    /// Text fit for the person using the page.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Rejected { message, .. } => message,
            ApiError::Network(_) | ApiError::Decode(_) => DEFAULT_FAILURE_MESSAGE,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
