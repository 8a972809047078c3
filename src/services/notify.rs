use log::warn;

use super::error::ApiError;

const ERROR_TITLE: &str = "خطا!";
const CONFIRM: &str = "باشه";
pub const LOGIN_REQUIRED: &str = "برای دنبال کردن کاربران ابتدا وارد شوید";

/// A blocking notification the user has to dismiss.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub text: String,
    pub confirm: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            text: text.into(),
            confirm: CONFIRM.to_string(),
        }
    }

    pub fn login_required() -> Self {
        Self::error(LOGIN_REQUIRED)
    }
}

impl From<&ApiError> for Notice {
    fn from(error: &ApiError) -> Self {
        Notice::error(error.user_message())
    }
}

pub fn show(notice: &Notice) {
    let Some(window) = web_sys::window() else {
        warn!("no window to show notice: {}", notice.text);
        return;
    };

    if let Err(e) = window.alert_with_message(&format!("{}\n\n{}", notice.title, notice.text)) {
        warn!("failed to show notice: {:?}", e);
    }
}
