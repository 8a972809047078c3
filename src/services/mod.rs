pub mod api;
pub mod error;
pub mod notify;

pub use api::{ApiHandle, HttpApi, ProfileApi};
pub use error::{ApiError, ApiResult};
pub use notify::Notice;
