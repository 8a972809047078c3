use std::{env, fmt::Display, str::FromStr};

use axum::http::HeaderValue;
use tracing::{info, warn};

use crate::error::AppError;

pub struct Config {
    pub port: u16,
    pub allowed_origin: HeaderValue,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            port: try_load("RUST_PORT", "4000")?,
            allowed_origin: try_load("QUILL_ALLOWED_ORIGIN", "http://localhost:5173")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .map_err(|_| {
            warn!("Environment variable {key} not found, using default");
        })
        .ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    parse(key, var(key), default)
}

fn parse<T: FromStr>(key: &str, value: Option<String>, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    value
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(key.to_string())
        })
}
