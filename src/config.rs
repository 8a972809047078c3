use log::info;

const DEFAULT_API_URL: &str = "http://localhost:4000/api";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// Values are baked in at build time; a wasm bundle has no environment.
    pub fn load() -> Self {
        Self {
            api_url: try_load("QUILL_API_URL", option_env!("QUILL_API_URL"), DEFAULT_API_URL),
        }
    }
}

fn try_load(key: &str, value: Option<&str>, default: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value.trim_end_matches('/').to_string(),
        None => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}
