//! Configuration for the task API client.
//!
//! The base URL comes from `TASKLIST_API_BASE_URL`; an unset or blank value
//! falls back to the compiled default. Resolution is a pure function so it
//! can be tested without touching the process environment.

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "TASKLIST_API_BASE_URL";

/// Base URL used when the environment provides none.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api/v1";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from the environment, falling back to the default.
    pub fn from_env() -> Self {
        Self {
            base_url: resolve_base_url(std::env::var(BASE_URL_ENV).ok()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn resolve_base_url(env_value: Option<String>) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
