//! Configuration module
//!
//! Handles loading and managing configuration. Settings are layered:
//! built-in defaults, then a config file, then `BACKEND_SMOKE_*`
//! environment variables, then command-line flags.

mod env;
mod env_file;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use env_file::EnvFileError;
pub use file::ConfigFile;

use env_file::{normalize_base_url, resolve_base_url};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{DEFAULT_CLIENT_NAME, DEFAULT_CORS_ORIGIN, DEFAULT_TIMEOUT_SECS};

/// Env file the frontend keeps its backend address in
pub const DEFAULT_ENV_FILE: &str = "frontend/.env";

/// Variable holding the backend address
pub const DEFAULT_URL_KEY: &str = "EXPO_PUBLIC_BACKEND_URL";

/// Path prefix every API route lives under
pub const DEFAULT_API_SUFFIX: &str = "/api";

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Env file containing the backend URL
    pub env_file: String,

    /// Key looked up in the env file
    pub url_key: String,

    /// Suffix appended to the URL read from the env file
    pub api_suffix: String,

    /// Explicit base URL; bypasses the env file when set
    pub base_url: Option<String>,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Client name used for created status checks
    pub client_name: String,

    /// Run the CORS header check
    pub cors: bool,

    /// Origin sent by the CORS check
    pub cors_origin: String,

    /// Default output format
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env_file: DEFAULT_ENV_FILE.to_string(),
            url_key: DEFAULT_URL_KEY.to_string(),
            api_suffix: DEFAULT_API_SUFFIX.to_string(),
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            cors: false,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            format: "table".to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve the API base URL, either explicit or read from the env file
    pub fn resolve_base_url(&self) -> Result<String, EnvFileError> {
        match &self.base_url {
            Some(url) => normalize_base_url(url),
            None => resolve_base_url(Path::new(&self.env_file), &self.url_key, &self.api_suffix),
        }
    }
}
