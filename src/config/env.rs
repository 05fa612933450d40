//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

use super::AppConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "BACKEND_SMOKE";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Env file path from BACKEND_SMOKE_ENV_FILE
    pub env_file: Option<String>,
    /// URL key from BACKEND_SMOKE_URL_KEY
    pub url_key: Option<String>,
    /// Explicit base URL from BACKEND_SMOKE_BASE_URL
    pub base_url: Option<String>,
    /// Timeout from BACKEND_SMOKE_TIMEOUT
    pub timeout: Option<u64>,
    /// Client name from BACKEND_SMOKE_CLIENT_NAME
    pub client_name: Option<String>,
    /// CORS check toggle from BACKEND_SMOKE_CORS
    pub cors: Option<bool>,
    /// Output format from BACKEND_SMOKE_FORMAT
    pub format: Option<String>,
    /// Config file from BACKEND_SMOKE_CONFIG
    pub config_file: Option<String>,
    /// Environment name from BACKEND_SMOKE_ENV
    pub environment: Option<String>,
    /// Verbose from BACKEND_SMOKE_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            env_file: get_env("ENV_FILE"),
            url_key: get_env("URL_KEY"),
            base_url: get_env("BASE_URL"),
            timeout: get_env_parse("TIMEOUT"),
            client_name: get_env("CLIENT_NAME"),
            cors: get_env_bool("CORS"),
            format: get_env("FORMAT"),
            config_file: get_env("CONFIG"),
            environment: get_env("ENV"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.env_file.is_some()
            || self.url_key.is_some()
            || self.base_url.is_some()
            || self.timeout.is_some()
            || self.client_name.is_some()
            || self.cors.is_some()
            || self.format.is_some()
            || self.config_file.is_some()
            || self.environment.is_some()
            || self.verbose.is_some()
    }

    /// Overlay the values that are set onto `config`
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(env_file) = &self.env_file {
            config.env_file = env_file.clone();
            config.base_url = None;
        }
        if let Some(url_key) = &self.url_key {
            config.url_key = url_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(client_name) = &self.client_name {
            config.client_name = client_name.clone();
        }
        if let Some(cors) = self.cors {
            config.cors = cors;
        }
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_ENV_FILE:    {:?}", ENV_PREFIX, self.env_file);
        println!("  {}_URL_KEY:     {:?}", ENV_PREFIX, self.url_key);
        println!("  {}_BASE_URL:    {:?}", ENV_PREFIX, self.base_url);
        println!("  {}_TIMEOUT:     {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_CLIENT_NAME: {:?}", ENV_PREFIX, self.client_name);
        println!("  {}_CORS:        {:?}", ENV_PREFIX, self.cors);
        println!("  {}_FORMAT:      {:?}", ENV_PREFIX, self.format);
        println!("  {}_CONFIG:      {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_ENV:         {:?}", ENV_PREFIX, self.environment);
        println!("  {}_VERBOSE:     {:?}", ENV_PREFIX, self.verbose);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Print all BACKEND_SMOKE environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_ENV_FILE     Env file holding the backend URL");
    println!("  {ENV_PREFIX}_URL_KEY      Key of the backend URL in the env file");
    println!("  {ENV_PREFIX}_BASE_URL     Explicit API base URL (skips the env file)");
    println!("  {ENV_PREFIX}_TIMEOUT      Request timeout in seconds");
    println!("  {ENV_PREFIX}_CLIENT_NAME  Client name for created status checks");
    println!("  {ENV_PREFIX}_CORS         Run the CORS header check (true/false)");
    println!("  {ENV_PREFIX}_FORMAT       Output format (table, json, json-pretty, summary)");
    println!("  {ENV_PREFIX}_CONFIG       Path to configuration file");
    println!("  {ENV_PREFIX}_ENV          Named environment from the configuration file");
    println!("  {ENV_PREFIX}_VERBOSE      Enable verbose output (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_BASE_URL=http://localhost:8001/api");
    println!("  backend-smoke run");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sets variables for the lifetime of the guard, restoring previous values on drop
    struct EnvGuard {
        previous: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&str, &str)]) -> Self {
            let previous = vars
                .iter()
                .map(|(name, value)| {
                    let key = format!("{ENV_PREFIX}_{name}");
                    let old = env::var(&key).ok();
                    env::set_var(&key, value);
                    (key, old)
                })
                .collect();
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.previous {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.base_url.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_load() {
        let _guard = EnvGuard::set(&[("URL_KEY", "REACT_APP_BACKEND_URL"), ("TIMEOUT", "25")]);

        let config = EnvConfig::load();
        assert_eq!(config.url_key, Some("REACT_APP_BACKEND_URL".to_string()));
        assert_eq!(config.timeout, Some(25));
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = EnvGuard::set(&[("CORS", "yes")]);

        let config = EnvConfig::load();
        assert_eq!(config.cors, Some(true));
    }

    #[test]
    fn test_apply_to_overrides_only_set_values() {
        let env = EnvConfig {
            base_url: Some("http://localhost:8001/api".to_string()),
            timeout: Some(3),
            ..Default::default()
        };
        let mut config = AppConfig::default();
        env.apply_to(&mut config);

        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8001/api"));
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.client_name, "Acme Corporation");
    }

    #[test]
    fn test_env_file_replaces_configured_base_url() {
        let mut config = AppConfig {
            base_url: Some("http://from-config.invalid/api".to_string()),
            ..Default::default()
        };
        let env = EnvConfig {
            env_file: Some("/app/frontend/.env".to_string()),
            ..Default::default()
        };
        env.apply_to(&mut config);

        assert_eq!(config.env_file, "/app/frontend/.env");
        assert!(config.base_url.is_none());

        // An explicit base URL in the same layer still wins
        let env = EnvConfig {
            env_file: Some("/app/frontend/.env".to_string()),
            base_url: Some("http://localhost:8001/api".to_string()),
            ..Default::default()
        };
        env.apply_to(&mut config);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8001/api"));
    }
}
