//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::AppConfig;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./backend-smoke.yaml",
    "./backend-smoke.yml",
    "./.backend-smoke.yaml",
    "~/.config/backend-smoke/config.yaml",
];

/// Full configuration file structure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// Application settings
    #[serde(default)]
    pub app: AppConfig,

    /// Named backends, selected with `--environment`
    #[serde(default)]
    pub environments: Vec<EnvironmentConfig>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            app: AppConfig::default(),
            environments: Vec::new(),
        }
    }
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::find() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        let app = &self.app;
        if app.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if app.url_key.trim().is_empty() {
            anyhow::bail!("url_key must not be empty");
        }
        if !app.api_suffix.is_empty() && !app.api_suffix.starts_with('/') {
            anyhow::bail!("api_suffix must start with '/': {}", app.api_suffix);
        }
        if app.client_name.trim().is_empty() {
            anyhow::bail!("client_name must not be empty");
        }

        for (i, env) in self.environments.iter().enumerate() {
            if self.environments[..i].iter().any(|e| e.name == env.name) {
                anyhow::bail!("Duplicate environment: {}", env.name);
            }
            if env.base_url.is_none() && env.env_file.is_none() {
                anyhow::bail!(
                    "Environment '{}' needs either base_url or env_file",
                    env.name
                );
            }
        }

        Ok(())
    }

    /// Generate example configuration
    pub fn example() -> Self {
        Self {
            version: "1.0".to_string(),
            app: AppConfig::default(),
            environments: vec![
                EnvironmentConfig::new("local").with_base_url("http://localhost:8001/api"),
                EnvironmentConfig::new("preview").with_env_file("frontend/.env"),
            ],
        }
    }

    /// Get environment by name
    pub fn environment(&self, name: &str) -> Option<&EnvironmentConfig> {
        self.environments.iter().find(|e| e.name == name)
    }

    /// App settings with the named environment applied on top
    pub fn settings(&self, environment: Option<&str>) -> Result<AppConfig> {
        let mut app = self.app.clone();
        if let Some(name) = environment {
            let env = self
                .environment(name)
                .with_context(|| format!("Unknown environment: {name}"))?;
            env.apply_to(&mut app);
        }
        Ok(app)
    }
}

/// Environment-specific configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Environment name (e.g., "local", "preview")
    pub name: String,
    /// Explicit API base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Env file to read the backend URL from
    #[serde(default)]
    pub env_file: Option<String>,
}

impl EnvironmentConfig {
    /// Create new environment config
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: None,
            env_file: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_env_file(mut self, env_file: impl Into<String>) -> Self {
        self.env_file = Some(env_file.into());
        self
    }

    fn apply_to(&self, app: &mut AppConfig) {
        if let Some(env_file) = &self.env_file {
            app.env_file = env_file.clone();
            app.base_url = None;
        }
        if let Some(base_url) = &self.base_url {
            app.base_url = Some(base_url.clone());
        }
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
