//! Target backend models
//!
//! Describes the API under test and how a run against it is configured.

use serde::{Deserialize, Serialize};

use super::TestCase;

/// Client name used for records created during a run
pub const DEFAULT_CLIENT_NAME: &str = "Acme Corporation";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Origin sent by the CORS check
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Run configuration for a single backend
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestConfig {
    /// Base URL including the API prefix, without a trailing slash
    pub base_url: String,
    pub client_name: String,
    pub timeout_secs: u64,
    pub cors_origin: String,
    pub checks: Vec<TestCase>,
}

impl TestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            checks: TestCase::default_suite(false),
        }
    }

    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }

    /// Replace the checks to run; they are always executed in canonical order
    pub fn with_checks(mut self, checks: impl IntoIterator<Item = TestCase>) -> Self {
        let mut checks: Vec<TestCase> = checks.into_iter().collect();
        checks.sort_by_key(|tc| tc.number());
        checks.dedup();
        self.checks = checks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TestConfig::new("http://localhost:8001/api/");
        assert_eq!(config.base_url, "http://localhost:8001/api");
        assert_eq!(config.client_name, "Acme Corporation");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.checks.len(), 4);
    }

    #[test]
    fn test_checks_are_ordered_and_deduplicated() {
        let config = TestConfig::new("http://localhost/api").with_checks([
            TestCase::Integration,
            TestCase::RootEndpoint,
            TestCase::Integration,
        ]);
        assert_eq!(
            config.checks,
            vec![TestCase::RootEndpoint, TestCase::Integration]
        );
    }
}
