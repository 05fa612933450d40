//! Test execution runner
//!
//! Runs the configured checks one after another against a single backend.

use anyhow::Result;
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::checks::{
    CorsHeadersTest, CreateOutcome, CreateStatusCheckTest, IntegrationTest, ListOutcome,
    ListStatusChecksTest, RootEndpointTest,
};
use crate::http::HttpClient;
use crate::models::{RunSummary, TestCase, TestConfig, TestResult};

/// Sequential runner for the status-check API
pub struct TestRunner {
    config: TestConfig,
    client: HttpClient,
}

impl TestRunner {
    /// Create a new test runner
    pub fn new(config: TestConfig) -> Result<Self> {
        let client = HttpClient::with_timeout(config.timeout_secs)?
            .base_url(&config.base_url)
            .default_header(
                "User-Agent",
                concat!("backend-smoke/", env!("CARGO_PKG_VERSION")),
            )?;
        Ok(Self { config, client })
    }

    /// `GET /` greets with the expected message
    pub async fn check_root(&self) -> TestResult {
        let test_case = TestCase::RootEndpoint;
        catch(test_case, RootEndpointTest::new().run(&self.client).await)
    }

    /// `POST /status` with `client_name`; the outcome carries the created id
    pub async fn create_status_check(&self, client_name: &str) -> CreateOutcome {
        let test_case = TestCase::CreateStatusCheck;
        match CreateStatusCheckTest::new(client_name)
            .run(&self.client)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => CreateOutcome {
                result: unexpected(test_case, e),
                created: None,
            },
        }
    }

    /// `GET /status` returns a well-formed list
    pub async fn list_status_checks(&self) -> ListOutcome {
        let test_case = TestCase::GetStatusChecks;
        match ListStatusChecksTest::new().run(&self.client).await {
            Ok(outcome) => outcome,
            Err(e) => ListOutcome {
                result: unexpected(test_case, e),
                ids: Vec::new(),
            },
        }
    }

    /// Create followed by list
    pub async fn integration_check(&self) -> TestResult {
        let test_case = TestCase::Integration;
        catch(
            test_case,
            IntegrationTest::new(&self.config.client_name)
                .run(&self.client)
                .await,
        )
    }

    /// Response to a request carrying an `Origin` header allows that origin
    pub async fn check_cors(&self) -> TestResult {
        let test_case = TestCase::CorsHeaders;
        catch(
            test_case,
            CorsHeadersTest::new(&self.config.cors_origin)
                .run(&self.client)
                .await,
        )
    }

    /// Run a single check
    pub async fn run_test(&self, test_case: TestCase) -> TestResult {
        match test_case {
            TestCase::RootEndpoint => self.check_root().await,
            TestCase::CreateStatusCheck => {
                self.create_status_check(&self.config.client_name)
                    .await
                    .result
            }
            TestCase::GetStatusChecks => self.list_status_checks().await.result,
            TestCase::Integration => self.integration_check().await,
            TestCase::CorsHeaders => self.check_cors().await,
        }
    }

    /// Run every configured check in order
    pub async fn run_all(&self) -> RunSummary {
        info!(
            "Testing backend at {} (timeout {}s)",
            self.config.base_url,
            self.client.timeout_secs()
        );

        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::with_capacity(self.config.checks.len());

        for &test_case in &self.config.checks {
            let result = self.run_test(test_case).await;
            info!("  {}", result);
            results.push(result);
        }

        let summary = RunSummary::new(&self.config.base_url, started_at, results);

        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );
        debug!("Outcomes: {:?}", summary.outcomes());

        summary
    }
}

fn catch(test_case: TestCase, result: Result<TestResult>) -> TestResult {
    result.unwrap_or_else(|e| unexpected(test_case, e))
}

fn unexpected(test_case: TestCase, e: anyhow::Error) -> TestResult {
    error!("{} failed with error: {:#}", test_case, e);
    TestResult::error(test_case, 0, format!("! {e:#}"))
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::models::TestStatus;
    use httpmock::prelude::*;
    use serde_json::json;

    fn record(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "client_name": "Acme Corporation",
            "timestamp": "2024-05-01T12:00:00Z"
        })
    }

    async fn healthy_backend() -> MockServer {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/");
                then.status(200)
                    .header("Access-Control-Allow-Origin", "*")
                    .json_body(json!({"message": "Hello World"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/status")
                    .json_body(json!({"client_name": "Acme Corporation"}));
                then.status(200).json_body(record("created"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/status");
                then.status(200).json_body(json!([record("created")]));
            })
            .await;
        server
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_once() {
        let server = MockServer::start_async().await;
        let slow = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/");
                then.status(200)
                    .delay(std::time::Duration::from_secs(3))
                    .json_body(json!({"message": "Hello World"}));
            })
            .await;

        let config = TestConfig::new(server.url("/api")).with_timeout(1);
        let runner = TestRunner::new(config).unwrap();

        let result = runner.check_root().await;
        assert_eq!(result.status, TestStatus::Error);
        assert!(result.message.unwrap().contains("Timeout after 1 seconds"));
        slow.assert_hits_async(1).await;
    }

    #[test]
    fn test_runner_creation() {
        let runner = TestRunner::new(TestConfig::new("http://localhost:8001/api"));
        assert!(runner.is_ok());
    }

    #[tokio::test]
    async fn test_run_all_healthy_backend_exits_zero() {
        let server = healthy_backend().await;
        let runner = TestRunner::new(TestConfig::new(server.url("/api"))).unwrap();

        let summary = runner.run_all().await;

        assert_eq!(summary.total, 4);
        assert_eq!(
            summary.outcomes(),
            vec![
                ("root_endpoint", true),
                ("create_status_check", true),
                ("get_status_checks", true),
                ("integration", true),
            ]
        );
        assert_eq!(summary.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_run_all_with_cors() {
        let server = healthy_backend().await;
        let config = TestConfig::new(server.url("/api")).with_checks(TestCase::default_suite(true));
        let runner = TestRunner::new(config).unwrap();

        let summary = runner.run_all().await;
        assert_eq!(summary.total, 5);
        assert!(summary.is_all_passed());
    }

    #[tokio::test]
    async fn test_wrong_greeting_fails_run_but_continues() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/");
                then.status(200).json_body(json!({"message": "Goodbye"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/status");
                then.status(200).json_body(record("created"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/status");
                then.status(200).json_body(json!([]));
            })
            .await;

        let runner = TestRunner::new(TestConfig::new(server.url("/api"))).unwrap();
        let summary = runner.run_all().await;

        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 3);
        assert_eq!(
            summary.result(TestCase::RootEndpoint).unwrap().status,
            TestStatus::Fail
        );
        assert_eq!(summary.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_backend_records_errors() {
        let runner = TestRunner::new(
            TestConfig::new("http://127.0.0.1:9/api").with_timeout(2),
        )
        .unwrap();

        let summary = runner.run_all().await;

        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.errors, 4);
        assert_eq!(summary.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_create_status_check_returns_id() {
        let server = healthy_backend().await;
        let runner = TestRunner::new(TestConfig::new(server.url("/api"))).unwrap();

        let outcome = runner.create_status_check("Acme Corporation").await;
        assert!(outcome.result.passed());
        assert_eq!(outcome.id(), Some("created"));
    }
}
