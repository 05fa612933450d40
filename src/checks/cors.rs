//! Check 5: CORS headers on the API root

use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info};

use super::request_failed;
use crate::http::HttpClient;
use crate::models::{TestCase, TestResult, DEFAULT_CORS_ORIGIN};
use crate::utils::Timer;

const ALLOW_ORIGIN: &str = "access-control-allow-origin";

#[derive(Clone, Debug)]
pub struct CorsHeadersTest {
    pub path: String,
    pub origin: String,
}

impl CorsHeadersTest {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            path: "/".to_string(),
            origin: origin.into(),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<TestResult> {
        info!("Running CORS Headers Test");
        let test_case = TestCase::CorsHeaders;
        let timer = Timer::start(test_case.key());

        let headers = HashMap::from([("Origin".to_string(), self.origin.clone())]);
        let response = match client.get_with_headers(&self.path, headers).await {
            Ok(resp) => resp,
            Err(e) => return Ok(request_failed(test_case, timer.elapsed_ms(), &e)),
        };
        let duration_ms = timer.stop().as_millis() as u64;

        let allowed = response.get_header(ALLOW_ORIGIN);
        debug!("{}: {:?}", ALLOW_ORIGIN, allowed);

        match allowed {
            Some(value) if value == "*" || *value == self.origin => {
                Ok(TestResult::pass(test_case, duration_ms)
                    .with_message(format!("✓ Origin {} allowed ({value})", self.origin)))
            }
            Some(value) => Ok(TestResult::fail(
                test_case,
                duration_ms,
                format!("✗ Origin {} not allowed, server allows {value}", self.origin),
            )),
            None => Ok(TestResult::fail(
                test_case,
                duration_ms,
                format!(
                    "✗ No Access-Control-Allow-Origin header (status {})",
                    response.status_code
                ),
            )),
        }
    }
}

impl Default for CorsHeadersTest {
    fn default() -> Self {
        Self::new(DEFAULT_CORS_ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestStatus;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::with_timeout(10)
            .unwrap()
            .base_url(server.url("/api"))
    }

    #[tokio::test]
    async fn test_wildcard_origin_passes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/")
                    .header("origin", "http://localhost:3000");
                then.status(200)
                    .header("Access-Control-Allow-Origin", "*")
                    .body(r#"{"message":"Hello World"}"#);
            })
            .await;

        let result = CorsHeadersTest::default()
            .run(&client_for(&server))
            .await
            .unwrap();
        assert_eq!(result.status, TestStatus::Pass);
    }

    #[tokio::test]
    async fn test_other_origin_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/");
                then.status(200)
                    .header("Access-Control-Allow-Origin", "https://app.example.com");
            })
            .await;

        let result = CorsHeadersTest::new("http://localhost:3000")
            .run(&client_for(&server))
            .await
            .unwrap();
        assert_eq!(result.status, TestStatus::Fail);
    }

    #[tokio::test]
    async fn test_missing_header_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/");
                then.status(200).body(r#"{"message":"Hello World"}"#);
            })
            .await;

        let result = CorsHeadersTest::default()
            .run(&client_for(&server))
            .await
            .unwrap();
        assert_eq!(result.status, TestStatus::Fail);
    }
}
