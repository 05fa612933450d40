//! Check 1: API root greeting

use anyhow::Result;
use tracing::{debug, info};

use super::{decode_ok, request_failed};
use crate::http::HttpClient;
use crate::models::{RootMessage, TestCase, TestResult, EXPECTED_GREETING};
use crate::utils::Timer;

#[derive(Clone, Debug)]
pub struct RootEndpointTest {
    pub path: String,
    pub expected_message: String,
}

impl RootEndpointTest {
    pub fn new() -> Self {
        Self {
            path: "/".to_string(),
            expected_message: EXPECTED_GREETING.to_string(),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<TestResult> {
        info!("Running Root Endpoint Test");
        let test_case = TestCase::RootEndpoint;
        let timer = Timer::start(test_case.key());

        let response = match client.get(&self.path).await {
            Ok(resp) => resp,
            Err(e) => return Ok(request_failed(test_case, timer.elapsed_ms(), &e)),
        };
        debug!("Status Code: {}", response.status_code);
        debug!("Response: {}", response.body_preview());

        let body: RootMessage = match decode_ok(test_case, timer.elapsed_ms(), &response) {
            Ok(body) => body,
            Err(result) => return Ok(result),
        };

        let duration_ms = timer.stop().as_millis() as u64;
        if body.message == self.expected_message {
            Ok(TestResult::pass(test_case, duration_ms)
                .with_message(format!("✓ Root endpoint says \"{}\"", body.message)))
        } else {
            Ok(TestResult::fail(
                test_case,
                duration_ms,
                format!(
                    "✗ Expected message \"{}\" but got \"{}\"",
                    self.expected_message, body.message
                ),
            ))
        }
    }
}

impl Default for RootEndpointTest {
    fn default() -> Self {
        Self::new()
    }
}
