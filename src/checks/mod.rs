//! Status-check API test implementations
//!
//! ## Checks
//!
//! 1. Root Endpoint - `GET /` greets with "Hello World"
//! 2. Create Status Check - `POST /status` echoes the client name
//! 3. Get Status Checks - `GET /status` lists records
//! 4. Write/Read Integration - create followed by list
//! 5. CORS Headers - opt-in, `GET /` honours the request origin
//!
//! Every check turns transport failures and unexpected bodies into a
//! non-passing [`TestResult`]; only setup problems surface as `Err`.

mod cors;
mod root;
mod status;

pub use cors::CorsHeadersTest;
pub use root::RootEndpointTest;
pub use status::{
    CreateOutcome, CreateStatusCheckTest, IntegrationTest, ListOutcome, ListStatusChecksTest,
};

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::http::{HttpError, HttpResponse};
use crate::models::{TestCase, TestResult};

/// Result for a request that never produced a response
fn request_failed(test_case: TestCase, duration_ms: u64, error: &HttpError) -> TestResult {
    warn!("{} request failed: {}", test_case.name(), error);
    TestResult::error(test_case, duration_ms, format!("✗ Request failed: {error}"))
}

/// Require status 200 and a body that deserializes into `T`
fn decode_ok<T: DeserializeOwned>(
    test_case: TestCase,
    duration_ms: u64,
    response: &HttpResponse,
) -> Result<T, TestResult> {
    if !response.is_ok() {
        return Err(TestResult::fail(
            test_case,
            duration_ms,
            format!(
                "✗ Expected status 200 but got {}: {}",
                response.status_code,
                response.body_preview()
            ),
        ));
    }

    response.json::<T>().map_err(|e| {
        TestResult::fail(
            test_case,
            duration_ms,
            format!(
                "✗ Unexpected response body ({e}): {}",
                response.body_preview()
            ),
        )
    })
}
