//! Checks 2-4: status-check creation, listing and write/read integration

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{decode_ok, request_failed};
use crate::http::HttpClient;
use crate::models::{StatusCheck, StatusCheckCreate, TestCase, TestResult, TestStatus};
use crate::utils::Timer;

const STATUS_PATH: &str = "/status";

/// Result of a create call plus the record the backend returned
#[derive(Clone, Debug)]
pub struct CreateOutcome {
    pub result: TestResult,
    pub created: Option<StatusCheck>,
}

impl CreateOutcome {
    /// Identifier of the created record, present only on success
    pub fn id(&self) -> Option<&str> {
        self.created.as_ref().map(|c| c.id.as_str())
    }
}

/// Result of a list call plus the ids seen in the response
#[derive(Clone, Debug)]
pub struct ListOutcome {
    pub result: TestResult,
    pub ids: Vec<String>,
}

/// Check 2: `POST /status` echoes the client name with an id and timestamp
#[derive(Clone, Debug)]
pub struct CreateStatusCheckTest {
    pub client_name: String,
}

impl CreateStatusCheckTest {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<CreateOutcome> {
        info!("Running Create Status Check Test");
        let test_case = TestCase::CreateStatusCheck;
        let timer = Timer::start(test_case.key());
        let failed = |result| CreateOutcome {
            result,
            created: None,
        };

        let request = StatusCheckCreate::new(&self.client_name);
        let response = match client.post_json(STATUS_PATH, &request).await {
            Ok(resp) => resp,
            Err(e) => return Ok(failed(request_failed(test_case, timer.elapsed_ms(), &e))),
        };
        debug!("Status Code: {}", response.status_code);
        debug!("Response: {}", response.body_preview());

        let created: StatusCheck = match decode_ok(test_case, timer.elapsed_ms(), &response) {
            Ok(created) => created,
            Err(result) => return Ok(failed(result)),
        };

        let duration_ms = timer.stop().as_millis() as u64;
        if created.client_name != self.client_name {
            return Ok(failed(TestResult::fail(
                test_case,
                duration_ms,
                format!(
                    "✗ Client name mismatch: sent \"{}\", got \"{}\"",
                    self.client_name, created.client_name
                ),
            )));
        }

        let result = TestResult::pass(test_case, duration_ms)
            .with_message(format!("✓ Created status check {}", created.id))
            .with_details(json!({ "id": created.id }));

        Ok(CreateOutcome {
            result,
            created: Some(created),
        })
    }
}

/// Check 3: `GET /status` returns an array whose records have the expected shape
#[derive(Clone, Debug, Default)]
pub struct ListStatusChecksTest;

impl ListStatusChecksTest {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self, client: &HttpClient) -> Result<ListOutcome> {
        info!("Running Get Status Checks Test");
        let test_case = TestCase::GetStatusChecks;
        let timer = Timer::start(test_case.key());
        let failed = |result| ListOutcome {
            result,
            ids: Vec::new(),
        };

        let response = match client.get(STATUS_PATH).await {
            Ok(resp) => resp,
            Err(e) => return Ok(failed(request_failed(test_case, timer.elapsed_ms(), &e))),
        };
        debug!("Status Code: {}", response.status_code);

        // Decoding as an array first separates "not a list" from "bad record".
        let records: Vec<Value> = match decode_ok(test_case, timer.elapsed_ms(), &response) {
            Ok(records) => records,
            Err(result) => return Ok(failed(result)),
        };
        debug!("Response: Found {} status checks", records.len());

        let duration_ms = timer.stop().as_millis() as u64;

        let Some(first) = records.first() else {
            return Ok(ListOutcome {
                result: TestResult::pass(test_case, duration_ms)
                    .with_message("✓ Status check list is empty"),
                ids: Vec::new(),
            });
        };

        if let Err(e) = serde_json::from_value::<StatusCheck>(first.clone()) {
            return Ok(failed(TestResult::fail(
                test_case,
                duration_ms,
                format!("✗ Status check records have an unexpected shape: {e}"),
            )));
        }

        let ids = records
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        Ok(ListOutcome {
            result: TestResult::pass(test_case, duration_ms)
                .with_message(format!("✓ Found {} status checks", records.len()))
                .with_details(json!({ "count": records.len() })),
            ids,
        })
    }
}

/// Check 4: a created status check can be read back through the list endpoint
#[derive(Clone, Debug)]
pub struct IntegrationTest {
    pub client_name: String,
}

impl IntegrationTest {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<TestResult> {
        info!("Running Write/Read Integration Test");
        let test_case = TestCase::Integration;

        let created = CreateStatusCheckTest::new(&self.client_name)
            .run(client)
            .await?;
        if !created.result.passed() {
            warn!("Integration failed - cannot create status check");
            return Ok(retag(
                test_case,
                &created.result,
                created.result.duration_ms,
                "cannot create status check",
            ));
        }

        let listed = ListStatusChecksTest::new().run(client).await?;
        let duration_ms = created.result.duration_ms + listed.result.duration_ms;
        if !listed.result.passed() {
            warn!("Integration failed - cannot retrieve status checks");
            return Ok(retag(
                test_case,
                &listed.result,
                duration_ms,
                "cannot retrieve status checks",
            ));
        }

        let created_id = created.id().unwrap_or_default().to_string();
        let visible = listed.ids.iter().any(|id| *id == created_id);
        if !visible {
            debug!("Created status check {} not in list response", created_id);
        }

        Ok(TestResult::pass(test_case, duration_ms)
            .with_message(format!(
                "✓ Created {} and listed {} status checks",
                created_id,
                listed.ids.len()
            ))
            .with_details(json!({
                "created_id": created_id,
                "visible_in_list": visible,
            })))
    }
}

/// Report a failed step under the integration check
fn retag(test_case: TestCase, step: &TestResult, duration_ms: u64, what: &str) -> TestResult {
    let reason = step.message.as_deref().unwrap_or("no details");
    let message = format!("✗ Integration failed - {what}: {reason}");
    match step.status {
        TestStatus::Error => TestResult::error(test_case, duration_ms, message),
        _ => TestResult::fail(test_case, duration_ms, message),
    }
}
