//! Test result models for the status-check API
//!
//! Defines check cases, results, and status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Checks the runner knows how to execute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCase {
    RootEndpoint,
    CreateStatusCheck,
    GetStatusChecks,
    Integration,
    CorsHeaders,
}

impl TestCase {
    /// Position in the canonical run order (1-5)
    pub fn number(&self) -> u8 {
        match self {
            TestCase::RootEndpoint => 1,
            TestCase::CreateStatusCheck => 2,
            TestCase::GetStatusChecks => 3,
            TestCase::Integration => 4,
            TestCase::CorsHeaders => 5,
        }
    }

    /// Stable key used in reports and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            TestCase::RootEndpoint => "root_endpoint",
            TestCase::CreateStatusCheck => "create_status_check",
            TestCase::GetStatusChecks => "get_status_checks",
            TestCase::Integration => "integration",
            TestCase::CorsHeaders => "cors_headers",
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            TestCase::RootEndpoint => "Root Endpoint",
            TestCase::CreateStatusCheck => "Create Status Check",
            TestCase::GetStatusChecks => "Get Status Checks",
            TestCase::Integration => "Write/Read Integration",
            TestCase::CorsHeaders => "CORS Headers",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TestCase::RootEndpoint => "GET / returns {\"message\": \"Hello World\"}",
            TestCase::CreateStatusCheck => "POST /status echoes client_name with id and timestamp",
            TestCase::GetStatusChecks => "GET /status returns an array of status checks",
            TestCase::Integration => "A created status check is readable through GET /status",
            TestCase::CorsHeaders => "GET / with an Origin header allows that origin",
        }
    }

    /// Every known check, in run order
    pub fn all() -> Vec<TestCase> {
        vec![
            TestCase::RootEndpoint,
            TestCase::CreateStatusCheck,
            TestCase::GetStatusChecks,
            TestCase::Integration,
            TestCase::CorsHeaders,
        ]
    }

    /// Checks executed when none are selected explicitly
    pub fn default_suite(include_cors: bool) -> Vec<TestCase> {
        Self::all()
            .into_iter()
            .filter(|tc| include_cors || *tc != TestCase::CorsHeaders)
            .collect()
    }

    /// Parse from a key, a display-style name, or a number
    pub fn from_str(s: &str) -> Option<TestCase> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        if let Ok(n) = normalized.parse::<u8>() {
            return Self::from_number(n);
        }
        match normalized.as_str() {
            "root" | "root_endpoint" => Some(TestCase::RootEndpoint),
            "create" | "create_status_check" => Some(TestCase::CreateStatusCheck),
            "list" | "get_status_checks" => Some(TestCase::GetStatusChecks),
            "integration" => Some(TestCase::Integration),
            "cors" | "cors_headers" => Some(TestCase::CorsHeaders),
            _ => None,
        }
    }

    pub fn from_number(n: u8) -> Option<TestCase> {
        Self::all().into_iter().find(|tc| tc.number() == n)
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check {}: {}", self.number(), self.name())
    }
}

/// Test execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
            TestStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single check
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub test_case: TestCase,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl TestResult {
    pub fn pass(test_case: TestCase, duration_ms: u64) -> Self {
        Self {
            test_case,
            status: TestStatus::Pass,
            duration_ms,
            message: None,
            details: None,
        }
    }

    pub fn fail(test_case: TestCase, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            test_case,
            status: TestStatus::Fail,
            duration_ms,
            message: Some(message.into()),
            details: None,
        }
    }

    /// Transport failures and unexpected errors
    pub fn error(test_case: TestCase, duration_ms: u64, error: impl Into<String>) -> Self {
        Self {
            test_case,
            status: TestStatus::Error,
            duration_ms,
            message: Some(error.into()),
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.test_case,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Outcome of one full run against a backend
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl RunSummary {
    pub fn new(
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<TestResult>,
    ) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();
        let passed = count(TestStatus::Pass);
        let failed = count(TestStatus::Fail);
        let errors = count(TestStatus::Error);
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            base_url: base_url.into(),
            started_at,
            total: results.len(),
            passed,
            failed,
            errors,
            total_duration_ms,
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Process exit code: 0 only when every tracked check passed
    pub fn exit_code(&self) -> u8 {
        if self.is_all_passed() {
            0
        } else {
            1
        }
    }

    /// Ordered `key -> passed` view of the results
    pub fn outcomes(&self) -> Vec<(&'static str, bool)> {
        self.results
            .iter()
            .map(|r| (r.test_case.key(), r.passed()))
            .collect()
    }

    #[cfg(test)]
    pub fn result(&self, test_case: TestCase) -> Option<&TestResult> {
        self.results.iter().find(|r| r.test_case == test_case)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Backend: {}", self.base_url)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Error: {}",
            self.total, self.passed, self.failed, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}
