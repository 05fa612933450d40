//! Data models for status-check API testing
//!
//! This module contains all data structures used throughout the application.

mod status_check;
mod target;
mod test_result;

pub use status_check::{RootMessage, StatusCheck, StatusCheckCreate, EXPECTED_GREETING};
pub use target::{TestConfig, DEFAULT_CLIENT_NAME, DEFAULT_CORS_ORIGIN, DEFAULT_TIMEOUT_SECS};
pub use test_result::{RunSummary, TestCase, TestResult, TestStatus};
