//! Output formatters for test results
//!
//! Provides table, JSON, and one-line summary output formats.

use anyhow::{Context, Result};
use std::io::Write;

use crate::models::{RunSummary, TestResult, TestStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single test result
    pub fn format_result(&self, result: &TestResult) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json => serde_json::to_string(result)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result)?,
            OutputFormat::Summary => self.format_result_summary(result),
        })
    }

    fn status_label(&self, status: TestStatus) -> &'static str {
        if self.colorize {
            match status {
                TestStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                TestStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                TestStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match status {
                TestStatus::Pass => "✓ PASS",
                TestStatus::Fail => "✗ FAIL",
                TestStatus::Error => "! ERROR",
            }
        }
    }

    fn format_result_table(&self, result: &TestResult) -> String {
        format!(
            "{:2}. {:24} {} [{:>6}ms]",
            result.test_case.number(),
            result.test_case.name(),
            self.status_label(result.status),
            result.duration_ms
        )
    }

    fn format_result_summary(&self, result: &TestResult) -> String {
        format!(
            "{} {} ({}ms)",
            result.status.symbol(),
            result.test_case.name(),
            result.duration_ms
        )
    }

    /// Format a whole run
    pub fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary)?,
            OutputFormat::Summary => self.format_summary_brief(summary),
        })
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        // Header
        output.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
        output.push_str("║  TEST SUMMARY                                                ║\n");
        output.push_str(&format!("║  {:58}  ║\n", summary.base_url));
        output.push_str(&format!(
            "║  {:58}  ║\n",
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
        ));
        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        // Results, with the reason under anything that did not pass
        for result in &summary.results {
            output.push_str(&format!("║  {}\n", self.format_result_table(result)));
            if !result.passed() {
                if let Some(message) = &result.message {
                    for line in message.lines() {
                        output.push_str(&format!("║        {line}\n"));
                    }
                }
            }
        }

        // Footer
        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_count = summary.failed + summary.errors;
        let fail_str = if self.colorize && fail_count > 0 {
            format!("\x1b[31m{fail_count}\x1b[0m")
        } else {
            fail_count.to_string()
        };

        output.push_str(&format!(
            "║  Overall: {}/{} tests passed | Failed: {} | Duration: {}ms\n",
            pass_str, summary.total, fail_str, summary.total_duration_ms
        ));
        let verdict = if summary.is_all_passed() {
            "All backend tests passed!"
        } else {
            "Some backend tests failed"
        };
        output.push_str(&format!("║  {verdict}\n"));
        output.push_str("╚══════════════════════════════════════════════════════════════╝\n");

        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%) in {}ms",
            summary.base_url,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Write results to a file
pub fn write_results_to_file(path: &str, summary: &RunSummary, format: OutputFormat) -> Result<()> {
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_summary(summary)?;

    let mut file =
        std::fs::File::create(path).with_context(|| format!("Failed to create {path}"))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {path}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestCase;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_summary() -> RunSummary {
        RunSummary::new(
            "http://localhost:8001/api",
            Utc::now(),
            vec![
                TestResult::pass(TestCase::RootEndpoint, 12),
                TestResult::fail(
                    TestCase::CreateStatusCheck,
                    30,
                    "✗ Expected status 200 but got 500",
                ),
            ],
        )
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_formatter_creation() {
        let formatter = ResultFormatter::new(OutputFormat::Json).no_color();
        assert_eq!(formatter.format, OutputFormat::Json);
        assert!(!formatter.colorize);
    }

    #[test]
    fn test_format_result() {
        let result = TestResult::pass(TestCase::RootEndpoint, 100);
        let formatter = ResultFormatter::new(OutputFormat::Summary);
        let output = formatter.format_result(&result).unwrap();
        assert_eq!(output, "✓ Root Endpoint (100ms)");
    }

    #[test]
    fn test_table_summary() {
        let output = ResultFormatter::default()
            .no_color()
            .format_summary(&sample_summary())
            .unwrap();

        assert!(output.contains("Root Endpoint"));
        assert!(output.contains("✓ PASS"));
        assert!(output.contains("✗ FAIL"));
        assert!(output.contains("got 500"));
        assert!(output.contains("Overall: 1/2 tests passed"));
        assert!(output.contains("Some backend tests failed"));
    }

    #[test]
    fn test_json_summary() {
        let output = ResultFormatter::new(OutputFormat::Json)
            .format_summary(&sample_summary())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["passed"], 1);
        assert_eq!(value["results"][0]["test_case"], "root_endpoint");
        assert_eq!(value["results"][1]["status"], "fail");
    }

    #[test]
    fn test_write_results_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let path = path.to_str().unwrap();

        write_results_to_file(path, &sample_summary(), OutputFormat::Table).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("TEST SUMMARY"));
        assert!(!content.contains("\x1b["));
    }
}
