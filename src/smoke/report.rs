// src/smoke/report.rs

use crate::constants::DEBUG_NOTES_HEADER;
use crate::data_set::RequestDataSet;
use crate::errors::{Error, Result};
use serde::Serialize;

/// The result of testing one data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TestOutcome {
    /// The response carried the expected status code.
    Passed,
    /// The data set was skipped; no request was dispatched.
    Skipped { message: String },
    /// The response status differed from the expected one.
    Failed {
        message: String,
        expected: u16,
        actual: u16,
    },
}

impl TestOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, TestOutcome::Passed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TestOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TestOutcome::Failed { .. })
    }

    /// The skip or failure message, `None` for a pass.
    pub fn message(&self) -> Option<&str> {
        match self {
            TestOutcome::Passed => None,
            TestOutcome::Skipped { message } | TestOutcome::Failed { message, .. } => {
                Some(message)
            }
        }
    }
}

/// One entry of a [`SmokeReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: TestOutcome,
}

/// Outcomes of a whole run, in data provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmokeReport {
    results: Vec<SmokeResult>,
}

impl SmokeReport {
    pub(crate) fn push(&mut self, name: String, outcome: TestOutcome) {
        self.results.push(SmokeResult { name, outcome });
    }

    pub fn results(&self) -> &[SmokeResult] {
        &self.results
    }

    pub fn passed(&self) -> impl Iterator<Item = &SmokeResult> {
        self.results.iter().filter(|r| r.outcome.is_passed())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SmokeResult> {
        self.results.iter().filter(|r| r.outcome.is_skipped())
    }

    pub fn failed(&self) -> impl Iterator<Item = &SmokeResult> {
        self.results.iter().filter(|r| r.outcome.is_failed())
    }

    /// Looks up the outcome of a data set by name.
    pub fn outcome(&self, name: &str) -> Option<&TestOutcome> {
        self.results
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.outcome)
    }

    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| !r.outcome.is_failed())
    }

    /// Turns a report with failures into `Error::SmokeFailures`.
    pub fn into_result(self) -> Result<Self> {
        let failures: Vec<&str> = self.failed().filter_map(|r| r.outcome.message()).collect();
        if failures.is_empty() {
            return Ok(self);
        }
        Err(Error::SmokeFailures {
            count: failures.len(),
            summary: failures.join("\n\n"),
        })
    }
}

pub(crate) fn skip_message(data_set: &RequestDataSet) -> String {
    with_debug_notes(
        format!("Test for route \"{}\" was skipped.", data_set.name()),
        data_set,
    )
}

pub(crate) fn failure_message(data_set: &RequestDataSet, actual: u16) -> String {
    with_debug_notes(
        format!(
            "Failed asserting that status code {} for route \"{}\" is identical to expected {}",
            actual,
            data_set.name(),
            data_set.expected_status_code()
        ),
        data_set,
    )
}

fn with_debug_notes(mut message: String, data_set: &RequestDataSet) -> String {
    let notes = data_set.debug_notes();
    if !notes.is_empty() {
        message.push('\n');
        message.push_str(DEBUG_NOTES_HEADER);
        for note in notes {
            message.push_str("\n  - ");
            message.push_str(note);
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_set::RequestDataSetConfig;

    #[test]
    fn test_skip_message_without_notes() {
        let data_set = RequestDataSet::new("homepage");
        assert_eq!(skip_message(&data_set), "Test for route \"homepage\" was skipped.");
    }

    #[test]
    fn test_failure_message_lists_notes() {
        let mut data_set = RequestDataSet::new("product_detail");
        data_set.set_expected_status_code(404);
        data_set.add_debug_note("Product 999 does not exist.");
        data_set.add_debug_note("Seeded by the catalog fixture.");

        assert_eq!(
            failure_message(&data_set, 200),
            "Failed asserting that status code 200 for route \"product_detail\" is identical to expected 404\n\
             Notes for this data set:\n  \
             - Product 999 does not exist.\n  \
             - Seeded by the catalog fixture."
        );
    }

    #[test]
    fn test_into_result_collects_failures() {
        let mut report = SmokeReport::default();
        report.push("homepage".to_string(), TestOutcome::Passed);
        report.push(
            "cart".to_string(),
            TestOutcome::Failed {
                message: "cart failed".to_string(),
                expected: 200,
                actual: 500,
            },
        );

        assert!(!report.is_success());
        assert_eq!(report.passed().count(), 1);
        match report.into_result() {
            Err(Error::SmokeFailures { count, summary }) => {
                assert_eq!(count, 1);
                assert_eq!(summary, "cart failed");
            }
            other => panic!("Expected Error::SmokeFailures, got {:?}", other),
        }
    }

    #[test]
    fn test_report_serializes_outcomes() -> anyhow::Result<()> {
        let mut report = SmokeReport::default();
        report.push("homepage".to_string(), TestOutcome::Passed);
        report.push(
            "admin".to_string(),
            TestOutcome::Skipped {
                message: "skipped".to_string(),
            },
        );

        let json = serde_json::to_value(&report)?;
        assert_eq!(
            json,
            serde_json::json!({
                "results": [
                    { "name": "homepage", "outcome": "passed" },
                    { "name": "admin", "outcome": "skipped", "message": "skipped" }
                ]
            })
        );
        Ok(())
    }
}
