//! Run report: per-method records and the derived counts

use serde::Serialize;
use std::time::Duration;

use crate::harness::error::SuiteResult;
use crate::harness::types::{serialize_secs, FixtureError, TestOutcome, TestRecord};

/// Everything a single run produced, in execution order
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestReport {
    pub records: Vec<TestRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixture_errors: Vec<FixtureError>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

#[derive(Serialize)]
struct ReportSummary<'a> {
    tests_run: usize,
    failures: usize,
    errors: usize,
    skipped: usize,
    successful: bool,
    #[serde(flatten)]
    report: &'a TestReport,
}

impl TestReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TestRecord) {
        self.records.push(record);
    }

    pub fn push_fixture_error(&mut self, error: FixtureError) {
        self.fixture_errors.push(error);
    }

    /// Number of executed test methods, skipped ones included
    pub fn tests_run(&self) -> usize {
        self.records.len()
    }

    pub fn failures(&self) -> usize {
        self.count(TestOutcome::Failed)
    }

    /// Errored methods plus case-level fixture errors
    pub fn errors(&self) -> usize {
        self.count(TestOutcome::Errored) + self.fixture_errors.len()
    }

    pub fn skipped(&self) -> usize {
        self.count(TestOutcome::Skipped)
    }

    pub fn was_successful(&self) -> bool {
        self.failures() == 0 && self.errors() == 0
    }

    /// Records that failed or errored, in execution order
    pub fn problems(&self) -> impl Iterator<Item = &TestRecord> {
        self.records.iter().filter(|r| r.outcome.is_problem())
    }

    /// `Ran N tests in T.TTTs`
    pub fn summary_line(&self) -> String {
        let run = self.tests_run();
        format!(
            "Ran {} test{} in {:.3}s",
            run,
            if run == 1 { "" } else { "s" },
            self.elapsed.as_secs_f64()
        )
    }

    /// `OK`, `OK (skipped=1)` or `FAILED (failures=1, errors=2)`
    pub fn status_line(&self) -> String {
        let mut details = Vec::new();
        if self.failures() > 0 {
            details.push(format!("failures={}", self.failures()));
        }
        if self.errors() > 0 {
            details.push(format!("errors={}", self.errors()));
        }
        if self.skipped() > 0 {
            details.push(format!("skipped={}", self.skipped()));
        }

        let status = if self.was_successful() { "OK" } else { "FAILED" };
        if details.is_empty() {
            status.to_string()
        } else {
            format!("{} ({})", status, details.join(", "))
        }
    }

    /// Pretty-printed JSON with the derived counts alongside the records
    pub fn to_json(&self) -> SuiteResult<String> {
        let summary = ReportSummary {
            tests_run: self.tests_run(),
            failures: self.failures(),
            errors: self.errors(),
            skipped: self.skipped(),
            successful: self.was_successful(),
            report: self,
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }

    fn count(&self, outcome: TestOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }
}
