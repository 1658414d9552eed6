//! Core data types: test methods, their results and per-method records

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::core::styles::StyleRole;

/// Result returned by a test method or fixture hook
pub type TestResult = Result<(), TestFailure>;

/// Why a test method did not pass.
///
/// `?` on any `std::error::Error` inside a test method yields `Error`, so an
/// unexpected error is kept apart from a failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestFailure {
    /// A check did not hold
    Assertion(String),
    /// Something unexpected went wrong
    Error(String),
    /// The method chose not to run
    Skipped(String),
}

impl TestFailure {
    pub fn assertion(message: impl Into<String>) -> Self {
        TestFailure::Assertion(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        TestFailure::Error(message.into())
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        TestFailure::Skipped(reason.into())
    }

    pub fn message(&self) -> &str {
        match self {
            TestFailure::Assertion(m) | TestFailure::Error(m) | TestFailure::Skipped(m) => m,
        }
    }

    pub fn outcome(&self) -> TestOutcome {
        match self {
            TestFailure::Assertion(_) => TestOutcome::Failed,
            TestFailure::Error(_) => TestOutcome::Errored,
            TestFailure::Skipped(_) => TestOutcome::Skipped,
        }
    }
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFailure::Assertion(m) => write!(f, "assertion failed: {}", m),
            TestFailure::Error(m) => write!(f, "error: {}", m),
            TestFailure::Skipped(m) => write!(f, "skipped: {}", m),
        }
    }
}

impl<E: std::error::Error> From<E> for TestFailure {
    fn from(err: E) -> Self {
        TestFailure::Error(err.to_string())
    }
}

/// Fail the current test method unless `cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            return Err($crate::harness::types::TestFailure::assertion(concat!(
                "check failed: ",
                stringify!($cond)
            )));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::harness::types::TestFailure::assertion(format!($($arg)+)));
        }
    };
}

/// Fail the current test method unless both sides compare equal.
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    return Err($crate::harness::types::TestFailure::assertion(format!(
                        "{:?} != {:?}",
                        left_val, right_val
                    )));
                }
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    return Err($crate::harness::types::TestFailure::assertion(format!(
                        "{:?} != {:?}: {}",
                        left_val,
                        right_val,
                        format!($($arg)+)
                    )));
                }
            }
        }
    };
}

/// One named test operation of a test case type `C`
pub struct TestMethod<C> {
    name: &'static str,
    func: fn(&mut C) -> TestResult,
}

impl<C> TestMethod<C> {
    pub const fn new(name: &'static str, func: fn(&mut C) -> TestResult) -> Self {
        Self { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, case: &mut C) -> TestResult {
        (self.func)(case)
    }
}

// Manual impls: derives would require `C: Clone`
impl<C> Clone for TestMethod<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for TestMethod<C> {}

impl<C> fmt::Debug for TestMethod<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestMethod").field("name", &self.name).finish()
    }
}

/// Per-method outcome classification
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    #[strum(serialize = "ok")]
    Passed,
    #[strum(serialize = "FAIL")]
    Failed,
    #[strum(serialize = "ERROR")]
    Errored,
    #[strum(serialize = "skipped")]
    Skipped,
}

impl TestOutcome {
    /// Single character written at normal verbosity
    pub fn progress_char(self) -> char {
        match self {
            TestOutcome::Passed => '.',
            TestOutcome::Failed => 'F',
            TestOutcome::Errored => 'E',
            TestOutcome::Skipped => 's',
        }
    }

    pub fn style_role(self) -> StyleRole {
        match self {
            TestOutcome::Passed => StyleRole::Passed,
            TestOutcome::Failed => StyleRole::Failure,
            TestOutcome::Errored => StyleRole::Error,
            TestOutcome::Skipped => StyleRole::Skipped,
        }
    }

    /// Counts against `was_successful`
    pub fn is_problem(self) -> bool {
        matches!(self, TestOutcome::Failed | TestOutcome::Errored)
    }
}

/// Outcome of one executed test method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRecord {
    pub case: String,
    pub method: String,
    pub outcome: TestOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
}

impl TestRecord {
    pub fn from_result(case: &str, method: &str, result: &TestResult, duration: Duration) -> Self {
        let (outcome, message) = match result {
            Ok(()) => (TestOutcome::Passed, None),
            Err(failure) => (failure.outcome(), Some(failure.message().to_string())),
        };
        Self {
            case: case.to_string(),
            method: method.to_string(),
            outcome,
            message,
            duration,
        }
    }

    /// `case::method`
    pub fn test_id(&self) -> String {
        test_id(&self.case, &self.method)
    }

    /// `method (case)`, the form used in progress lines and failure headers
    pub fn description(&self) -> String {
        format!("{} ({})", self.method, self.case)
    }
}

/// Failure of a per-case fixture hook that is not tied to a single method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureError {
    pub case: String,
    pub hook: String,
    pub message: String,
}

impl FixtureError {
    pub fn description(&self) -> String {
        format!("{} ({})", self.hook, self.case)
    }
}

pub fn test_id(case: &str, method: &str) -> String {
    format!("{}::{}", case, method)
}

pub(crate) fn serialize_secs<S: Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(duration.as_secs_f64())
}
