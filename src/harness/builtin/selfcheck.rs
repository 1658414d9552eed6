//! Harness self-check
//!
//! Runs small in-memory suites through a nested runner and checks the
//! guarantees every run relies on. Nested output goes to a buffer, never to
//! the real report stream.

use crate::builtin_case;
use crate::core::time::ManualClock;
use crate::harness::error::{LoadFailure, SuiteError};
use crate::harness::loader::collect;
use crate::harness::registry::{CaseEntry, TestRegistry};
use crate::harness::report::TestReport;
use crate::harness::runner::{TextTestRunner, Verbosity};
use crate::harness::traits::TestCase;
use crate::harness::types::{TestFailure, TestMethod, TestOutcome, TestResult};
use crate::{check, check_eq};

struct Alpha;

impl Alpha {
    fn first(&mut self) -> TestResult {
        Ok(())
    }

    fn second(&mut self) -> TestResult {
        Ok(())
    }
}

impl TestCase for Alpha {
    fn load() -> Result<Self, LoadFailure> {
        Ok(Alpha)
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![
            TestMethod::new("first", Self::first),
            TestMethod::new("second", Self::second),
        ]
    }
}

struct Mixed;

impl Mixed {
    fn passes(&mut self) -> TestResult {
        Ok(())
    }

    fn fails(&mut self) -> TestResult {
        check_eq!(2 + 2, 5, "deliberate failure");
        Ok(())
    }

    fn errors(&mut self) -> TestResult {
        let _weight: u32 = "heavy".parse()?;
        Ok(())
    }

    fn passes_after(&mut self) -> TestResult {
        Ok(())
    }
}

impl TestCase for Mixed {
    fn load() -> Result<Self, LoadFailure> {
        Ok(Mixed)
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![
            TestMethod::new("passes", Self::passes),
            TestMethod::new("fails", Self::fails),
            TestMethod::new("errors", Self::errors),
            TestMethod::new("passes_after", Self::passes_after),
        ]
    }
}

struct Unloadable;

impl TestCase for Unloadable {
    fn load() -> Result<Self, LoadFailure> {
        Err("required dependency is not installed".into())
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        Vec::new()
    }
}

fn fixture_registry() -> Result<TestRegistry, SuiteError> {
    TestRegistry::new([
        CaseEntry::of::<Alpha>("alpha", "two passing methods"),
        CaseEntry::of::<Mixed>("mixed", "pass, fail, error, pass"),
        CaseEntry::of::<Unloadable>("unloadable", "fails to load"),
    ])
}

fn run_nested(
    registry: &TestRegistry,
    identifiers: &[&str],
) -> Result<(TestReport, String), TestFailure> {
    let mut suite = collect(registry, identifiers)?;
    let mut runner = TextTestRunner::new(Vec::new())
        .with_verbosity(Verbosity::Verbose)
        .with_clock(ManualClock::new());
    let report = runner.run(&mut suite)?;
    let output = String::from_utf8(runner.into_inner())?;
    Ok((report, output))
}

/// Self-verification of collection and execution guarantees
pub struct HarnessCase {
    registry: TestRegistry,
}

impl HarnessCase {
    fn test_empty_suite_summary(&mut self) -> TestResult {
        let (report, output) = run_nested(&self.registry, &[])?;
        check_eq!(report.tests_run(), 0);
        check!(report.was_successful());
        check!(
            output.contains("Ran 0 tests in 0.000s"),
            "summary missing: {}",
            output
        );
        check!(output.ends_with("\nOK\n"), "status missing: {}", output);
        Ok(())
    }

    fn test_failure_isolation(&mut self) -> TestResult {
        let (report, output) = run_nested(&self.registry, &["mixed"])?;
        check_eq!(report.tests_run(), 4);
        check_eq!(report.failures(), 1);
        check_eq!(report.errors(), 1);
        check_eq!(
            report.records.last().map(|r| r.outcome),
            Some(TestOutcome::Passed),
            "method after a failure did not run"
        );
        check!(output.contains("FAIL: fails (mixed)"), "{}", output);
        check!(output.contains("ERROR: errors (mixed)"), "{}", output);
        check!(output.contains("FAILED (failures=1, errors=1)"), "{}", output);
        Ok(())
    }

    fn test_declared_order(&mut self) -> TestResult {
        let suite = collect(&self.registry, &["mixed", "alpha"])?;
        check_eq!(
            suite.test_ids(),
            vec![
                "mixed::passes",
                "mixed::fails",
                "mixed::errors",
                "mixed::passes_after",
                "alpha::first",
                "alpha::second",
            ]
        );
        Ok(())
    }

    fn test_duplicate_elimination(&mut self) -> TestResult {
        let once = collect(&self.registry, &["alpha", "mixed"])?;
        let repeated = collect(&self.registry, &["alpha", "mixed", "alpha"])?;
        check_eq!(once.test_ids(), repeated.test_ids());
        check_eq!(repeated.count_tests(), 6);
        // collecting again yields the same count
        check_eq!(collect(&self.registry, &["alpha", "mixed"])?.count_tests(), 6);
        Ok(())
    }

    fn test_load_error_aborts(&mut self) -> TestResult {
        match collect(&self.registry, &["alpha", "unloadable", "mixed"]) {
            Err(SuiteError::LoadError { name, .. }) => check_eq!(name, "unloadable"),
            other => {
                return Err(TestFailure::assertion(format!(
                    "expected load error, got {:?}",
                    other
                )))
            }
        }
        match collect(&self.registry, &["filament"]) {
            Err(SuiteError::UnknownCase { name, .. }) => check_eq!(name, "filament"),
            other => {
                return Err(TestFailure::assertion(format!(
                    "expected unknown case, got {:?}",
                    other
                )))
            }
        }
        Ok(())
    }
}

impl TestCase for HarnessCase {
    fn load() -> Result<Self, LoadFailure> {
        Ok(Self {
            registry: fixture_registry()?,
        })
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![
            TestMethod::new("test_empty_suite_summary", Self::test_empty_suite_summary),
            TestMethod::new("test_failure_isolation", Self::test_failure_isolation),
            TestMethod::new("test_declared_order", Self::test_declared_order),
            TestMethod::new("test_duplicate_elimination", Self::test_duplicate_elimination),
            TestMethod::new("test_load_error_aborts", Self::test_load_error_aborts),
        ]
    }
}

builtin_case!(HarnessCase, "harness", "Runner self-verification");
