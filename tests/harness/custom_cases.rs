//! Cases defined outside the crate, run through the public API

use crate::common::run_to_string;
use serial_test::serial;
use spoolsuite::app::cli::Args;
use spoolsuite::app::startup::{execute, EXIT_USAGE};
use spoolsuite::core::logging::init_logging;
use spoolsuite::harness::{
    collect, CaseEntry, LoadFailure, SuiteError, TestCase, TestFailure, TestMethod, TestOutcome,
    TestRegistry, TestResult, Verbosity,
};
use spoolsuite::{check, check_eq};
use std::collections::BTreeMap;

/// In-memory stand-in for the plugin's spool database
struct SpoolDatabase {
    spools: BTreeMap<u32, (String, u32)>,
    next_id: u32,
}

impl SpoolDatabase {
    fn insert(&mut self, material: &str, weight: u32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.spools.insert(id, (material.to_string(), weight));
        id
    }

    fn test_insert_assigns_ids(&mut self) -> TestResult {
        let first = self.insert("PLA", 1000);
        let second = self.insert("PETG", 750);
        check_eq!(second, first + 1);
        check_eq!(self.spools.len(), 2);
        Ok(())
    }

    fn test_starts_empty(&mut self) -> TestResult {
        check!(self.spools.is_empty(), "set_up did not reset the database");
        Ok(())
    }

    fn test_consume_filament(&mut self) -> TestResult {
        let id = self.insert("ABS", 1000);
        let entry = self
            .spools
            .get_mut(&id)
            .ok_or_else(|| TestFailure::error("spool vanished"))?;
        entry.1 -= 250;
        check_eq!(entry.1, 750, "remaining weight after a print");
        Ok(())
    }

    fn test_weight_never_negative(&mut self) -> TestResult {
        let id = self.insert("TPU", 100);
        let remaining = self.spools[&id].1.checked_sub(250);
        // deliberately wrong expectation
        check!(remaining.is_some(), "spool {} went below zero", id);
        Ok(())
    }
}

impl TestCase for SpoolDatabase {
    fn load() -> Result<Self, LoadFailure> {
        Ok(Self {
            spools: BTreeMap::new(),
            next_id: 1,
        })
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![
            TestMethod::new("test_insert_assigns_ids", Self::test_insert_assigns_ids),
            TestMethod::new("test_starts_empty", Self::test_starts_empty),
            TestMethod::new("test_consume_filament", Self::test_consume_filament),
            TestMethod::new("test_weight_never_negative", Self::test_weight_never_negative),
        ]
    }

    fn set_up(&mut self) -> TestResult {
        self.spools.clear();
        self.next_id = 1;
        Ok(())
    }
}

struct PrinterLink;

impl PrinterLink {
    fn test_handshake(&mut self) -> TestResult {
        Err(TestFailure::skip("no printer attached"))
    }
}

impl TestCase for PrinterLink {
    fn load() -> Result<Self, LoadFailure> {
        Ok(PrinterLink)
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![TestMethod::new("test_handshake", Self::test_handshake)]
    }
}

struct MissingDriver;

impl TestCase for MissingDriver {
    fn load() -> Result<Self, LoadFailure> {
        Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "libspool.so not found",
        )))
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        Vec::new()
    }
}

fn registry() -> TestRegistry {
    TestRegistry::new([
        CaseEntry::of::<SpoolDatabase>("database", "spool database manager"),
        CaseEntry::of::<PrinterLink>("printer", "printer communication"),
        CaseEntry::of::<MissingDriver>("driver", "native driver bindings"),
    ])
    .unwrap()
}

#[test]
fn test_one_failure_reported_and_rest_pass() {
    let (report, output) = run_to_string(&registry(), &["database"], Verbosity::Normal);
    assert_eq!(report.tests_run(), 4);
    assert_eq!(report.failures(), 1);
    assert_eq!(report.errors(), 0);

    let outcomes: Vec<TestOutcome> = report.records.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            TestOutcome::Passed,
            TestOutcome::Passed,
            TestOutcome::Passed,
            TestOutcome::Failed
        ]
    );
    assert!(output.starts_with("...F\n"));
    assert!(output.contains("FAIL: test_weight_never_negative (database)"));
    assert!(output.contains("spool 1 went below zero"));
    assert!(output.ends_with("FAILED (failures=1)\n"));
}

#[test]
fn test_skips_do_not_fail_the_run() {
    let (report, output) = run_to_string(&registry(), &["printer"], Verbosity::Verbose);
    assert!(report.was_successful());
    assert_eq!(report.skipped(), 1);
    assert!(output.contains("test_handshake (printer) ... skipped 'no printer attached'"));
    assert!(output.ends_with("OK (skipped=1)\n"));
}

#[test]
fn test_load_failure_prevents_any_execution() {
    let err = collect(&registry(), &["printer", "driver"]).unwrap_err();
    match err {
        SuiteError::LoadError { name, source } => {
            assert_eq!(name, "driver");
            assert!(source.to_string().contains("libspool.so"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
#[serial]
fn test_load_failure_cause_is_logged_at_default_level() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("spoolsuite.log");
    init_logging(None, None, log_path.to_str(), false).unwrap();

    let args = Args::try_parse_styled_from(["spoolsuite", "-k", "printer,driver"]).unwrap();
    let mut out = Vec::new();
    assert_eq!(execute(&args, &registry(), &mut out), EXIT_USAGE);
    assert!(out.is_empty(), "nothing should run after a load failure");

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("ERR FATAL: Collecting test cases"), "log: {}", log);
    assert!(log.contains("Failed to load test case 'driver'"), "log: {}", log);
    assert!(log.contains("libspool.so not found"), "log: {}", log);
}

#[test]
fn test_suite_order_follows_identifiers() {
    let suite = collect(&registry(), &["printer", "database"]).unwrap();
    let ids = suite.test_ids();
    assert_eq!(ids.first().map(String::as_str), Some("printer::test_handshake"));
    assert_eq!(ids.len(), 5);
}

#[test]
fn test_empty_identifier_list() {
    let (report, output) = run_to_string(&registry(), &[], Verbosity::Normal);
    assert_eq!(report.tests_run(), 0);
    assert!(output.contains("Ran 0 tests in 0.000s"));
    assert!(output.ends_with("\nOK\n"));
}
