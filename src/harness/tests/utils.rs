//! Harness Test Utilities
//!
//! Mock test cases shared across harness test modules. Each mock appends to a
//! thread-local journal so tests can assert on what ran and in which order.

use std::cell::RefCell;

use crate::harness::error::LoadFailure;
use crate::harness::registry::{CaseEntry, TestRegistry};
use crate::harness::traits::TestCase;
use crate::harness::types::{TestFailure, TestMethod, TestResult};

thread_local! {
    static JOURNAL: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

pub fn record(event: &str) {
    JOURNAL.with(|j| j.borrow_mut().push(event.to_string()));
}

/// Drain and return everything recorded on this thread
pub fn take_journal() -> Vec<String> {
    JOURNAL.with(|j| std::mem::take(&mut *j.borrow_mut()))
}

/// Three passing methods
pub struct Database;

impl Database {
    fn test_connect(&mut self) -> TestResult {
        record("database::test_connect");
        Ok(())
    }

    fn test_insert_spool(&mut self) -> TestResult {
        record("database::test_insert_spool");
        Ok(())
    }

    fn test_delete_spool(&mut self) -> TestResult {
        record("database::test_delete_spool");
        Ok(())
    }
}

impl TestCase for Database {
    fn load() -> Result<Self, LoadFailure> {
        Ok(Database)
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![
            TestMethod::new("test_connect", Self::test_connect),
            TestMethod::new("test_insert_spool", Self::test_insert_spool),
            TestMethod::new("test_delete_spool", Self::test_delete_spool),
        ]
    }

    fn set_up_case(&mut self) -> TestResult {
        record("database::set_up_case");
        Ok(())
    }

    fn tear_down_case(&mut self) -> TestResult {
        record("database::tear_down_case");
        Ok(())
    }
}

/// One method of each outcome
pub struct Mixed;

impl Mixed {
    fn test_pass(&mut self) -> TestResult {
        record("mixed::test_pass");
        Ok(())
    }

    fn test_fail(&mut self) -> TestResult {
        record("mixed::test_fail");
        crate::check_eq!(250, 1000, "remaining filament");
        Ok(())
    }

    fn test_error(&mut self) -> TestResult {
        record("mixed::test_error");
        std::fs::read_to_string("/nonexistent/spoolsuite/fixture.json")?;
        Ok(())
    }

    fn test_skip(&mut self) -> TestResult {
        record("mixed::test_skip");
        Err(TestFailure::skip("printer not connected"))
    }
}

impl TestCase for Mixed {
    fn load() -> Result<Self, LoadFailure> {
        Ok(Mixed)
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![
            TestMethod::new("test_pass", Self::test_pass),
            TestMethod::new("test_fail", Self::test_fail),
            TestMethod::new("test_error", Self::test_error),
            TestMethod::new("test_skip", Self::test_skip),
        ]
    }
}

/// `set_up_case` always fails
pub struct BrokenSetUp;

impl BrokenSetUp {
    fn test_never_runs(&mut self) -> TestResult {
        record("broken_set_up::test_never_runs");
        Ok(())
    }
}

impl TestCase for BrokenSetUp {
    fn load() -> Result<Self, LoadFailure> {
        Ok(BrokenSetUp)
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![TestMethod::new("test_never_runs", Self::test_never_runs)]
    }

    fn set_up_case(&mut self) -> TestResult {
        Err(TestFailure::error("database file locked"))
    }
}

/// `tear_down_case` always fails
pub struct BrokenTearDown;

impl BrokenTearDown {
    fn test_runs(&mut self) -> TestResult {
        record("broken_tear_down::test_runs");
        Ok(())
    }
}

impl TestCase for BrokenTearDown {
    fn load() -> Result<Self, LoadFailure> {
        Ok(BrokenTearDown)
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![TestMethod::new("test_runs", Self::test_runs)]
    }

    fn tear_down_case(&mut self) -> TestResult {
        Err(TestFailure::error("could not remove backup"))
    }
}

/// Fails to instantiate, as when a dependency is missing
pub struct Unloadable;

impl TestCase for Unloadable {
    fn load() -> Result<Self, LoadFailure> {
        record("unloadable::load");
        Err("database driver not found".into())
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        Vec::new()
    }
}

pub fn mock_registry() -> TestRegistry {
    TestRegistry::new([
        CaseEntry::of::<Database>("database", "spool database operations"),
        CaseEntry::of::<Mixed>("mixed", "one method per outcome"),
        CaseEntry::of::<BrokenSetUp>("broken_set_up", "failing case fixture"),
        CaseEntry::of::<BrokenTearDown>("broken_tear_down", "failing case cleanup"),
        CaseEntry::of::<Unloadable>("unloadable", "cannot be loaded"),
    ])
    .expect("mock registry is valid")
}
