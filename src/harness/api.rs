//! Public API for the test harness
//!
//! External modules should import from here rather than directly from the
//! internal modules.

use std::io;

use crate::harness::error::SuiteResult;
use crate::harness::loader::collect;
use crate::harness::registry::TestRegistry;
use crate::harness::report::TestReport;
use crate::harness::runner::TextTestRunner;

// Test case definition
pub use crate::harness::traits::{load_fragment, SuiteFragment, TestCase};
pub use crate::harness::types::{
    FixtureError, TestFailure, TestMethod, TestOutcome, TestRecord, TestResult,
};

// Errors
pub use crate::harness::error::{LoadFailure, SuiteError};

// Registry, collection and execution
pub use crate::harness::loader::{collect_filtered, MethodFilter};
pub use crate::harness::registry::CaseEntry;
pub use crate::harness::runner::Verbosity;
pub use crate::harness::suite::Suite;

/// Identifiers run by [`test_all`], in execution order
pub const DEFAULT_CASES: &[&str] = &["environment", "harness"];

/// Collect the default builtin cases and run them against standard output
pub fn test_all() -> SuiteResult<TestReport> {
    let registry = TestRegistry::with_builtins()?;
    let mut suite = collect(&registry, DEFAULT_CASES)?;
    let stdout = io::stdout();
    let mut runner = TextTestRunner::new(stdout.lock());
    runner.run(&mut suite)
}
