//! Suite Loader
//!
//! `collect()` turns an ordered list of identifiers into a `Suite`. Every case
//! is loaded before anything runs, so a single load failure aborts the whole
//! run with no partial execution.

use crate::core::validation::{split_and_collect, validate_glob_pattern};
use crate::harness::error::{SuiteError, SuiteResult};
use crate::harness::registry::TestRegistry;
use crate::harness::suite::Suite;
use crate::harness::types::test_id;

/// Selects test methods by glob pattern.
///
/// A pattern matches either the bare method name or `case::method`. An empty
/// filter selects everything.
#[derive(Debug, Clone, Default)]
pub struct MethodFilter {
    patterns: Vec<glob::Pattern>,
}

impl MethodFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse patterns; entries may be comma-separated
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> SuiteResult<Self> {
        let parts = split_and_collect(patterns, |p| p.as_ref().to_string(), true);
        let compiled = parts
            .iter()
            .map(|p| validate_glob_pattern(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, case: &str, method: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let qualified = test_id(case, method);
        self.patterns
            .iter()
            .any(|p| p.matches(method) || p.matches(&qualified))
    }
}

/// Build a suite from `identifiers`, in the order given.
///
/// Repeated identifiers are collected once, at their first position.
pub fn collect<S: AsRef<str>>(registry: &TestRegistry, identifiers: &[S]) -> SuiteResult<Suite> {
    collect_filtered(registry, identifiers, &MethodFilter::all())
}

/// Like [`collect`], keeping only methods selected by `filter`
pub fn collect_filtered<S: AsRef<str>>(
    registry: &TestRegistry,
    identifiers: &[S],
    filter: &MethodFilter,
) -> SuiteResult<Suite> {
    let mut seen: Vec<&str> = Vec::new();
    let mut suite = Suite::new();

    for identifier in identifiers {
        let name = identifier.as_ref().trim();
        if seen.contains(&name) {
            log::debug!("Skipping repeated test case identifier '{}'", name);
            continue;
        }
        seen.push(name);

        let entry = registry
            .get(name)
            .ok_or_else(|| SuiteError::unknown_case(name, &registry.names()))?;

        let mut fragment = entry.load()?;
        if !filter.is_empty() {
            let case_name = fragment.case_name().to_string();
            fragment.retain_methods(&|method: &str| filter.matches(&case_name, method));
        }
        log::debug!(
            "Loaded test case '{}' with {} methods",
            name,
            fragment.method_names().len()
        );
        suite.push(fragment);
    }

    log::info!(
        "Collected {} tests from {} test cases",
        suite.count_tests(),
        suite.case_names().len()
    );
    Ok(suite)
}
