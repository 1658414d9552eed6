//! The combined suite: an ordered sequence of loaded test cases

use std::fmt;

use crate::harness::traits::SuiteFragment;
use crate::harness::types::test_id;

/// Ordered aggregation of loaded test cases for a single run.
///
/// Built by `collect()`, consumed by a runner, then discarded.
#[derive(Default)]
pub struct Suite {
    fragments: Vec<Box<dyn SuiteFragment>>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment after all existing ones
    pub fn push(&mut self, fragment: Box<dyn SuiteFragment>) {
        self.fragments.push(fragment);
    }

    /// Total number of selected test methods
    pub fn count_tests(&self) -> usize {
        self.fragments.iter().map(|f| f.method_names().len()).sum()
    }

    pub fn case_names(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.case_name()).collect()
    }

    /// `case::method` identifiers in execution order
    pub fn test_ids(&self) -> Vec<String> {
        self.fragments
            .iter()
            .flat_map(|f| {
                f.method_names()
                    .into_iter()
                    .map(move |method| test_id(f.case_name(), method))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.count_tests() == 0
    }

    pub(crate) fn fragments_mut(&mut self) -> &mut [Box<dyn SuiteFragment>] {
        &mut self.fragments
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("cases", &self.case_names())
            .field("tests", &self.count_tests())
            .finish()
    }
}
