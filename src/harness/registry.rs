//! Test Case Registry
//!
//! An immutable, ordered mapping from test-case identifiers to loaders. A
//! registry is built once at startup and then only read; the suite loader
//! receives it by reference.

use std::fmt;

use crate::core::validation::validate_case_identifier;
use crate::harness::error::{SuiteError, SuiteResult};
use crate::harness::traits::{load_fragment, SuiteFragment, TestCase};

/// Instantiates the case registered under the given identifier
pub type CaseLoader = fn(&str) -> SuiteResult<Box<dyn SuiteFragment>>;

/// A registered test case: identifier, description and loader
#[derive(Clone, Copy)]
pub struct CaseEntry {
    name: &'static str,
    description: &'static str,
    loader: CaseLoader,
}

impl CaseEntry {
    pub const fn new(name: &'static str, description: &'static str, loader: CaseLoader) -> Self {
        Self {
            name,
            description,
            loader,
        }
    }

    /// Entry whose loader instantiates `C`
    pub const fn of<C: TestCase>(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, load_fragment::<C>)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn load(&self) -> SuiteResult<Box<dyn SuiteFragment>> {
        (self.loader)(self.name)
    }
}

impl fmt::Debug for CaseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Immutable collection of registered test cases
#[derive(Debug, Clone, Default)]
pub struct TestRegistry {
    entries: Vec<CaseEntry>,
}

impl TestRegistry {
    /// Build a registry, rejecting invalid or duplicate identifiers.
    ///
    /// Entries keep the order they are supplied in.
    pub fn new<I>(entries: I) -> SuiteResult<Self>
    where
        I: IntoIterator<Item = CaseEntry>,
    {
        let mut collected: Vec<CaseEntry> = Vec::new();
        for entry in entries {
            validate_case_identifier(entry.name)?;
            if collected.iter().any(|e| e.name == entry.name) {
                return Err(SuiteError::DuplicateCase {
                    name: entry.name.to_string(),
                });
            }
            collected.push(entry);
        }
        log::debug!("Registry built with {} test cases", collected.len());
        Ok(Self { entries: collected })
    }

    /// Registry with no test cases
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of every builtin case, ordered by identifier
    pub fn with_builtins() -> SuiteResult<Self> {
        let mut entries = crate::harness::builtin::api::get_all_builtin_cases();
        entries.sort_by_key(|entry| entry.name);
        Self::new(entries)
    }

    pub fn get(&self, name: &str) -> Option<&CaseEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Identifiers in registry order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn entries(&self) -> &[CaseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
