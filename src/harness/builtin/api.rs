//! Registration of builtin test cases
//!
//! Builtin cases use the `builtin_case!` macro to submit a registry entry at
//! compile time. `TestRegistry::with_builtins()` takes a snapshot of them.

use crate::harness::registry::CaseEntry;
use inventory;

/// Entry for a builtin test case in the compile-time collection
pub struct BuiltinCaseEntry {
    pub factory: fn() -> CaseEntry,
}

inventory::collect!(BuiltinCaseEntry);

/// Register a `TestCase` type as a builtin under an identifier
#[macro_export]
macro_rules! builtin_case {
    ($case:ty, $name:expr, $description:expr) => {
        inventory::submit!($crate::harness::builtin::api::BuiltinCaseEntry {
            factory: || $crate::harness::registry::CaseEntry::of::<$case>($name, $description)
        });
    };
}

/// Every submitted builtin entry, in no particular order
pub fn get_all_builtin_cases() -> Vec<CaseEntry> {
    inventory::iter::<BuiltinCaseEntry>()
        .map(|entry| (entry.factory)())
        .collect()
}
