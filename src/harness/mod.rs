//! Test Harness
//!
//! Aggregates registered test cases into a suite and runs it with a text
//! reporting runner.

pub mod api;
pub mod builtin;
pub mod error;
pub mod loader;
pub mod registry;
pub mod report;
pub mod runner;
pub mod suite;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use api::*;
pub use loader::collect;
pub use registry::TestRegistry;
pub use report::TestReport;
pub use runner::TextTestRunner;
