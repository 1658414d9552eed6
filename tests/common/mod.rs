//! Common test utilities and helpers
//!
//! Config file fixtures and a helper that runs a suite into a string.

#![allow(dead_code)]

use spoolsuite::core::time::ManualClock;
use spoolsuite::harness::{collect, TestRegistry, TestReport, TextTestRunner, Verbosity};
use std::path::{Path, PathBuf};

/// Write `contents` to `spoolsuite.toml` inside `dir` and return its path
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("spoolsuite.toml");
    std::fs::write(&path, contents).expect("write config file");
    path
}

/// Collect `identifiers` from `registry` and run them with a frozen clock
pub fn run_to_string(
    registry: &TestRegistry,
    identifiers: &[&str],
    verbosity: Verbosity,
) -> (TestReport, String) {
    let mut suite = collect(registry, identifiers).expect("collect suite");
    let mut runner = TextTestRunner::new(Vec::new())
        .with_verbosity(verbosity)
        .with_clock(ManualClock::new());
    let report = runner.run(&mut suite).expect("run suite");
    let output = String::from_utf8(runner.into_inner()).expect("utf-8 report");
    (report, output)
}

/// Path of the compiled `spoolsuite` binary
pub fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_spoolsuite"))
}
