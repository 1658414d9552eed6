//! Environment checks
//!
//! Verifies what plugin test cases rely on from the host: a writable temporary
//! directory, a monotonic clock and a resolvable configuration directory.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::builtin_case;
use crate::core::version::get_api_version;
use crate::harness::error::LoadFailure;
use crate::harness::traits::TestCase;
use crate::harness::types::{TestFailure, TestMethod, TestResult};
use crate::{check, check_eq};

static NEXT_SCRATCH: AtomicUsize = AtomicUsize::new(0);

pub struct EnvironmentCase {
    scratch: PathBuf,
}

impl EnvironmentCase {
    fn test_temp_dir_round_trip(&mut self) -> TestResult {
        let path = self.scratch.join("round_trip.txt");
        let payload = "spool=PLA;weight=1000";
        fs::write(&path, payload)?;
        let read_back = fs::read_to_string(&path)?;
        check_eq!(read_back, payload);
        fs::remove_file(&path)?;
        check!(!path.exists());
        Ok(())
    }

    fn test_monotonic_clock(&mut self) -> TestResult {
        let first = Instant::now();
        std::thread::sleep(Duration::from_millis(1));
        let second = Instant::now();
        check!(second > first, "clock did not advance across a sleep");
        Ok(())
    }

    fn test_config_dir_resolvable(&mut self) -> TestResult {
        let Some(config_dir) = dirs::config_dir() else {
            return Err(TestFailure::skip("no configuration directory on this platform"));
        };
        check!(
            config_dir.is_absolute(),
            "configuration directory '{}' is not absolute",
            config_dir.display()
        );
        Ok(())
    }

    fn test_api_version_embedded(&mut self) -> TestResult {
        check!(get_api_version() > 0, "harness API version missing from build");
        Ok(())
    }
}

impl TestCase for EnvironmentCase {
    fn load() -> Result<Self, LoadFailure> {
        let scratch = std::env::temp_dir().join(format!(
            "spoolsuite-env-{}-{}",
            std::process::id(),
            NEXT_SCRATCH.fetch_add(1, Ordering::Relaxed)
        ));
        Ok(Self { scratch })
    }

    fn test_methods() -> Vec<TestMethod<Self>> {
        vec![
            TestMethod::new("test_temp_dir_round_trip", Self::test_temp_dir_round_trip),
            TestMethod::new("test_monotonic_clock", Self::test_monotonic_clock),
            TestMethod::new("test_config_dir_resolvable", Self::test_config_dir_resolvable),
            TestMethod::new("test_api_version_embedded", Self::test_api_version_embedded),
        ]
    }

    fn set_up_case(&mut self) -> TestResult {
        fs::create_dir_all(&self.scratch)?;
        Ok(())
    }

    fn tear_down_case(&mut self) -> TestResult {
        if self.scratch.exists() {
            fs::remove_dir_all(&self.scratch)?;
        }
        Ok(())
    }
}

builtin_case!(
    EnvironmentCase,
    "environment",
    "Host environment needed by plugin tests"
);
