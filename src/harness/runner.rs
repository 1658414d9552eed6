//! Text Test Runner
//!
//! Executes a collected `Suite` sequentially and writes a unittest-style
//! report to any `Write` stream. A failing method never stops the run; only a
//! failure to write the report aborts it.

use std::io::Write;
use std::time::Duration;

use crate::core::styles::StyleRole;
use crate::core::time::{SystemTimeProvider, TimeProvider};
use crate::harness::error::{SuiteError, SuiteResult};
use crate::harness::report::TestReport;
use crate::harness::suite::Suite;
use crate::harness::traits::SuiteFragment;
use crate::harness::types::{FixtureError, TestFailure, TestOutcome, TestRecord, TestResult};

const RULE_WIDTH: usize = 70;

/// How much the runner writes while tests execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// No per-method output
    Quiet,
    /// One progress character per method
    #[default]
    Normal,
    /// One line per method
    Verbose,
}

impl Verbosity {
    /// Map a signed level (as produced by counting `-v` and `-q`) onto a verbosity
    pub fn from_level(level: i8) -> Self {
        match level {
            i8::MIN..=0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            _ => Verbosity::Verbose,
        }
    }
}

pub struct TextTestRunner<W: Write> {
    stream: W,
    verbosity: Verbosity,
    use_color: bool,
    clock: Box<dyn TimeProvider>,
}

impl<W: Write> TextTestRunner<W> {
    pub fn new(stream: W) -> Self {
        Self {
            stream,
            verbosity: Verbosity::default(),
            use_color: false,
            clock: Box::new(SystemTimeProvider),
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Replace the clock used for method and run timings
    pub fn with_clock<T: TimeProvider + 'static>(mut self, clock: T) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Recover the output stream
    pub fn into_inner(self) -> W {
        self.stream
    }

    /// Execute every selected method of `suite` in order and write the report
    pub fn run(&mut self, suite: &mut Suite) -> SuiteResult<TestReport> {
        log::info!(
            "Running {} tests from {} test cases",
            suite.count_tests(),
            suite.case_names().len()
        );
        let mut report = TestReport::new();
        let started = self.clock.now();

        for fragment in suite.fragments_mut() {
            self.run_fragment(fragment.as_mut(), &mut report)?;
        }

        report.elapsed = self.clock.now().saturating_duration_since(started);

        if self.verbosity == Verbosity::Normal && report.tests_run() > 0 {
            self.write_line("")?;
        }
        self.write_problems(&report)?;
        self.write_summary(&report)?;
        self.flush()?;

        log::info!(
            "{} ({})",
            report.summary_line(),
            if report.was_successful() { "ok" } else { "failed" }
        );
        Ok(report)
    }

    fn run_fragment(
        &mut self,
        fragment: &mut dyn SuiteFragment,
        report: &mut TestReport,
    ) -> SuiteResult<()> {
        let case = fragment.case_name().to_string();
        let methods = fragment.method_names();
        if methods.is_empty() {
            log::debug!("No selected methods in '{}', skipping fixtures", case);
            return Ok(());
        }

        log::debug!("Running {} methods of '{}'", methods.len(), case);
        match fragment.set_up_case() {
            Ok(()) => {}
            Err(failure) => {
                let result: TestResult = match failure {
                    TestFailure::Skipped(reason) => Err(TestFailure::Skipped(reason)),
                    other => Err(TestFailure::error(format!(
                        "set_up_case failed: {}",
                        other.message()
                    ))),
                };
                log::warn!("set_up_case of '{}' did not succeed: {:?}", case, result);
                for method in methods {
                    let record =
                        TestRecord::from_result(&case, method, &result, Duration::ZERO);
                    self.write_progress(&record)?;
                    report.push(record);
                }
                return Ok(());
            }
        }

        for (index, method) in methods.iter().enumerate() {
            let started = self.clock.now();
            let result = fragment.run_method(index);
            let duration = self.clock.now().saturating_duration_since(started);

            let record = TestRecord::from_result(&case, method, &result, duration);
            log::debug!("{} -> {}", record.test_id(), record.outcome);
            self.write_progress(&record)?;
            report.push(record);
        }

        match fragment.tear_down_case() {
            Ok(()) | Err(TestFailure::Skipped(_)) => {}
            Err(failure) => {
                log::warn!("tear_down_case of '{}' failed: {}", case, failure);
                report.push_fixture_error(FixtureError {
                    case,
                    hook: "tear_down_case".to_string(),
                    message: failure.message().to_string(),
                });
            }
        }
        Ok(())
    }

    fn write_progress(&mut self, record: &TestRecord) -> SuiteResult<()> {
        let role = record.outcome.style_role();
        match self.verbosity {
            Verbosity::Quiet => Ok(()),
            Verbosity::Normal => {
                let mark = role.paint(&record.outcome.progress_char().to_string(), self.use_color);
                self.write(&mark)?;
                self.flush()
            }
            Verbosity::Verbose => {
                let mut status = record.outcome.to_string();
                if record.outcome == TestOutcome::Skipped {
                    if let Some(reason) = &record.message {
                        status = format!("{} '{}'", status, reason);
                    }
                }
                let line = format!(
                    "{} ... {}",
                    record.description(),
                    role.paint(&status, self.use_color)
                );
                self.write_line(&line)
            }
        }
    }

    fn write_problems(&mut self, report: &TestReport) -> SuiteResult<()> {
        for record in report.problems() {
            let label = format!("{}:", record.outcome);
            self.write_block(
                record.outcome.style_role(),
                &label,
                &record.description(),
                record.message.as_deref().unwrap_or(""),
            )?;
        }
        for fixture in &report.fixture_errors {
            self.write_block(
                StyleRole::Error,
                "ERROR:",
                &fixture.description(),
                &fixture.message,
            )?;
        }
        Ok(())
    }

    fn write_block(
        &mut self,
        role: StyleRole,
        label: &str,
        subject: &str,
        message: &str,
    ) -> SuiteResult<()> {
        self.write_line(&"=".repeat(RULE_WIDTH))?;
        let header = format!("{} {}", role.paint(label, self.use_color), subject);
        self.write_line(&header)?;
        self.write_line(&"-".repeat(RULE_WIDTH))?;
        self.write_line(message)?;
        self.write_line("")
    }

    fn write_summary(&mut self, report: &TestReport) -> SuiteResult<()> {
        self.write_line(&"-".repeat(RULE_WIDTH))?;
        self.write_line(&report.summary_line())?;
        self.write_line("")?;
        let role = if report.was_successful() {
            StyleRole::Passed
        } else {
            StyleRole::Failure
        };
        let status = role.paint(&report.status_line(), self.use_color);
        self.write_line(&status)
    }

    fn write(&mut self, text: &str) -> SuiteResult<()> {
        self.stream
            .write_all(text.as_bytes())
            .map_err(|e| SuiteError::io("writing test report", e))
    }

    fn write_line(&mut self, text: &str) -> SuiteResult<()> {
        writeln!(self.stream, "{}", text).map_err(|e| SuiteError::io("writing test report", e))
    }

    fn flush(&mut self) -> SuiteResult<()> {
        self.stream
            .flush()
            .map_err(|e| SuiteError::io("flushing test report", e))
    }
}
