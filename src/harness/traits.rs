//! Test case trait and the type-erased suite fragment
//!
//! A test case is an ordinary Rust type that lists its test methods
//! explicitly through [`TestCase::test_methods`]. Nothing is discovered by
//! name: the order of that list is the execution order.
//!
//! The runner never sees concrete case types. [`load_fragment`] instantiates a
//! case and wraps it in a [`SuiteFragment`], which is what a `Suite` stores.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::harness::error::{LoadFailure, SuiteError, SuiteResult};
use crate::harness::types::{TestFailure, TestMethod, TestResult};

/// A named collection of independent test methods with optional fixtures.
///
/// Fixture hooks default to no-ops. A failing `set_up` is recorded as an error
/// for the method and skips both the body and `tear_down`.
pub trait TestCase: Sized + 'static {
    /// Instantiate the case. An error here aborts suite construction.
    fn load() -> Result<Self, LoadFailure>;

    /// Test methods in execution order
    fn test_methods() -> Vec<TestMethod<Self>>;

    /// Runs once before the first selected method of this case
    fn set_up_case(&mut self) -> TestResult {
        Ok(())
    }

    /// Runs once after the last selected method of this case
    fn tear_down_case(&mut self) -> TestResult {
        Ok(())
    }

    /// Runs before every method
    fn set_up(&mut self) -> TestResult {
        Ok(())
    }

    /// Runs after every method whose `set_up` succeeded
    fn tear_down(&mut self) -> TestResult {
        Ok(())
    }
}

/// A loaded test case as seen by the suite and the runner
pub trait SuiteFragment {
    /// Registry identifier the case was loaded under
    fn case_name(&self) -> &str;

    /// Names of the selected methods, in execution order
    fn method_names(&self) -> Vec<&'static str>;

    /// Drop every method for which `keep` returns false
    fn retain_methods(&mut self, keep: &dyn Fn(&str) -> bool);

    fn set_up_case(&mut self) -> TestResult;

    fn tear_down_case(&mut self) -> TestResult;

    /// Run the selected method at `index` with its `set_up`/`tear_down`
    fn run_method(&mut self, index: usize) -> TestResult;
}

/// Adapter from a concrete `TestCase` to `SuiteFragment`
pub struct CaseFragment<C: TestCase> {
    name: String,
    instance: C,
    methods: Vec<TestMethod<C>>,
}

impl<C: TestCase> CaseFragment<C> {
    pub fn new(name: &str, instance: C) -> Self {
        Self {
            name: name.to_string(),
            instance,
            methods: C::test_methods(),
        }
    }
}

impl<C: TestCase> SuiteFragment for CaseFragment<C> {
    fn case_name(&self) -> &str {
        &self.name
    }

    fn method_names(&self) -> Vec<&'static str> {
        self.methods.iter().map(|m| m.name()).collect()
    }

    fn retain_methods(&mut self, keep: &dyn Fn(&str) -> bool) {
        self.methods.retain(|m| keep(m.name()));
    }

    fn set_up_case(&mut self) -> TestResult {
        let instance = &mut self.instance;
        guarded(|| instance.set_up_case())
    }

    fn tear_down_case(&mut self) -> TestResult {
        let instance = &mut self.instance;
        guarded(|| instance.tear_down_case())
    }

    fn run_method(&mut self, index: usize) -> TestResult {
        let method = match self.methods.get(index) {
            Some(method) => *method,
            None => {
                return Err(TestFailure::error(format!(
                    "no test method at index {} in '{}'",
                    index, self.name
                )))
            }
        };
        let instance = &mut self.instance;

        match guarded(|| instance.set_up()) {
            Ok(()) => {}
            Err(TestFailure::Skipped(reason)) => return Err(TestFailure::Skipped(reason)),
            Err(failure) => {
                return Err(TestFailure::error(format!(
                    "set_up failed: {}",
                    failure.message()
                )))
            }
        }

        let body = guarded(|| method.call(instance));
        let tear_down = guarded(|| instance.tear_down());

        match (body, tear_down) {
            (Ok(()), Ok(())) => Ok(()),
            (Ok(()), Err(TestFailure::Skipped(_))) => Ok(()),
            (Ok(()), Err(failure)) => Err(TestFailure::error(format!(
                "tear_down failed: {}",
                failure.message()
            ))),
            (Err(failure), Ok(())) => Err(failure),
            (Err(failure), Err(tear_down_failure)) => {
                log::warn!(
                    "tear_down of {}::{} also failed: {}",
                    self.name,
                    method.name(),
                    tear_down_failure
                );
                Err(failure)
            }
        }
    }
}

/// Instantiate `C` and wrap it for the suite under the identifier `name`
pub fn load_fragment<C: TestCase>(name: &str) -> SuiteResult<Box<dyn SuiteFragment>> {
    let instance = C::load().map_err(|source| SuiteError::LoadError {
        name: name.to_string(),
        source,
    })?;
    Ok(Box::new(CaseFragment::new(name, instance)))
}

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the process panic hook so panics caught by [`guarded`] are logged at
/// debug level instead of printed. Other threads keep the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CAPTURING.with(Cell::get) {
                log::debug!("Captured test panic: {}", info);
            } else {
                previous(info);
            }
        }));
    });
}

/// Call `f`, turning a panic into an assertion failure.
///
/// Rust's `assert!` family panics, so a panic is a failed check rather than an
/// unexpected error.
fn guarded<F: FnOnce() -> TestResult>(f: F) -> TestResult {
    install_quiet_hook();
    let was_capturing = CAPTURING.with(|c| c.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    CAPTURING.with(|c| c.set(was_capturing));

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(TestFailure::assertion(format!(
            "panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
