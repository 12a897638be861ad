//! Run controller: fans test events out to listeners and shields the run from panicking test code.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::failure::{Failure, Message, TestFailure, TestOutcome};
use crate::test::Test;

/// Observer of a test run. Every method defaults to doing nothing.
pub trait TestListener {
    fn start_test(&mut self, _test: &dyn Test) {}

    fn add_failure(&mut self, _failure: &TestFailure) {}

    fn end_test(&mut self, _test: &dyn Test) {}

    fn start_suite(&mut self, _suite: &dyn Test) {}

    fn end_suite(&mut self, _suite: &dyn Test) {}

    fn start_test_run(&mut self) {}

    fn end_test_run(&mut self) {}
}

/// Event hub for one run.
///
/// Listeners are borrowed for the controller's lifetime; drop the controller to read them back.
#[derive(Default)]
pub struct TestResult<'a> {
    listeners: Vec<&'a mut dyn TestListener>,
}

impl<'a> TestResult<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: &'a mut dyn TestListener) {
        self.listeners.push(listener);
    }

    /// Run `tests` in order as one test run.
    pub fn run_tests(&mut self, tests: &[&dyn Test]) {
        self.start_test_run();
        for test in tests {
            test.run(self);
        }
        self.end_test_run();
    }

    /// Run `step` on behalf of `test`, recording a returned failure or a panic.
    ///
    /// A panic becomes an error whose short description is `panic_description` (or `uncaught panic`) and whose
    /// detail is the panic message. Returns whether `step` succeeded.
    pub fn protect<F>(&mut self, test: &dyn Test, panic_description: Option<&str>, step: F) -> bool
    where
        F: FnOnce() -> TestOutcome,
    {
        let failure = match panic::catch_unwind(AssertUnwindSafe(step)) {
            Ok(Ok(())) => return true,
            Ok(Err(failure)) => failure,
            Err(payload) => Failure::error(
                Message::new(panic_description.unwrap_or("uncaught panic")).with_detail(panic_message(payload.as_ref())),
            ),
        };
        self.add_failure(TestFailure::new(test.name(), failure));
        false
    }

    pub fn start_test(&mut self, test: &dyn Test) {
        for listener in self.listeners.iter_mut() {
            listener.start_test(test);
        }
    }

    pub fn add_failure(&mut self, failure: TestFailure) {
        for listener in self.listeners.iter_mut() {
            listener.add_failure(&failure);
        }
    }

    pub fn end_test(&mut self, test: &dyn Test) {
        for listener in self.listeners.iter_mut() {
            listener.end_test(test);
        }
    }

    pub fn start_suite(&mut self, suite: &dyn Test) {
        for listener in self.listeners.iter_mut() {
            listener.start_suite(suite);
        }
    }

    pub fn end_suite(&mut self, suite: &dyn Test) {
        for listener in self.listeners.iter_mut() {
            listener.end_suite(suite);
        }
    }

    pub fn start_test_run(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener.start_test_run();
        }
    }

    pub fn end_test_run(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener.end_test_run();
        }
    }
}

/// Text carried by a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
