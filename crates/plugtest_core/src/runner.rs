//! Runs a list of borrowed test nodes as a single test run.

use crate::result::TestResult;
use crate::test::Test;

#[derive(Default)]
pub struct TestRunner<'t> {
    tests: Vec<&'t dyn Test>,
}

impl<'t> TestRunner<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_test(&mut self, test: &'t dyn Test) {
        self.tests.push(test);
    }

    pub fn tests(&self) -> &[&'t dyn Test] {
        &self.tests
    }

    /// Run every added test, in insertion order, through `controller`.
    pub fn run(&self, controller: &mut TestResult<'_>) {
        controller.run_tests(&self.tests);
    }
}
