//! Listener that remembers what ran and what failed.

use crate::failure::TestFailure;
use crate::result::TestListener;
use crate::test::Test;

/// Counts of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestSummary {
    pub run: usize,
    pub failures: usize,
    pub errors: usize,
}

impl TestSummary {
    pub fn failures_total(&self) -> usize {
        self.failures + self.errors
    }

    pub fn was_successful(&self) -> bool {
        self.failures_total() == 0
    }
}

/// Collects the names of started tests and every failure, in event order.
#[derive(Debug, Default)]
pub struct TestResultCollector {
    tests: Vec<String>,
    failures: Vec<TestFailure>,
}

impl TestResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the tests that were started, in order.
    pub fn tests_run(&self) -> &[String] {
        &self.tests
    }

    pub fn failures(&self) -> &[TestFailure] {
        &self.failures
    }

    pub fn run_tests(&self) -> usize {
        self.tests.len()
    }

    pub fn test_errors(&self) -> usize {
        self.failures.iter().filter(|failure| failure.is_error()).count()
    }

    pub fn test_failures(&self) -> usize {
        self.failures.iter().filter(|failure| !failure.is_error()).count()
    }

    pub fn test_failures_total(&self) -> usize {
        self.failures.len()
    }

    pub fn was_successful(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> TestSummary {
        TestSummary {
            run: self.run_tests(),
            failures: self.test_failures(),
            errors: self.test_errors(),
        }
    }
}

impl TestListener for TestResultCollector {
    fn start_test(&mut self, test: &dyn Test) {
        self.tests.push(test.name().to_string());
    }

    fn add_failure(&mut self, failure: &TestFailure) {
        self.failures.push(failure.clone());
    }
}
