//! The test tree: leaves are [`TestCase`]s, composites are [`TestSuite`]s.

use crate::failure::TestOutcome;
use crate::result::TestResult;

/// A node of the test tree.
///
/// The tree is immutable once built. Plugins hand out borrowed references to it and the driver never takes
/// ownership of a node.
pub trait Test: Send + Sync {
    /// Name used by path resolution and reports.
    fn name(&self) -> &str;

    /// Number of test cases at or below this node.
    fn count_test_cases(&self) -> usize;

    /// Number of direct children. Leaves have none.
    fn child_test_count(&self) -> usize {
        0
    }

    /// Direct child at `index`, in run order.
    fn child_test_at(&self, _index: usize) -> Option<&dyn Test> {
        None
    }

    /// Run this node, reporting every event to `result`.
    fn run(&self, result: &mut TestResult<'_>);
}

/// Find the first node named `name` in a pre-order, depth-first walk starting at (and including) `root`.
pub fn find_test<'t>(root: &'t dyn Test, name: &str) -> Option<&'t dyn Test> {
    if root.name() == name {
        return Some(root);
    }
    (0..root.child_test_count())
        .filter_map(move |index| root.child_test_at(index))
        .find_map(|child| find_test(child, name))
}

type Step = Box<dyn Fn() -> TestOutcome + Send + Sync>;

/// A single runnable test.
pub struct TestCase {
    name: String,
    set_up: Option<Step>,
    body: Step,
    tear_down: Option<Step>,
}

impl TestCase {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> TestOutcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            set_up: None,
            body: Box::new(body),
            tear_down: None,
        }
    }

    /// Run `step` before the body. The body is skipped if it fails.
    pub fn with_set_up<F>(mut self, step: F) -> Self
    where
        F: Fn() -> TestOutcome + Send + Sync + 'static,
    {
        self.set_up = Some(Box::new(step));
        self
    }

    /// Run `step` after the body, whether or not set-up and body succeeded.
    pub fn with_tear_down<F>(mut self, step: F) -> Self
    where
        F: Fn() -> TestOutcome + Send + Sync + 'static,
    {
        self.tear_down = Some(Box::new(step));
        self
    }
}

impl Test for TestCase {
    fn name(&self) -> &str {
        &self.name
    }

    fn count_test_cases(&self) -> usize {
        1
    }

    fn run(&self, result: &mut TestResult<'_>) {
        result.start_test(self);

        let set_up_ok = match &self.set_up {
            Some(step) => result.protect(self, Some("setUp() failed"), || step()),
            None => true,
        };
        if set_up_ok {
            result.protect(self, None, || (self.body)());
        }
        if let Some(step) = &self.tear_down {
            result.protect(self, Some("tearDown() failed"), || step());
        }

        result.end_test(self);
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A named group of tests run in insertion order.
pub struct TestSuite {
    name: String,
    tests: Vec<Box<dyn Test>>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: impl Test + 'static) {
        self.tests.push(Box::new(test));
    }

    /// Builder form of [`TestSuite::add_test`].
    pub fn with_test(mut self, test: impl Test + 'static) -> Self {
        self.add_test(test);
        self
    }
}

impl Test for TestSuite {
    fn name(&self) -> &str {
        &self.name
    }

    fn count_test_cases(&self) -> usize {
        self.tests.iter().map(|test| test.count_test_cases()).sum()
    }

    fn child_test_count(&self) -> usize {
        self.tests.len()
    }

    fn child_test_at(&self, index: usize) -> Option<&dyn Test> {
        self.tests.get(index).map(|test| test.as_ref())
    }

    fn run(&self, result: &mut TestResult<'_>) {
        result.start_suite(self);
        for test in &self.tests {
            test.run(result);
        }
        result.end_suite(self);
    }
}

impl std::fmt::Debug for TestSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSuite")
            .field("name", &self.name)
            .field("tests", &self.tests.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::TestResultCollector;
    use crate::failure::{Failure, Message};
    use std::sync::{Arc, Mutex};

    fn passing(name: &str) -> TestCase {
        TestCase::new(name, || Ok(()))
    }

    fn tree() -> TestSuite {
        TestSuite::new("All")
            .with_test(
                TestSuite::new("Math")
                    .with_test(passing("add"))
                    .with_test(passing("sub")),
            )
            .with_test(TestSuite::new("Text").with_test(passing("add")))
    }

    #[test]
    fn test_count_test_cases_sums_leaves() {
        let root = tree();
        assert_eq!(root.count_test_cases(), 3);
        assert_eq!(root.child_test_count(), 2);
        assert_eq!(passing("x").count_test_cases(), 1);
        assert_eq!(passing("x").child_test_count(), 0);
    }

    #[test]
    fn test_find_test_includes_root() {
        let root = tree();
        assert_eq!(find_test(&root, "All").map(|t| t.name()), Some("All"));
    }

    #[test]
    fn test_find_test_is_depth_first() {
        let root = tree();
        let found = find_test(&root, "add").unwrap();
        // The first "add" lives under Math, which comes before Text.
        let math = root.child_test_at(0).unwrap();
        assert!(std::ptr::addr_eq(found, math.child_test_at(0).unwrap()));
    }

    #[test]
    fn test_find_test_missing() {
        assert!(find_test(&tree(), "mul").is_none());
    }

    #[test]
    fn test_case_runs_steps_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        let case = TestCase::new("ordered", move || {
            b.lock().unwrap().push("body");
            Ok(())
        })
        .with_set_up(move || {
            a.lock().unwrap().push("set_up");
            Ok(())
        })
        .with_tear_down(move || {
            c.lock().unwrap().push("tear_down");
            Ok(())
        });

        let mut collector = TestResultCollector::new();
        let mut result = TestResult::new();
        result.add_listener(&mut collector);
        case.run(&mut result);
        drop(result);

        assert_eq!(*log.lock().unwrap(), vec!["set_up", "body", "tear_down"]);
        assert!(collector.was_successful());
    }

    #[test]
    fn test_failed_set_up_skips_body_but_tears_down() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (b, c) = (log.clone(), log.clone());
        let case = TestCase::new("guarded", move || {
            b.lock().unwrap().push("body");
            Ok(())
        })
        .with_set_up(|| Err(Failure::error(Message::new("no database"))))
        .with_tear_down(move || {
            c.lock().unwrap().push("tear_down");
            Ok(())
        });

        let mut collector = TestResultCollector::new();
        let mut result = TestResult::new();
        result.add_listener(&mut collector);
        case.run(&mut result);
        drop(result);

        assert_eq!(*log.lock().unwrap(), vec!["tear_down"]);
        assert_eq!(collector.test_errors(), 1);
        assert_eq!(collector.run_tests(), 1);
    }

    #[test]
    fn test_suite_runs_children_in_order() {
        let mut collector = TestResultCollector::new();
        let mut result = TestResult::new();
        result.add_listener(&mut collector);
        tree().run(&mut result);
        drop(result);

        assert_eq!(collector.tests_run(), ["add", "sub", "add"]);
    }
}
