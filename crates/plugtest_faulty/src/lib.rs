//! Test plugin that misbehaves on request.
//!
//! `PLUGTEST_FAULT` selects where it panics:
//!
//! - `construct`: while the entry point builds the plugin
//! - `make_test`: when asked for its root test
//! - anything else or unset: inside the body of `Faulty/panicky`, between two passing tests

use std::env;

use plugtest_core::{Test, TestCase, TestPlugIn, TestSuite};

/// Environment variable read by the plugin.
pub const FAULT_VAR: &str = "PLUGTEST_FAULT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Construct,
    MakeTest,
    InTest,
}

impl Fault {
    pub fn from_env() -> Self {
        match env::var(FAULT_VAR).as_deref() {
            Ok("construct") => Fault::Construct,
            Ok("make_test") => Fault::MakeTest,
            _ => Fault::InTest,
        }
    }
}

pub struct FaultyPlugIn {
    fault: Fault,
    root: TestSuite,
}

impl FaultyPlugIn {
    pub fn new(fault: Fault) -> Self {
        if fault == Fault::Construct {
            panic!("plugin construction failed");
        }
        Self { fault, root: faulty_suite() }
    }
}

impl TestPlugIn for FaultyPlugIn {
    fn make_test(&self) -> &dyn Test {
        if self.fault == Fault::MakeTest {
            panic!("suite unavailable");
        }
        &self.root
    }
}

plugtest_core::export_test_plugin!(FaultyPlugIn::new(Fault::from_env()));

/// `Faulty` → `steady`, `panicky`, `steady_again`.
pub fn faulty_suite() -> TestSuite {
    TestSuite::new("Faulty")
        .with_test(TestCase::new("steady", || Ok(())))
        .with_test(TestCase::new("panicky", || panic!("no fixtures loaded")))
        .with_test(TestCase::new("steady_again", || Ok(())))
}
