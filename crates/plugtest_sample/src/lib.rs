//! Example test plugin.
//!
//! Build it with `cargo build -p plugtest_sample` and point the driver at the resulting library:
//!
//! ```text
//! plugtest target/debug/libplugtest_sample.so              # everything, one test fails
//! plugtest target/debug/libplugtest_sample.so Arithmetic   # only the passing suite
//! plugtest target/debug/libplugtest_sample.so /Sample/Strings/reverse
//! ```

use plugtest_core::{Failure, Message, Test, TestCase, TestOutcome, TestPlugIn, TestSuite, check, check_eq};

pub struct SamplePlugIn {
    root: TestSuite,
}

impl SamplePlugIn {
    pub fn new() -> Self {
        Self { root: sample_suite() }
    }
}

impl Default for SamplePlugIn {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPlugIn for SamplePlugIn {
    fn make_test(&self) -> &dyn Test {
        &self.root
    }
}

plugtest_core::export_test_plugin!(SamplePlugIn::new());

/// `Sample` → `Arithmetic` (all pass), `Strings` (all pass), `Known` (one failure, one error).
pub fn sample_suite() -> TestSuite {
    TestSuite::new("Sample")
        .with_test(
            TestSuite::new("Arithmetic")
                .with_test(TestCase::new("add", add))
                .with_test(TestCase::new("checked_overflow", checked_overflow))
                .with_test(TestCase::new("division", division)),
        )
        .with_test(
            TestSuite::new("Strings")
                .with_test(TestCase::new("reverse", reverse))
                .with_test(TestCase::new("uppercase", uppercase)),
        )
        .with_test(
            TestSuite::new("Known")
                .with_test(TestCase::new("off_by_one", off_by_one))
                .with_test(TestCase::new("missing_fixture", || Ok(())).with_set_up(missing_fixture)),
        )
}

fn add() -> TestOutcome {
    check_eq!(4, 2 + 2);
    Ok(())
}

fn checked_overflow() -> TestOutcome {
    check!(u8::MAX.checked_add(1).is_none());
    Ok(())
}

fn division() -> TestOutcome {
    check_eq!(3, 7 / 2);
    check_eq!(1, 7 % 2);
    Ok(())
}

fn reverse() -> TestOutcome {
    let reversed: String = "plugtest".chars().rev().collect();
    check_eq!("tsetgulp", reversed.as_str());
    Ok(())
}

fn uppercase() -> TestOutcome {
    check_eq!("ABC", "abc".to_uppercase());
    Ok(())
}

fn off_by_one() -> TestOutcome {
    let items = [1, 2, 3];
    check_eq!(items.len(), items.iter().count() + 1);
    Ok(())
}

fn missing_fixture() -> TestOutcome {
    Err(Failure::error(Message::new("fixture unavailable").with_detail("sample data directory not found")))
}
