//! One-character-per-test progress markers.

use std::io::Write;

use crate::failure::TestFailure;
use crate::result::TestListener;
use crate::test::Test;

/// Writes `.` when a test starts, `F` for an assertion failure, `E` for an error and a newline at the end of
/// the run.
///
/// Write errors are ignored: progress output is best effort and must not disturb the run.
pub struct TextTestProgressListener<W: Write> {
    out: W,
}

impl<W: Write> TextTestProgressListener<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestListener for TextTestProgressListener<W> {
    fn start_test(&mut self, _test: &dyn Test) {
        let _ = write!(self.out, ".");
        let _ = self.out.flush();
    }

    fn add_failure(&mut self, failure: &TestFailure) {
        let marker = if failure.is_error() { "E" } else { "F" };
        let _ = write!(self.out, "{}", marker);
        let _ = self.out.flush();
    }

    fn end_test_run(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::{Failure, Message};
    use crate::result::TestResult;
    use crate::test::{TestCase, TestSuite};

    #[test]
    fn test_markers_follow_outcomes() {
        let suite = TestSuite::new("s")
            .with_test(TestCase::new("a", || Ok(())))
            .with_test(TestCase::new("b", || Err(Failure::assertion(Message::new("x"), None))))
            .with_test(TestCase::new("c", || Err(Failure::error(Message::new("y")))));

        let mut progress = TextTestProgressListener::new(Vec::new());
        let mut result = TestResult::new();
        result.add_listener(&mut progress);
        result.run_tests(&[&suite]);
        drop(result);

        assert_eq!(String::from_utf8(progress.into_inner()).unwrap(), "..F.E\n");
    }
}
