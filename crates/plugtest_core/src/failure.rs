//! Failure values produced by test bodies and recorded by the run controller.

use std::fmt;
use std::path::PathBuf;

/// What a test body, set-up or tear-down returns.
pub type TestOutcome = Result<(), Failure>;

/// Location in source that raised a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub file: PathBuf,
    pub line: u32,
}

impl SourceLine {
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// A short description plus optional detail lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub short_description: String,
    pub details: Vec<String>,
}

impl Message {
    pub fn new(short_description: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Detail lines, each prefixed by `- ` and terminated by a newline.
    pub fn details_text(&self) -> String {
        let mut text = String::new();
        for detail in &self.details {
            text.push_str("- ");
            text.push_str(detail);
            text.push('\n');
        }
        text
    }
}

/// Why a test did not pass.
///
/// An assertion failure is an expected check that did not hold; an error is anything else (a panic, a failed
/// set-up, an explicit [`Failure::error`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct Failure {
    pub message: Message,
    pub source_line: Option<SourceLine>,
    pub is_error: bool,
}

impl Failure {
    pub fn assertion(message: Message, source_line: Option<SourceLine>) -> Self {
        Self {
            message,
            source_line,
            is_error: false,
        }
    }

    pub fn error(message: Message) -> Self {
        Self {
            message,
            source_line: None,
            is_error: true,
        }
    }

    /// Build the failure `check_eq!` reports.
    pub fn not_equal(expected: impl fmt::Debug, actual: impl fmt::Debug, source_line: SourceLine) -> Self {
        let message = Message::new("equality assertion failed")
            .with_detail(format!("Expected: {:?}", expected))
            .with_detail(format!("Actual  : {:?}", actual));
        Self::assertion(message, Some(source_line))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message.short_description)?;
        for detail in &self.message.details {
            write!(f, "; {}", detail)?;
        }
        Ok(())
    }
}

/// A failure attributed to the test that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    pub failed_test_name: String,
    pub failure: Failure,
}

impl TestFailure {
    pub fn new(failed_test_name: impl Into<String>, failure: Failure) -> Self {
        Self {
            failed_test_name: failed_test_name.into(),
            failure,
        }
    }

    pub fn is_error(&self) -> bool {
        self.failure.is_error
    }
}

/// Fail the enclosing test body unless `cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr) => {
        if !$cond {
            return ::std::result::Result::Err($crate::Failure::assertion(
                $crate::Message::new("assertion failed").with_detail(concat!("Expression: ", stringify!($cond))),
                ::std::option::Option::Some($crate::SourceLine::new(file!(), line!())),
            ));
        }
    };
}

/// Fail the enclosing test body unless `expected == actual`.
#[macro_export]
macro_rules! check_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        match (&$expected, &$actual) {
            (expected, actual) => {
                if !(*expected == *actual) {
                    return ::std::result::Result::Err($crate::Failure::not_equal(
                        expected,
                        actual,
                        $crate::SourceLine::new(file!(), line!()),
                    ));
                }
            }
        }
    };
}

/// Fail the enclosing test body unconditionally.
#[macro_export]
macro_rules! fail {
    ($($arg:tt)+) => {
        return ::std::result::Result::Err($crate::Failure::assertion(
            $crate::Message::new("forced failure").with_detail(format!($($arg)+)),
            ::std::option::Option::Some($crate::SourceLine::new(file!(), line!())),
        ))
    };
}
