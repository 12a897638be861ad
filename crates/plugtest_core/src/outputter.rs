//! Compiler-style result report.
//!
//! A successful run prints `OK (<n>)`. Otherwise every failure is printed as
//!
//! ```text
//! src/lib.rs:42: Assertion
//! Test name: add
//! equality assertion failed
//! - Expected: 3
//! - Actual  : 4
//!
//! ```
//!
//! followed by `Failures !!!` and a statistics line. The location prefix uses a configurable format so editors
//! and CI log parsers can jump to the failing line.

use std::io::{self, Write};
use std::path::Path;

use crate::collector::TestResultCollector;
use crate::failure::{SourceLine, TestFailure};

/// `file:line: `, the layout rustc and most compilers use.
pub const DEFAULT_LOCATION_FORMAT: &str = "%p:%l: ";

pub const DEFAULT_WRAP_COLUMN: usize = 79;

#[derive(Debug, Clone)]
pub struct CompilerOutputter {
    location_format: String,
    wrap_column: usize,
}

impl Default for CompilerOutputter {
    fn default() -> Self {
        Self {
            location_format: DEFAULT_LOCATION_FORMAT.to_string(),
            wrap_column: DEFAULT_WRAP_COLUMN,
        }
    }
}

impl CompilerOutputter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the location prefix. `%p` is the full path, `%f` the file name and `%l` the line number.
    pub fn with_location_format(mut self, format: impl Into<String>) -> Self {
        self.location_format = format.into();
        self
    }

    /// Wrap detail text at `column` characters. Zero disables wrapping.
    pub fn with_wrap_column(mut self, column: usize) -> Self {
        self.wrap_column = column;
        self
    }

    pub fn write(&self, result: &TestResultCollector, out: &mut dyn Write) -> io::Result<()> {
        if result.was_successful() {
            writeln!(out, "OK ({})", result.run_tests())
        } else {
            for failure in result.failures() {
                self.write_failure_detail(failure, out)?;
            }
            self.write_statistics(result, out)
        }
    }

    fn write_failure_detail(&self, failure: &TestFailure, out: &mut dyn Write) -> io::Result<()> {
        self.write_location(failure.failure.source_line.as_ref(), out)?;
        write!(out, "{}", if failure.is_error() { "Error" } else { "Assertion" })?;
        write!(out, "\nTest name: {}", failure.failed_test_name)?;

        let message = &failure.failure.message;
        write!(out, "\n{}\n", message.short_description)?;
        writeln!(out, "{}", wrap(&message.details_text(), self.wrap_column))
    }

    fn write_location(&self, source_line: Option<&SourceLine>, out: &mut dyn Write) -> io::Result<()> {
        match source_line {
            Some(source_line) => write!(out, "{}", format_location(&self.location_format, source_line)),
            None => write!(out, "##Failure Location unknown## : "),
        }
    }

    fn write_statistics(&self, result: &TestResultCollector, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Failures !!!")?;
        writeln!(
            out,
            "Run: {}   Failure total: {}   Failures: {}   Errors: {}",
            result.run_tests(),
            result.test_failures_total(),
            result.test_failures(),
            result.test_errors()
        )
    }
}

fn format_location(format: &str, source_line: &SourceLine) -> String {
    let mut location = String::new();
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            location.push(c);
            continue;
        }
        match chars.next() {
            Some('l') => location.push_str(&source_line.line.to_string()),
            Some('p') => location.push_str(&source_line.file.display().to_string()),
            Some('f') => location.push_str(&file_name(&source_line.file)),
            Some(other) => {
                location.push('%');
                location.push(other);
            }
            None => location.push('%'),
        }
    }
    location
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Break every line of `text` into chunks of at most `column` characters.
fn wrap(text: &str, column: usize) -> String {
    if column == 0 {
        return text.to_string();
    }
    let mut wrapped = String::new();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            wrapped.push('\n');
        }
        let chars: Vec<char> = line.chars().collect();
        for (chunk_index, chunk) in chars.chunks(column).enumerate() {
            if chunk_index > 0 {
                wrapped.push('\n');
            }
            wrapped.extend(chunk);
        }
    }
    wrapped
}
