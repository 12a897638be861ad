//! Report configuration for a plugin test run

use plugtest_core::CompilerOutputter;
use plugtest_core::outputter::{DEFAULT_LOCATION_FORMAT, DEFAULT_WRAP_COLUMN};

/// How results are presented on standard error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Location prefix for failures (`%p` path, `%f` file name, `%l` line)
    pub location_format: String,
    /// Column at which failure details wrap; 0 disables wrapping
    pub wrap_column: usize,
    /// Print one progress marker per test while running
    pub progress: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            location_format: DEFAULT_LOCATION_FORMAT.to_string(),
            wrap_column: DEFAULT_WRAP_COLUMN,
            progress: true,
        }
    }
}

impl ReportConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the failure location prefix
    pub fn with_location_format(mut self, format: impl Into<String>) -> Self {
        self.location_format = format.into();
        self
    }

    /// Set the wrap column for failure details
    pub fn with_wrap_column(mut self, column: usize) -> Self {
        self.wrap_column = column;
        self
    }

    /// Enable or disable progress markers
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Build the outputter this configuration describes
    pub fn outputter(&self) -> CompilerOutputter {
        CompilerOutputter::new()
            .with_location_format(self.location_format.clone())
            .with_wrap_column(self.wrap_column)
    }
}
