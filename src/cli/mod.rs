//! CLI module for the plugtest driver
//!
//! This module provides the command-line interface:
//!
//! ```text
//! plugtest [OPTIONS] <MODULE> [TEST_PATH]...
//! ```
//!
//! ## Modules
//!
//! - `config` - Report settings derived from the command line
//! - `loader` - Dynamic library loading behind a trait
//! - `test_runner` - Load, select, execute, report, unload
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod loader;
pub mod test_runner;

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use plugtest_core::outputter::{DEFAULT_LOCATION_FORMAT, DEFAULT_WRAP_COLUMN};

use crate::version::PLUGTEST_VERSION;
use config::ReportConfig;
use loader::DylibLoader;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
/// An empty message means the details were already written.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the unit tests packaged in a test plugin module
#[derive(Parser, Debug)]
#[command(name = "plugtest")]
#[command(version = PLUGTEST_VERSION)]
#[command(about = "Run the unit tests packaged in a test plugin module", long_about = None)]
pub struct Cli {
    /// Dynamic library exporting `get_test_plugin_interface`
    #[arg(value_name = "MODULE")]
    pub module: PathBuf,

    /// Tests to run, e.g. `Suite/test` or `/Root/Suite` (default: the whole suite).
    /// Paths starting with `-` go after `--`
    #[arg(value_name = "TEST_PATH")]
    pub test_paths: Vec<OsString>,

    /// Failure location prefix: %p path, %f file name, %l line
    #[arg(long, value_name = "FORMAT", default_value = DEFAULT_LOCATION_FORMAT)]
    pub location_format: String,

    /// Wrap failure details at this column (0 disables wrapping)
    #[arg(long, value_name = "COLUMN", default_value_t = DEFAULT_WRAP_COLUMN)]
    pub wrap_column: usize,

    /// Do not print per-test progress markers
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Report settings selected on the command line.
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig::new()
            .with_location_format(self.location_format.clone())
            .with_wrap_column(self.wrap_column)
            .with_progress(!self.no_progress)
    }

    /// Test paths as text. Non-UTF-8 bytes are replaced, so such a path simply fails to resolve.
    pub fn test_path_strings(&self) -> Vec<String> {
        self.test_paths
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect()
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    // Panics are reported as driver diagnostics; keep the default hook's output out of the report.
    panic::set_hook(Box::new(|info| {
        tracing::debug!("panic: {}", info);
    }));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors
            let exit_code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            let _ = e.print();
            process::exit(exit_code.0);
        }
    };

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute a parsed command line and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.report_config();
    let test_paths = cli.test_path_strings();
    let mut err = io::stderr().lock();
    test_runner::run_plugin_tests(&DylibLoader, &cli.module, &test_paths, &config, &mut err)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_module_only() {
        let cli = Cli::try_parse_from(["plugtest", "libtests.so"]).unwrap();
        assert_eq!(cli.module, PathBuf::from("libtests.so"));
        assert!(cli.test_paths.is_empty());
        assert_eq!(cli.report_config(), ReportConfig::new());
    }

    #[test]
    fn test_cli_parse_test_paths_keep_order() {
        let cli = Cli::try_parse_from(["plugtest", "libtests.so", "Math/add", "/All/Strings", "Math/add"]).unwrap();
        assert_eq!(cli.test_path_strings(), vec!["Math/add", "/All/Strings", "Math/add"]);
    }

    #[test]
    fn test_cli_parse_hyphenated_paths_after_separator() {
        let cli = Cli::try_parse_from(["plugtest", "--no-progress", "libtests.so", "--", "-odd/name", "--wrap-column"])
            .unwrap();
        assert_eq!(cli.test_path_strings(), vec!["-odd/name", "--wrap-column"]);
        assert!(cli.no_progress);
        assert_eq!(cli.wrap_column, DEFAULT_WRAP_COLUMN);
    }

    #[test]
    fn test_cli_hyphenated_path_without_separator_is_an_option() {
        let err = Cli::try_parse_from(["plugtest", "libtests.so", "-odd/name"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_cli_parse_report_options() {
        let cli = Cli::try_parse_from([
            "plugtest",
            "--location-format",
            "%f(%l) : ",
            "--wrap-column",
            "0",
            "--no-progress",
            "libtests.so",
        ])
        .unwrap();
        let config = cli.report_config();
        assert_eq!(config.location_format, "%f(%l) : ");
        assert_eq!(config.wrap_column, 0);
        assert!(!config.progress);
    }

    #[test]
    fn test_cli_requires_module() {
        let err = Cli::try_parse_from(["plugtest"]).unwrap_err();
        assert!(err.use_stderr());
        assert!(err.to_string().contains("Usage"));
    }

    #[test]
    fn test_cli_version_is_not_an_error() {
        let err = Cli::try_parse_from(["plugtest", "--version"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_cli_error_display() {
        let err = CliError::failure("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
