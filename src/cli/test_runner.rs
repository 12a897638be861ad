//! Plugin test driver
//!
//! Loads a plugin module, asks it for its root test, narrows the tree to the requested test paths, runs the
//! selection and prints a compiler-style report.
//!
//! ## Flow
//!
//! ```text
//! load module -> resolve entry point -> make root test -> select -> execute -> report -> unload
//! ```
//!
//! Any failure skips the remaining forward steps, prints a one-line diagnostic and still unloads the module.
//! The module is owned by [`run_plugin_tests`]; everything borrowed from it (plugin interface, test tree) is
//! lifetime-bound to it, so the unload always happens last.
//!
//! ## I/O Boundaries
//!
//! Module loading is abstracted via [`ModuleLoader`] in `loader.rs`; diagnostics and the report go to a caller
//! supplied writer (standard error in the binary).

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use plugtest_core::{
    PathError, Test, TestPath, TestResult, TestResultCollector, TestRunner, TestSummary, TextTestProgressListener,
    panic_message,
};
use thiserror::Error;

use super::config::ReportConfig;
use super::loader::{LoadError, LoadedModule, ModuleLoader};
use super::{CliError, CliResult, ExitCode};

/// Failures that end a run before a report can be produced.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to resolve test path: {path}")]
    PathResolution {
        path: String,
        #[source]
        source: PathError,
    },

    #[error(
        "Unexpected panic when running tests. You should report this and the context which produced the panic:\n{message}"
    )]
    UnexpectedFault { message: String },
}

/// Run the tests of the plugin module at `module_path`.
///
/// `test_paths` narrows the run; an empty list runs the module's whole suite. Progress, diagnostics and the
/// report are written to `err`. Returns success only if every step succeeded and every executed test passed.
pub fn run_plugin_tests(
    loader: &dyn ModuleLoader,
    module_path: &Path,
    test_paths: &[String],
    config: &ReportConfig,
    err: &mut dyn Write,
) -> CliResult<ExitCode> {
    tracing::debug!(module = %module_path.display(), paths = ?test_paths, "starting plugin test run");

    let module = match loader.load(module_path) {
        Ok(module) => module,
        Err(e) => {
            report_error(err, &DriverError::from(e));
            return Err(CliError::new("", ExitCode::FAILURE));
        }
    };

    let outcome = run_module(module.as_ref(), test_paths, config, err);
    let exit = match outcome {
        Ok(summary) if summary.was_successful() => Ok(ExitCode::SUCCESS),
        // Tests failed - the report already says so
        Ok(_) => Err(CliError::new("", ExitCode::FAILURE)),
        Err(e) => {
            report_error(err, &e);
            Err(CliError::new("", ExitCode::FAILURE))
        }
    };

    drop(module);
    exit
}

/// Everything that happens while the module is loaded.
fn run_module(
    module: &dyn LoadedModule,
    test_paths: &[String],
    config: &ReportConfig,
    err: &mut dyn Write,
) -> Result<TestSummary, DriverError> {
    let factory = module.resolve_factory()?;
    tracing::debug!(module = %module.path().display(), "entry point resolved");

    // Plugin code runs under the plugin's own panic runtime; `TestPlugIn` hands its panics back as messages.
    // The outer catch covers panics raised by the driver itself.
    panic::catch_unwind(AssertUnwindSafe(|| -> Result<TestSummary, DriverError> {
        let plugin = factory.invoke().map_err(unexpected_fault)?;
        plugin.set_panic_hook(Box::new(|report: &str| tracing::debug!("panic in plugin: {}", report)));

        let root = plugin.try_make_test().map_err(unexpected_fault)?;
        tracing::debug!(root = root.name(), "suite obtained");

        let mut collected = Ok(TestResultCollector::new());
        plugin
            .protect(&mut || {
                collected = select_tests(root, test_paths).map(|tests| execute(&tests, config, err));
            })
            .map_err(unexpected_fault)?;
        let collector = collected?;

        report(&collector, config, err);
        Ok(collector.summary())
    }))
    .unwrap_or_else(|payload| Err(unexpected_fault(panic_message(payload.as_ref()))))
}

fn unexpected_fault(message: String) -> DriverError {
    DriverError::UnexpectedFault { message }
}

/// Resolve `paths` against `root`, in order.
///
/// No paths selects `root` itself. The first path that does not resolve aborts the selection.
pub fn select_tests<'t>(root: &'t dyn Test, paths: &[String]) -> Result<Vec<&'t dyn Test>, DriverError> {
    if paths.is_empty() {
        return Ok(vec![root]);
    }

    paths
        .iter()
        .map(|path| {
            let resolved = TestPath::resolve(root, path).map_err(|source| DriverError::PathResolution {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(requested = %path, resolved = %resolved, "test path resolved");
            Ok(resolved.child_test())
        })
        .collect()
}

/// Run `tests` one after another, printing progress markers if configured.
pub fn execute(tests: &[&dyn Test], config: &ReportConfig, err: &mut dyn Write) -> TestResultCollector {
    let mut runner = TestRunner::new();
    for test in tests {
        runner.add_test(*test);
    }

    let mut collector = TestResultCollector::new();
    {
        let mut progress = if config.progress {
            Some(TextTestProgressListener::new(&mut *err))
        } else {
            None
        };
        let mut controller = TestResult::new();
        controller.add_listener(&mut collector);
        if let Some(progress) = progress.as_mut() {
            controller.add_listener(progress);
        }
        runner.run(&mut controller);
    }

    tracing::debug!(run = collector.run_tests(), failures = collector.test_failures_total(), "run finished");
    collector
}

/// Write the compiler-style report for `collector`.
pub fn report(collector: &TestResultCollector, config: &ReportConfig, err: &mut dyn Write) {
    let written = writeln!(err).and_then(|()| config.outputter().write(collector, err));
    if let Err(e) = written {
        tracing::warn!(error = %e, "failed to write test report");
    }
}

/// Print `error` and its causes on one line.
fn report_error(err: &mut dyn Write, error: &DriverError) {
    let mut line = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        line.push_str(": ");
        line.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    if writeln!(err, "{}", line).is_err() {
        tracing::warn!(error = %line, "failed to write diagnostic");
    }
}

// ============================================================================
// Tests
// ============================================================================
