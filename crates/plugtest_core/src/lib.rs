//! Provide the test tree, run controller and report outputter shared by the `plugtest` driver and its plugins.
//!
//! A plugin is a dynamic library that links against this crate, builds a tree of [`TestCase`]s and
//! [`TestSuite`]s, and exposes it through [`export_test_plugin!`]. The driver loads the library, asks the
//! plugin for its root [`Test`], narrows it with [`TestPath`] and runs the selection through a [`TestRunner`].
//!
//! ## Notes
//!
//! - The plugin entry point uses the Rust ABI. Driver and plugin must be built by the same toolchain against the
//!   same version of this crate.
//! - Everything here is synchronous. Tests run one after another on the calling thread.

pub mod collector;
pub mod failure;
pub mod outputter;
pub mod path;
pub mod plugin;
pub mod progress;
pub mod result;
pub mod runner;
pub mod test;

pub use collector::{TestResultCollector, TestSummary};
pub use failure::{Failure, Message, SourceLine, TestFailure, TestOutcome};
pub use outputter::CompilerOutputter;
pub use path::{PathError, TestPath};
pub use plugin::{PLUGIN_ENTRY_SYMBOL, PlugInEntryPoint, TestPlugIn};
pub use progress::TextTestProgressListener;
pub use result::{TestListener, TestResult, panic_message};
pub use runner::TestRunner;
pub use test::{Test, TestCase, TestSuite, find_test};
