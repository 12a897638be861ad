#![deny(unsafe_code)]
//! Plugin Test Driver
//!
//! `plugtest` loads a dynamic library that packages unit tests (a test plugin), runs all of them or the ones
//! named on the command line, and prints a compiler-style report. Plugins are built against `plugtest_core`
//! and export their suite with `plugtest_core::export_test_plugin!`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Plugin code**: Panics raised by a plugin are caught. Inside a test they become test errors; anywhere else
//!   they end the run with an "unexpected panic" diagnostic.
//!
//! ## Unsafe Code
//!
//! Denied crate-wide. `cli::loader` is the one exception: opening a library and looking up its entry point.

pub mod cli;
pub mod version;
