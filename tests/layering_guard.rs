//! Layering guardrails for the driver and its plugin-facing crate.
//!
//! - The driver (`plugtest` crate) may only use the test plugins (`plugtest_sample`, `plugtest_faulty`) as
//!   **dev-dependencies**. Real plugins are loaded at run time, never linked.
//! - `plugtest_core` is linked into every plugin, so it must stay free of the driver's CLI and loading stack.

/// Entries of the `[dependencies]` table in `manifest`.
fn main_dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            if line == "[dependencies]" {
                in_dependencies = true;
                continue;
            }
            // Any new section after `[dependencies]` ends the scan window.
            if in_dependencies {
                break;
            }
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some(name) = line_no_comment.split('=').next() {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn driver_does_not_link_test_plugins() {
    let deps = main_dependencies(include_str!("../Cargo.toml"));
    assert!(deps.iter().any(|d| d == "plugtest_core"));
    for plugin in ["plugtest_sample", "plugtest_faulty"] {
        assert!(
            !deps.iter().any(|d| d == plugin),
            "`{}` must not appear in [dependencies]; use [dev-dependencies] instead",
            plugin
        );
    }
}

#[test]
fn core_stays_free_of_driver_stack() {
    let deps = main_dependencies(include_str!("../crates/plugtest_core/Cargo.toml"));
    for forbidden in ["clap", "libloading", "tracing-subscriber"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{}` must not appear in plugtest_core's [dependencies]",
            forbidden
        );
    }
}
