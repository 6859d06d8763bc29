//! Test-harness entry points for running the clean architecture check.
//!
//! Conformance suites call [`assert_clean_architecture`] from a `cargo
//! test` target; it panics with a formatted report when the verdict is
//! Fail. Programmatic callers use [`run_check`] and inspect the
//! [`CheckResult`] themselves.

use std::path::{Path, PathBuf};

use cleanarch_core::{ArchConfig, CheckResult, Checker, ConfigError, DependencyGraph, Severity};
use cleanarch_rules::{clean_architecture_rules, PresetError};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["cleanarch.toml", ".cleanarch.toml"];

/// Runs the full clean architecture rule set over a dependency graph.
///
/// # Errors
///
/// Returns an error if the configured patterns do not assemble into a
/// valid rule set.
pub fn run_check(graph: &DependencyGraph, config: &ArchConfig) -> Result<CheckResult, PresetError> {
    let checker = Checker::builder()
        .rule_boxes(clean_architecture_rules(config)?)
        .build();
    Ok(checker.check(graph))
}

/// Runs the full rule set and panics with a report on failure.
///
/// Meant to be called from a test function so that architectural drift
/// fails `cargo test`.
///
/// # Panics
///
/// Panics if the rule set cannot be assembled or if any error-severity
/// violation is found.
pub fn assert_clean_architecture(graph: &DependencyGraph, config: &ArchConfig) {
    let result = run_check(graph, config).unwrap_or_else(|e| {
        panic!("cleanarch: failed to assemble rule set: {e}");
    });
    if result.has_violations_at(Severity::Error) {
        let report = result.format_test_report(Severity::Error);
        panic!("{report}");
    }
}

/// Loads configuration from the first candidate file under `root`.
///
/// Searches `cleanarch.toml`, then `.cleanarch.toml`.
///
/// # Errors
///
/// Returns an error if no candidate file exists or the file found does
/// not parse and validate.
pub fn load_config(root: &Path) -> Result<ArchConfig, ConfigError> {
    let path = discover_config(root).ok_or_else(|| ConfigError::Io {
        path: root.join(CONFIG_CANDIDATES[0]),
        source: std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no cleanarch.toml or .cleanarch.toml found",
        ),
    })?;
    ArchConfig::from_file(&path)
}

/// Returns the first existing config candidate under `root`, if any.
#[must_use]
pub fn discover_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())
}

/// Finds the project root by walking up from `CARGO_MANIFEST_DIR` to the
/// workspace `Cargo.toml`, falling back to the manifest dir itself.
#[must_use]
pub fn find_project_root() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        return manifest_path;
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Checks whether a `Cargo.toml` defines a `[workspace]` section by
/// parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}
