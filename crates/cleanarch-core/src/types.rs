//! Core types for conformance violations and check results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for conformance violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail the check.
    Info,
    /// Warning that should be addressed (e.g., ambiguous configuration).
    Warning,
    /// Error that fails the check.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location of a dependency, as reported by the graph builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the analyzed project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A conformance violation found during rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "CA001").
    pub code: String,
    /// Rule name (e.g., "layered-architecture").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Fully qualified name of the implicated unit.
    pub unit: String,
    /// Human-readable message.
    pub message: String,
    /// Source location of the offending dependency, when one exists.
    ///
    /// Unit-level findings (e.g., a wrongly named type) carry no location
    /// because the graph snapshot records locations only on edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Violation {
    /// Creates a new violation without a source location.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        unit: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            unit: unit.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Attaches the source location of the offending edge.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} on `{}`\n", self.code, self.rule, self.unit);
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(location) = &self.location {
            let _ = writeln!(output, "  at {location}");
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] `{}`: {}",
            self.severity, self.code, self.unit, self.message
        )?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

/// Overall outcome of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No error-severity violations were found.
    Pass,
    /// At least one error-severity violation was found.
    Fail,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Result of evaluating a set of rules against one graph snapshot.
///
/// Violations are kept in rule-declaration order, then in the order each
/// rule produced them, so output is reproducible across runs.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CheckResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of rules evaluated.
    pub rules_run: usize,
}

impl CheckResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the overall verdict.
    ///
    /// Warning and info violations (e.g., configuration diagnostics) do not
    /// fail the check on their own.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        if self.has_violations_at(Severity::Error) {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Returns violations produced by one rule, in output order.
    #[must_use]
    pub fn by_rule(&self, rule_name: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.rule == rule_name)
            .collect()
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for v in &self.violations {
            match v.severity {
                Severity::Error => counts.0 += 1,
                Severity::Warning => counts.1 += 1,
                Severity::Info => counts.2 += 1,
            }
        }
        counts
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.rules_run += other.rules_run;
    }

    /// Formats violations as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&Violation> = self
            .violations
            .iter()
            .filter(|v| v.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== cleanarch: {} violation(s) ===\n",
            failing.len()
        );

        for v in &failing {
            let _ = writeln!(report, "{} [{}] `{}`", v.rule, v.code, v.unit);
            let _ = writeln!(report, "  {}: {}", v.severity, v.message);
            if let Some(location) = &v.location {
                let _ = writeln!(report, "  at {location}");
            }
            let _ = writeln!(report);
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {errors} error(s), {warnings} warning(s), {infos} info(s) across {} rule(s)",
            self.rules_run
        );

        report
    }
}
