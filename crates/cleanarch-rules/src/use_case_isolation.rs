//! Use-case isolation rule: no lateral use-case-to-use-case calls.
//!
//! A use case may freely reference its request/response contracts and
//! exception types, but never another use-case unit. Contract traffic is
//! recognized by the target package's last segment.

use cleanarch_core::{
    pattern::{last_segment, resides_in_any},
    DependencyGraph, PackagePattern, PatternError, Rule, Severity, UnitPredicate, Violation,
};

/// Rule code for use-case-isolation.
pub const CODE: &str = "CA004";

/// Rule name for use-case-isolation.
pub const NAME: &str = "use-case-isolation";

/// Package segments whose targets are contract/exception traffic, exempt
/// from the isolation check.
const EXEMPT_SEGMENTS: &[&str] = &["request", "response", "exception"];

/// Use cases must not call other use cases.
#[derive(Debug, Clone)]
pub struct UseCaseIsolation {
    scope: UnitPredicate,
    application: Vec<PackagePattern>,
}

impl UseCaseIsolation {
    /// Creates the rule for the given application-business package pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid.
    pub fn new(application_package: &str) -> Result<Self, PatternError> {
        Ok(Self {
            scope: UnitPredicate::resides_in(&[application_package])?,
            application: vec![PackagePattern::new(application_package)?],
        })
    }
}

impl Rule for UseCaseIsolation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Use cases may not depend on other use cases"
    }

    fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for unit in self.scope.select(graph) {
            for edge in &unit.edges {
                if edge.builtin || edge.target == unit.name {
                    continue;
                }
                if EXEMPT_SEGMENTS.contains(&last_segment(&edge.target_package)) {
                    continue;
                }
                if resides_in_any(&edge.target_package, &self.application) {
                    violations.push(
                        Violation::new(
                            CODE,
                            NAME,
                            Severity::Error,
                            &unit.name,
                            format!("`{}` calls use case `{}`", unit.name, edge.target),
                        )
                        .at(edge.location.clone()),
                    );
                }
            }
        }
        violations
    }
}
