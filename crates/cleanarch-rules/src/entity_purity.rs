//! Entity-purity rule: entities depend on nothing outside the core.
//!
//! Units in the enterprise-business package may only depend on the core
//! package itself plus an explicitly accepted list of external packages.
//! Language/platform builtins are exempt via the edge flag.

use cleanarch_core::{
    pattern::resides_in_any, DependencyGraph, PackagePattern, PatternError, Rule, Severity,
    UnitPredicate, Violation,
};

/// Rule code for entity-purity.
pub const CODE: &str = "CA002";

/// Rule name for entity-purity.
pub const NAME: &str = "entity-purity";

/// Entities must not depend on any lib or framework.
#[derive(Debug, Clone)]
pub struct EntityPurity {
    scope: UnitPredicate,
    accepted: Vec<PackagePattern>,
}

impl EntityPurity {
    /// Creates the rule for the given core package pattern.
    ///
    /// `accepted_dependencies` extends the allow-list beyond the core
    /// package itself.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid.
    pub fn new(core_package: &str, accepted_dependencies: &[&str]) -> Result<Self, PatternError> {
        let mut accepted = vec![PackagePattern::new(core_package)?];
        accepted.extend(PackagePattern::compile_all(accepted_dependencies)?);
        Ok(Self {
            scope: UnitPredicate::resides_in(&[core_package])?,
            accepted,
        })
    }
}

impl Rule for EntityPurity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Entities may only depend on the core package and accepted dependencies"
    }

    fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for unit in self.scope.select(graph) {
            for edge in &unit.edges {
                if edge.builtin {
                    continue;
                }
                if !resides_in_any(&edge.target_package, &self.accepted) {
                    violations.push(
                        Violation::new(
                            CODE,
                            NAME,
                            Severity::Error,
                            &unit.name,
                            format!(
                                "entity depends on `{}`, which is outside the accepted \
                                 entity dependencies",
                                edge.target
                            ),
                        )
                        .at(edge.location.clone()),
                    );
                }
            }
        }
        violations
    }
}
