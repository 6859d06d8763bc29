//! Private-constructor rule for entities.
//!
//! Entities are constructed through factories or named constructors, so
//! every unit in the core package must report fully private constructor
//! visibility. The `..exception..` sub-package is excluded: exception types
//! follow the platform's constructor conventions.

use cleanarch_core::{
    ConstructorVisibility, DependencyGraph, PatternError, Rule, Severity, UnitPredicate, Violation,
};

/// Rule code for private-entity-constructor.
pub const CODE: &str = "CA003";

/// Rule name for private-entity-constructor.
pub const NAME: &str = "private-entity-constructor";

/// Entities should not have public constructors.
#[derive(Debug, Clone)]
pub struct PrivateEntityConstructor {
    scope: UnitPredicate,
}

impl PrivateEntityConstructor {
    /// Creates the rule for the given core package pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid.
    pub fn new(core_package: &str) -> Result<Self, PatternError> {
        Ok(Self {
            scope: UnitPredicate::resides_in(&[core_package])?
                .and(UnitPredicate::resides_outside(&["..exception.."])?),
        })
    }
}

impl Rule for PrivateEntityConstructor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Entities outside the exception sub-package must have only private constructors"
    }

    fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
        self.scope
            .select(graph)
            .into_iter()
            .filter(|unit| unit.constructors != ConstructorVisibility::Private)
            .map(|unit| {
                let visibility = match unit.constructors {
                    ConstructorVisibility::Public => "public",
                    ConstructorVisibility::Mixed => "mixed",
                    ConstructorVisibility::Private => unreachable!("filtered above"),
                };
                Violation::new(
                    CODE,
                    NAME,
                    Severity::Error,
                    &unit.name,
                    format!("entity has {visibility} constructor visibility; only private is allowed"),
                )
            })
            .collect()
    }
}
