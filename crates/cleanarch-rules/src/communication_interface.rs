//! Communication-through-interface rule.
//!
//! The core talks to the adapters only through ports, so every unit in the
//! designated communication package must be an interface; concrete types
//! living there leak implementation into the boundary.

use cleanarch_core::{
    DependencyGraph, PatternError, Rule, Severity, UnitKind, UnitPredicate, Violation,
};

/// Rule code for communication-through-interface.
pub const CODE: &str = "CA006";

/// Rule name for communication-through-interface.
pub const NAME: &str = "communication-through-interface";

/// Ports between core and adapters must be interfaces.
#[derive(Debug, Clone)]
pub struct CommunicationThroughInterface {
    scope: UnitPredicate,
}

impl CommunicationThroughInterface {
    /// Creates the rule for the given communication package pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid.
    pub fn new(communication_package: &str) -> Result<Self, PatternError> {
        Ok(Self {
            scope: UnitPredicate::resides_in(&[communication_package])?,
        })
    }
}

impl Rule for CommunicationThroughInterface {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Units in the communication package must be interfaces"
    }

    fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
        self.scope
            .select(graph)
            .into_iter()
            .filter(|unit| unit.kind != UnitKind::Interface)
            .map(|unit| {
                Violation::new(
                    CODE,
                    NAME,
                    Severity::Error,
                    &unit.name,
                    format!(
                        "`{}` lives in the communication package but is not an interface",
                        unit.name
                    ),
                )
            })
            .collect()
    }
}
