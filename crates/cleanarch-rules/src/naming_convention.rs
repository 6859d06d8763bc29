//! Contract naming rule.
//!
//! Units in a `request` package must carry the `Request` suffix and units
//! in a `response` package the `Response` suffix, so a contract's role is
//! readable from its name alone. Helper enums under an `enums` subpackage
//! are exempt.

use cleanarch_core::{DependencyGraph, PatternError, Rule, Severity, UnitPredicate, Violation};

use crate::contract_ownership::ContractKind;

/// Rule code for contract naming.
pub const CODE: &str = "CA007";

/// Contracts must be named after the package they live in.
#[derive(Debug, Clone)]
pub struct ContractNaming {
    kind: ContractKind,
    scope: UnitPredicate,
}

impl ContractNaming {
    /// Creates the naming rule for one contract kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in patterns fail to compile, which
    /// would be a bug rather than a configuration problem.
    pub fn new(kind: ContractKind) -> Result<Self, PatternError> {
        let scope = UnitPredicate::resides_in(&[kind.residency_pattern()])?
            .and(UnitPredicate::resides_outside(&["..enums.."])?);
        Ok(Self { kind, scope })
    }

    /// Naming rule for request contracts.
    ///
    /// # Errors
    ///
    /// See [`ContractNaming::new`].
    pub fn request() -> Result<Self, PatternError> {
        Self::new(ContractKind::Request)
    }

    /// Naming rule for response contracts.
    ///
    /// # Errors
    ///
    /// See [`ContractNaming::new`].
    pub fn response() -> Result<Self, PatternError> {
        Self::new(ContractKind::Response)
    }
}

impl Rule for ContractNaming {
    fn name(&self) -> &'static str {
        match self.kind {
            ContractKind::Request => "request-naming",
            ContractKind::Response => "response-naming",
        }
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Contracts must be named after the package they live in"
    }

    fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
        let suffix = self.kind.name_suffix();
        self.scope
            .select(graph)
            .into_iter()
            .filter(|unit| !unit.simple_name().ends_with(suffix))
            .map(|unit| {
                Violation::new(
                    CODE,
                    self.name(),
                    Severity::Error,
                    &unit.name,
                    format!(
                        "`{}` lives in a {} package but its name does not end with `{suffix}`",
                        unit.name,
                        self.kind.segment(),
                    ),
                )
            })
            .collect()
    }
}
