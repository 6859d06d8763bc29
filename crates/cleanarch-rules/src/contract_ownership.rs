//! Contract-ownership rule: a request/response type belongs to one use case.
//!
//! A contract in `<owner>.request` (or `.response`) must be referenced from
//! exactly one place under the `<owner>` package. Shared contracts couple
//! use cases together; unreferenced contracts are dead weight. Both are
//! flagged.

use cleanarch_core::{
    pattern::is_prefix_of, DependencyGraph, PatternError, Rule, Severity, UnitPredicate, Violation,
};

/// Rule code for contract-ownership.
pub const CODE: &str = "CA005";

/// The two contract flavors this rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    /// Input contracts in a `request` sub-package.
    Request,
    /// Output contracts in a `response` sub-package.
    Response,
}

impl ContractKind {
    /// The package segment housing this contract flavor.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }

    /// The residency pattern for this contract flavor.
    #[must_use]
    pub fn residency_pattern(self) -> &'static str {
        match self {
            Self::Request => "..request..",
            Self::Response => "..response..",
        }
    }

    /// The required simple-name suffix for this contract flavor.
    #[must_use]
    pub fn name_suffix(self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Response => "Response",
        }
    }
}

/// Contracts must be used by exactly one use case.
#[derive(Debug, Clone)]
pub struct ContractOwnership {
    kind: ContractKind,
    scope: UnitPredicate,
}

impl ContractOwnership {
    /// Creates the rule for one contract flavor within the application
    /// package.
    ///
    /// # Errors
    ///
    /// Returns an error if the application pattern is invalid.
    pub fn new(kind: ContractKind, application_package: &str) -> Result<Self, PatternError> {
        Ok(Self {
            kind,
            scope: UnitPredicate::resides_in(&[application_package])?
                .and(UnitPredicate::resides_in(&[kind.residency_pattern()])?),
        })
    }

    /// Request-contract variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the application pattern is invalid.
    pub fn request(application_package: &str) -> Result<Self, PatternError> {
        Self::new(ContractKind::Request, application_package)
    }

    /// Response-contract variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the application pattern is invalid.
    pub fn response(application_package: &str) -> Result<Self, PatternError> {
        Self::new(ContractKind::Response, application_package)
    }

    /// Strips everything from the contract segment onwards, yielding the
    /// owning use-case package: `app.usecase.order.request` →
    /// `app.usecase.order`.
    fn owner_package(&self, package: &str) -> Option<String> {
        let segments: Vec<&str> = package.split('.').collect();
        let position = segments.iter().rposition(|s| *s == self.kind.segment())?;
        if position == 0 {
            return None;
        }
        Some(segments[..position].join("."))
    }
}

impl Rule for ContractOwnership {
    fn name(&self) -> &'static str {
        match self.kind {
            ContractKind::Request => "request-contract-ownership",
            ContractKind::Response => "response-contract-ownership",
        }
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Request/response contracts must be used by exactly one use case"
    }

    fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for unit in self.scope.select(graph) {
            // A contract package without the expected segment cannot be
            // attributed to an owner; skip rather than guess.
            let Some(owner) = self.owner_package(&unit.package) else {
                continue;
            };

            let usages: Vec<_> = graph
                .inbound(&unit.name)
                .iter()
                .filter(|dep| is_prefix_of(&owner, &dep.origin_package))
                .collect();

            if usages.len() == 1 {
                continue;
            }

            let message = if usages.is_empty() {
                format!(
                    "{} contract `{}` is never used by its use case (`{owner}`)",
                    self.kind.segment(),
                    unit.name
                )
            } else {
                let locations: Vec<String> =
                    usages.iter().map(|d| d.location.to_string()).collect();
                format!(
                    "{} contract `{}` is used in {} places under `{owner}`: {}",
                    self.kind.segment(),
                    unit.name,
                    usages.len(),
                    locations.join(", ")
                )
            };

            let mut violation = Violation::new(CODE, self.name(), Severity::Error, &unit.name, message);
            if let Some(first) = usages.first() {
                violation = violation.at(first.location.clone());
            }
            violations.push(violation);
        }
        violations
    }
}
