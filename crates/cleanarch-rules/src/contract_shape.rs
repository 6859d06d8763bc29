//! Contract shape rule.
//!
//! Request and response contracts are plain data carriers, so every unit
//! in a contract package must be record-like. Classes with behavior or
//! interfaces do not belong there.

use cleanarch_core::{
    DependencyGraph, PatternError, Rule, Severity, UnitKind, UnitPredicate, Violation,
};

/// Rule code for contracts-are-records.
pub const CODE: &str = "CA008";

/// Rule name for contracts-are-records.
pub const NAME: &str = "contracts-are-records";

/// Contracts must be record-like data carriers.
#[derive(Debug, Clone)]
pub struct ContractsAreRecords {
    scope: UnitPredicate,
}

impl ContractsAreRecords {
    /// Creates the rule over both request and response packages.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in patterns fail to compile.
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            scope: UnitPredicate::resides_in(&["..request..", "..response.."])?,
        })
    }
}

impl Rule for ContractsAreRecords {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Request and response contracts must be record-like"
    }

    fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
        self.scope
            .select(graph)
            .into_iter()
            .filter(|unit| unit.kind != UnitKind::RecordLike)
            .map(|unit| {
                Violation::new(
                    CODE,
                    NAME,
                    Severity::Error,
                    &unit.name,
                    format!("contract `{}` is not record-like", unit.name),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanarch_core::{ConstructorVisibility, Unit};

    fn check(units: Vec<Unit>) -> Vec<Violation> {
        let mut builder = DependencyGraph::builder();
        for unit in units {
            builder = builder.unit(unit);
        }
        ContractsAreRecords::new().unwrap().check(&builder.build().unwrap())
    }

    fn unit(name: &str, package: &str, kind: UnitKind) -> Unit {
        Unit::new(name, package, kind, ConstructorVisibility::Public)
    }

    #[test]
    fn record_contracts_pass() {
        let units = vec![
            unit(
                "app.usecase.order.request.PlaceOrderRequest",
                "app.usecase.order.request",
                UnitKind::RecordLike,
            ),
            unit(
                "app.usecase.order.response.PlaceOrderResponse",
                "app.usecase.order.response",
                UnitKind::RecordLike,
            ),
        ];
        assert!(check(units).is_empty());
    }

    #[test]
    fn class_contract_violates() {
        let units = vec![unit(
            "app.usecase.order.request.PlaceOrderRequest",
            "app.usecase.order.request",
            UnitKind::Class,
        )];
        let violations = check(units);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("not record-like"));
    }

    #[test]
    fn interface_contract_violates() {
        let units = vec![unit(
            "app.usecase.order.response.PlaceOrderResponse",
            "app.usecase.order.response",
            UnitKind::Interface,
        )];
        assert_eq!(check(units).len(), 1);
    }

    #[test]
    fn enums_inside_contract_packages_are_in_scope() {
        // Helper enums stay record-like too, so no exemption is needed.
        let units = vec![unit(
            "app.usecase.order.request.enums.Status",
            "app.usecase.order.request.enums",
            UnitKind::Class,
        )];
        assert_eq!(check(units).len(), 1);
    }

    #[test]
    fn classes_elsewhere_are_out_of_scope() {
        let units = vec![unit(
            "app.usecase.order.Handler",
            "app.usecase.order",
            UnitKind::Class,
        )];
        assert!(check(units).is_empty());
    }
}
