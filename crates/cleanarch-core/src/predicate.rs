//! Composable unit predicates for rule scoping.
//!
//! Every rule determines its input scope by filtering the immutable unit
//! list through a [`UnitPredicate`]. Predicates are a closed set of
//! variants combined with `and`/`or`; evaluation is a pure function of the
//! unit with no side effects.

use crate::graph::{DependencyGraph, Unit, UnitKind};
use crate::pattern::{resides_in_any, PackagePattern, PatternError};

/// A predicate over units, built from residency and kind checks.
#[derive(Debug, Clone)]
pub enum UnitPredicate {
    /// Unit's package matches at least one of the patterns.
    ResidesIn(Vec<PackagePattern>),
    /// Unit's package matches none of the patterns.
    ResidesOutside(Vec<PackagePattern>),
    /// Unit is of the given kind.
    IsKind(UnitKind),
    /// All sub-predicates hold.
    All(Vec<UnitPredicate>),
    /// At least one sub-predicate holds.
    Any(Vec<UnitPredicate>),
}

impl UnitPredicate {
    /// Predicate: unit resides in any of the given package patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid.
    pub fn resides_in(patterns: &[&str]) -> Result<Self, PatternError> {
        Ok(Self::ResidesIn(PackagePattern::compile_all(patterns)?))
    }

    /// Predicate: unit resides outside all of the given package patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid.
    pub fn resides_outside(patterns: &[&str]) -> Result<Self, PatternError> {
        Ok(Self::ResidesOutside(PackagePattern::compile_all(patterns)?))
    }

    /// Predicate: unit is of the given kind.
    #[must_use]
    pub fn is_kind(kind: UnitKind) -> Self {
        Self::IsKind(kind)
    }

    /// Combines two predicates with logical AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::All(mut preds) => {
                preds.push(other);
                Self::All(preds)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Combines two predicates with logical OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Any(mut preds) => {
                preds.push(other);
                Self::Any(preds)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    /// Evaluates the predicate against one unit.
    #[must_use]
    pub fn eval(&self, unit: &Unit) -> bool {
        match self {
            Self::ResidesIn(patterns) => resides_in_any(&unit.package, patterns),
            Self::ResidesOutside(patterns) => !resides_in_any(&unit.package, patterns),
            Self::IsKind(kind) => unit.kind == *kind,
            Self::All(preds) => preds.iter().all(|p| p.eval(unit)),
            Self::Any(preds) => preds.iter().any(|p| p.eval(unit)),
        }
    }

    /// Selects the units matching this predicate, in graph order.
    #[must_use]
    pub fn select<'g>(&self, graph: &'g DependencyGraph) -> Vec<&'g Unit> {
        graph.units().iter().filter(|u| self.eval(u)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ConstructorVisibility;

    fn unit(name: &str, package: &str, kind: UnitKind) -> Unit {
        Unit::new(name, package, kind, ConstructorVisibility::Public)
    }

    fn sample_graph() -> DependencyGraph {
        DependencyGraph::builder()
            .unit(unit("core.Order", "core", UnitKind::Class))
            .unit(unit(
                "app.usecase.order.request.OrderRequest",
                "app.usecase.order.request",
                UnitKind::RecordLike,
            ))
            .unit(unit(
                "app.usecase.order.request.enums.Status",
                "app.usecase.order.request.enums",
                UnitKind::Class,
            ))
            .unit(unit(
                "adapters.port.Notifier",
                "adapters.port",
                UnitKind::Interface,
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn resides_in_selects_matching_units() {
        let graph = sample_graph();
        let selected = UnitPredicate::resides_in(&["..request.."])
            .unwrap()
            .select(&graph);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name, "app.usecase.order.request.OrderRequest");
    }

    #[test]
    fn and_composes_residency_and_exclusion() {
        let graph = sample_graph();
        let predicate = UnitPredicate::resides_in(&["..request.."])
            .unwrap()
            .and(UnitPredicate::resides_outside(&["..enums.."]).unwrap());
        let selected = predicate.select(&graph);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "app.usecase.order.request.OrderRequest");
    }

    #[test]
    fn or_unions_scopes() {
        let graph = sample_graph();
        let predicate = UnitPredicate::resides_in(&["core.."])
            .unwrap()
            .or(UnitPredicate::resides_in(&["adapters.port.."]).unwrap());
        assert_eq!(predicate.select(&graph).len(), 2);
    }

    #[test]
    fn kind_check_filters_units() {
        let graph = sample_graph();
        let predicate = UnitPredicate::is_kind(UnitKind::Interface);
        let selected = predicate.select(&graph);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "adapters.port.Notifier");
    }

    #[test]
    fn empty_pattern_set_selects_nothing() {
        let graph = sample_graph();
        let selected = UnitPredicate::ResidesIn(Vec::new()).select(&graph);
        assert!(selected.is_empty());
    }

    #[test]
    fn chained_and_flattens() {
        let predicate = UnitPredicate::resides_in(&["a.."])
            .unwrap()
            .and(UnitPredicate::is_kind(UnitKind::Class))
            .and(UnitPredicate::resides_outside(&["a.b.."]).unwrap());
        let UnitPredicate::All(preds) = predicate else {
            panic!("expected All");
        };
        assert_eq!(preds.len(), 3);
    }

    #[test]
    fn invalid_pattern_propagates() {
        assert!(UnitPredicate::resides_in(&["a...b"]).is_err());
    }
}
