//! Rule trait for defining conformance rules.

use crate::graph::DependencyGraph;
use crate::types::{Severity, Violation};

/// A conformance rule evaluated against the whole graph snapshot.
///
/// Rules are side-effect free functions from the read-only graph to a list
/// of violations. They must be total: a rule never panics or fails to
/// terminate on a well-formed graph, and degrades its applicability (skips
/// unclassifiable edges) rather than aborting the check run. Rules have no
/// execution-order dependency, so the checker is free to evaluate them
/// sequentially or in parallel; the `Send + Sync` bound keeps the parallel
/// option open.
///
/// # Example
///
/// ```ignore
/// use cleanarch_core::{DependencyGraph, Rule, Severity, Violation};
///
/// pub struct NoOrphanUnits;
///
/// impl Rule for NoOrphanUnits {
///     fn name(&self) -> &'static str { "no-orphan-units" }
///     fn code(&self) -> &'static str { "CA900" }
///
///     fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
///         graph
///             .units()
///             .iter()
///             .filter(|u| u.edges.is_empty() && graph.inbound(&u.name).is_empty())
///             .map(|u| {
///                 Violation::new(self.code(), self.name(), Severity::Warning, &u.name, "orphan")
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "entity-purity").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CA002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Evaluates the rule against the graph snapshot.
    ///
    /// Returns an empty list when the rule's scope is empty; absence of
    /// applicable units is never itself a violation.
    fn check(&self, graph: &DependencyGraph) -> Vec<Violation>;
}

/// Type alias for boxed [`Rule`] trait objects.
pub type RuleBox = Box<dyn Rule>;
