//! Checker orchestrating rule evaluation over one graph snapshot.

use crate::graph::DependencyGraph;
use crate::rule::RuleBox;
use crate::types::CheckResult;

use tracing::{debug, info};

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    rules: Vec<RuleBox>,
}

impl CheckerBuilder {
    /// Creates a new builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. Rules are evaluated in registration order.
    #[must_use]
    pub fn rule<R: crate::rule::Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple boxed rules.
    #[must_use]
    pub fn rule_boxes(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Builds the checker.
    #[must_use]
    pub fn build(self) -> Checker {
        Checker { rules: self.rules }
    }
}

/// Evaluates an ordered set of rules against a read-only graph snapshot.
///
/// Each rule runs independently; results are merged in rule-declaration
/// order so the violation list is reproducible across runs for identical
/// input.
pub struct Checker {
    rules: Vec<RuleBox>,
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluates all rules against the graph and merges their violations.
    #[must_use]
    pub fn check(&self, graph: &DependencyGraph) -> CheckResult {
        info!(
            units = graph.len(),
            rules = self.rules.len(),
            "starting conformance check"
        );

        let mut result = CheckResult::new();
        for rule in &self.rules {
            debug!(rule = rule.name(), "evaluating");
            let violations = rule.check(graph);
            debug!(rule = rule.name(), found = violations.len(), "evaluated");
            result.violations.extend(violations);
            result.rules_run += 1;
        }

        info!(
            violations = result.violations.len(),
            verdict = %result.verdict(),
            "conformance check complete"
        );

        result
    }
}
