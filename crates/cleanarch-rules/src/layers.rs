//! Layered-architecture rule: named layers with access directives.
//!
//! Layers are defined by package-path patterns; directives constrain which
//! layers may access or be accessed by which. Only edges whose both
//! endpoints resolve to a declared layer are policed; everything else is
//! outside the model and ignored. A directive that matches no edge is not
//! an error — absence of use is not a violation.

use cleanarch_core::{
    DependencyGraph, PackagePattern, PatternError, Rule, Severity, Violation,
};
use std::collections::HashSet;
use tracing::debug;

/// Rule code for layered-architecture.
pub const CODE: &str = "CA001";

/// Rule name for layered-architecture.
pub const NAME: &str = "layered-architecture";

/// A named layer defined by one or more package patterns.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    patterns: Vec<PackagePattern>,
}

impl Layer {
    /// Returns the layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tests whether a package belongs to this layer.
    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        cleanarch_core::pattern::resides_in_any(package, &self.patterns)
    }
}

/// A constraint declared on one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDirective {
    /// The layer's units may only depend on units in the allowed layers.
    MayOnlyAccess {
        /// Constrained layer.
        layer: String,
        /// Layers it may access.
        allowed: Vec<String>,
    },
    /// The layer's units may only be depended on from the allowed layers.
    MayOnlyBeAccessedBy {
        /// Constrained layer.
        layer: String,
        /// Layers that may access it.
        allowed: Vec<String>,
    },
    /// The layer's units may not depend on any other layer.
    MayNotAccessAnyLayer {
        /// Constrained layer.
        layer: String,
    },
    /// No other layer's units may depend on this layer.
    MayNotBeAccessedByAnyLayer {
        /// Constrained layer.
        layer: String,
    },
}

impl AccessDirective {
    fn layer(&self) -> &str {
        match self {
            Self::MayOnlyAccess { layer, .. }
            | Self::MayOnlyBeAccessedBy { layer, .. }
            | Self::MayNotAccessAnyLayer { layer }
            | Self::MayNotBeAccessedByAnyLayer { layer } => layer,
        }
    }

    fn referenced_layers(&self) -> &[String] {
        match self {
            Self::MayOnlyAccess { allowed, .. } | Self::MayOnlyBeAccessedBy { allowed, .. } => {
                allowed
            }
            Self::MayNotAccessAnyLayer { .. } | Self::MayNotBeAccessedByAnyLayer { .. } => &[],
        }
    }
}

/// Builder for a [`LayeredArchitecture`] rule.
#[derive(Debug, Default)]
pub struct LayeredArchitectureBuilder {
    layers: Vec<Layer>,
    directives: Vec<AccessDirective>,
    errors: Vec<LayerError>,
}

impl LayeredArchitectureBuilder {
    /// Declares a layer defined by the given package patterns.
    ///
    /// Declaration order matters: when layer patterns overlap, a unit
    /// belongs to the first matching layer.
    #[must_use]
    pub fn layer(mut self, name: impl Into<String>, patterns: &[&str]) -> Self {
        let name = name.into();
        if self.layers.iter().any(|l| l.name == name) {
            self.errors.push(LayerError::DuplicateLayer { name });
            return self;
        }
        match PackagePattern::compile_all(patterns) {
            Ok(patterns) if !patterns.is_empty() => self.layers.push(Layer { name, patterns }),
            Ok(_) => self.errors.push(LayerError::EmptyLayer { name }),
            Err(source) => self.errors.push(LayerError::Pattern { name, source }),
        }
        self
    }

    /// Declares: `layer` may only access the `allowed` layers.
    #[must_use]
    pub fn may_only_access(mut self, layer: impl Into<String>, allowed: &[&str]) -> Self {
        self.directives.push(AccessDirective::MayOnlyAccess {
            layer: layer.into(),
            allowed: allowed.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Declares: `layer` may only be accessed by the `allowed` layers.
    #[must_use]
    pub fn may_only_be_accessed_by(mut self, layer: impl Into<String>, allowed: &[&str]) -> Self {
        self.directives.push(AccessDirective::MayOnlyBeAccessedBy {
            layer: layer.into(),
            allowed: allowed.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Declares: `layer` may not access any other layer.
    #[must_use]
    pub fn may_not_access_any_layer(mut self, layer: impl Into<String>) -> Self {
        self.directives.push(AccessDirective::MayNotAccessAnyLayer {
            layer: layer.into(),
        });
        self
    }

    /// Declares: `layer` may not be accessed by any other layer.
    #[must_use]
    pub fn may_not_be_accessed_by_any_layer(mut self, layer: impl Into<String>) -> Self {
        self.directives
            .push(AccessDirective::MayNotBeAccessedByAnyLayer {
                layer: layer.into(),
            });
        self
    }

    /// Finalizes the rule, verifying every directive names a declared layer.
    ///
    /// # Errors
    ///
    /// Returns the first construction error: a malformed pattern, a
    /// duplicate or empty layer, or a directive referencing an unknown
    /// layer.
    pub fn build(mut self) -> Result<LayeredArchitecture, LayerError> {
        if let Some(error) = self.errors.drain(..).next() {
            return Err(error);
        }
        let known: HashSet<&str> = self.layers.iter().map(|l| l.name.as_str()).collect();
        for directive in &self.directives {
            if !known.contains(directive.layer()) {
                return Err(LayerError::UnknownLayer {
                    name: directive.layer().to_string(),
                });
            }
            for referenced in directive.referenced_layers() {
                if !known.contains(referenced.as_str()) {
                    return Err(LayerError::UnknownLayer {
                        name: referenced.clone(),
                    });
                }
            }
        }
        Ok(LayeredArchitecture {
            layers: self.layers,
            directives: self.directives,
        })
    }
}

/// Enforces a set of access directives across named layers.
#[derive(Debug, Clone)]
pub struct LayeredArchitecture {
    layers: Vec<Layer>,
    directives: Vec<AccessDirective>,
}

impl LayeredArchitecture {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> LayeredArchitectureBuilder {
        LayeredArchitectureBuilder::default()
    }

    /// Resolves the layer containing a package, plus any further matches.
    ///
    /// Membership is the first matching layer in declaration order; extra
    /// matches indicate overlapping layer definitions.
    fn classify<'a>(&'a self, package: &str) -> (Option<&'a str>, Vec<&'a str>) {
        let mut matches = self
            .layers
            .iter()
            .filter(|l| l.contains(package))
            .map(Layer::name);
        let first = matches.next();
        (first, matches.collect())
    }

    /// Resolves membership, recording one overlap warning per package.
    fn resolve<'a>(
        &'a self,
        package: &str,
        unit: &str,
        warned: &mut HashSet<String>,
        violations: &mut Vec<Violation>,
    ) -> Option<&'a str> {
        let (first, extra) = self.classify(package);
        if let Some(first_name) = first {
            if !extra.is_empty() && warned.insert(package.to_string()) {
                violations.push(Violation::new(
                    CODE,
                    NAME,
                    Severity::Warning,
                    unit,
                    format!(
                        "package `{package}` matches layers `{first_name}` and `{}`; \
                         using `{first_name}` (first declared)",
                        extra.join("`, `"),
                    ),
                ));
            }
        }
        first
    }
}

impl Rule for LayeredArchitecture {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces declared access directives between architecture layers"
    }

    fn check(&self, graph: &DependencyGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut warned = HashSet::new();

        for (unit, edge) in graph.edges() {
            if edge.builtin {
                continue;
            }
            let origin = self.resolve(&unit.package, &unit.name, &mut warned, &mut violations);
            let target =
                self.resolve(&edge.target_package, &edge.target, &mut warned, &mut violations);
            let (Some(origin), Some(target)) = (origin, target) else {
                // Endpoint outside every declared layer: not policed.
                continue;
            };
            if origin == target {
                // Intra-layer calls are always permitted.
                continue;
            }
            debug!(%origin, %target, unit = %unit.name, "checking cross-layer edge");

            for directive in &self.directives {
                let broken = match directive {
                    AccessDirective::MayOnlyAccess { layer, allowed } => {
                        layer == origin && !allowed.iter().any(|a| a == target)
                    }
                    AccessDirective::MayOnlyBeAccessedBy { layer, allowed } => {
                        layer == target && !allowed.iter().any(|a| a == origin)
                    }
                    AccessDirective::MayNotAccessAnyLayer { layer } => layer == origin,
                    AccessDirective::MayNotBeAccessedByAnyLayer { layer } => layer == target,
                };
                if broken {
                    violations.push(
                        Violation::new(
                            CODE,
                            NAME,
                            Severity::Error,
                            &unit.name,
                            format!(
                                "layer `{origin}` may not access layer `{target}`: \
                                 `{}` depends on `{}`",
                                unit.name, edge.target
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

/// Errors constructing a layered-architecture rule.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LayerError {
    /// A layer pattern failed to compile.
    #[error("layer `{name}`: {source}")]
    Pattern {
        /// Layer with the bad pattern.
        name: String,
        /// Underlying pattern error.
        source: PatternError,
    },

    /// A layer was declared twice.
    #[error("layer `{name}` declared more than once")]
    DuplicateLayer {
        /// The duplicated name.
        name: String,
    },

    /// A layer was declared with no patterns.
    #[error("layer `{name}` has no package patterns")]
    EmptyLayer {
        /// The empty layer.
        name: String,
    },

    /// A directive references an undeclared layer.
    #[error("directive references unknown layer `{name}`")]
    UnknownLayer {
        /// The unknown name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanarch_core::{ConstructorVisibility, Edge, Location, Unit, UnitKind};

    fn loc(line: usize) -> Location {
        Location::new("src/Test.kt", line)
    }

    fn unit_with_edge(name: &str, package: &str, target: &str, target_pkg: &str) -> Unit {
        Unit::new(name, package, UnitKind::Class, ConstructorVisibility::Public)
            .with_edge(Edge::new(target, target_pkg, loc(5)))
    }

    fn clean_layers() -> LayeredArchitecture {
        LayeredArchitecture::builder()
            .layer("enterprise", &["com.example.core.."])
            .layer("application", &["com.example.app.."])
            .layer("adapters", &["com.example.adapters.."])
            .may_not_be_accessed_by_any_layer("adapters")
            .may_only_access("adapters", &["application"])
            .may_only_be_accessed_by("application", &["adapters"])
            .may_only_access("application", &["enterprise"])
            .may_only_be_accessed_by("enterprise", &["application"])
            .may_not_access_any_layer("enterprise")
            .build()
            .unwrap()
    }

    fn graph_of(units: Vec<Unit>) -> DependencyGraph {
        let mut builder = DependencyGraph::builder();
        for unit in units {
            builder = builder.unit(unit);
        }
        builder.build().unwrap()
    }

    #[test]
    fn allowed_downward_dependency_passes() {
        let graph = graph_of(vec![unit_with_edge(
            "com.example.app.OrderHandler",
            "com.example.app",
            "com.example.core.Order",
            "com.example.core",
        )]);
        assert!(clean_layers().check(&graph).is_empty());
    }

    #[test]
    fn enterprise_accessing_application_violates() {
        let graph = graph_of(vec![unit_with_edge(
            "com.example.core.Order",
            "com.example.core",
            "com.example.app.OrderHandler",
            "com.example.app",
        )]);
        let violations = clean_layers().check(&graph);
        // Breaks both "enterprise may not access any layer" and
        // "application may only be accessed by adapters".
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("`enterprise`"));
        assert_eq!(violations[0].location, Some(loc(5)));
    }

    #[test]
    fn adapters_accessed_from_application_violates() {
        let graph = graph_of(vec![unit_with_edge(
            "com.example.app.OrderHandler",
            "com.example.app",
            "com.example.adapters.Controller",
            "com.example.adapters",
        )]);
        let violations = clean_layers().check(&graph);
        // "adapters may not be accessed by any layer" and
        // "application may only access enterprise".
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn intra_layer_edge_always_permitted() {
        let graph = graph_of(vec![unit_with_edge(
            "com.example.core.Order",
            "com.example.core",
            "com.example.core.Item",
            "com.example.core",
        )]);
        assert!(clean_layers().check(&graph).is_empty());
    }

    #[test]
    fn edge_with_unlayered_endpoint_is_ignored() {
        let graph = graph_of(vec![
            unit_with_edge(
                "com.example.core.Order",
                "com.example.core",
                "org.library.Json",
                "org.library",
            ),
            unit_with_edge(
                "org.other.Tool",
                "org.other",
                "com.example.core.Order",
                "com.example.core",
            ),
        ]);
        assert!(clean_layers().check(&graph).is_empty());
    }

    #[test]
    fn builtin_edges_are_exempt() {
        let unit = Unit::new(
            "com.example.core.Order",
            "com.example.core",
            UnitKind::Class,
            ConstructorVisibility::Private,
        )
        .with_edge(Edge::new("java.lang.String", "java.lang", loc(3)).builtin());
        assert!(clean_layers().check(&graph_of(vec![unit])).is_empty());
    }

    #[test]
    fn overlapping_layers_warn_once_and_use_first_declared() {
        let rule = LayeredArchitecture::builder()
            .layer("application", &["com.example.app.."])
            .layer("wide", &["com.example.."])
            .may_only_access("application", &[])
            .may_only_access("wide", &["application"])
            .build()
            .unwrap();
        let graph = graph_of(vec![
            unit_with_edge(
                "com.example.app.A",
                "com.example.app",
                "com.example.app.B",
                "com.example.app",
            ),
            unit_with_edge(
                "com.example.app.B",
                "com.example.app",
                "com.example.app.A",
                "com.example.app",
            ),
        ]);
        let violations = rule.check(&graph);
        // Intra-layer edges pass; only the single overlap warning remains.
        let warnings: Vec<_> = violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("first declared"));
        assert!(violations.iter().all(|v| v.severity == Severity::Warning));
    }

    #[test]
    fn directive_with_no_matching_edges_is_not_an_error() {
        let graph = graph_of(vec![Unit::new(
            "org.unrelated.Thing",
            "org.unrelated",
            UnitKind::Class,
            ConstructorVisibility::Public,
        )]);
        assert!(clean_layers().check(&graph).is_empty());
    }

    #[test]
    fn build_rejects_unknown_directive_layer() {
        let result = LayeredArchitecture::builder()
            .layer("application", &["app.."])
            .may_only_access("application", &["nonexistent"])
            .build();
        assert!(matches!(result, Err(LayerError::UnknownLayer { .. })));
    }

    #[test]
    fn build_rejects_duplicate_layer() {
        let result = LayeredArchitecture::builder()
            .layer("application", &["app.."])
            .layer("application", &["other.."])
            .build();
        assert!(matches!(result, Err(LayerError::DuplicateLayer { .. })));
    }

    #[test]
    fn build_rejects_malformed_pattern() {
        let result = LayeredArchitecture::builder()
            .layer("application", &["app...x"])
            .build();
        assert!(matches!(result, Err(LayerError::Pattern { .. })));
    }

    #[test]
    fn build_rejects_layer_without_patterns() {
        let result = LayeredArchitecture::builder().layer("empty", &[]).build();
        assert!(matches!(result, Err(LayerError::EmptyLayer { .. })));
    }
}
