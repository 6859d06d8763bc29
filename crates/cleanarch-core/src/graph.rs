//! Immutable dependency-graph snapshot.
//!
//! The graph is built once by an external collaborator (a parser, compiler
//! plugin, or bytecode importer), handed to the engine, and never mutated
//! afterwards. Units own their outbound edges; edge targets are referenced
//! by fully qualified name, never by shared pointer. An inbound index is
//! derived once at construction so rules can query dependencies-to-self.

use crate::types::Location;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    /// A concrete class or struct-like unit.
    Class,
    /// An interface / trait-like unit.
    Interface,
    /// An immutable value type with structural equality.
    RecordLike,
}

/// Constructor visibility of a unit, aggregated over all its constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructorVisibility {
    /// All constructors are public.
    Public,
    /// All constructors are private.
    Private,
    /// Both public and private constructors exist.
    Mixed,
}

/// A directed dependency from its owning unit to a target.
///
/// The target may be absent from the graph's unit list (an external or
/// library dependency); only its package path is then usable for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Fully qualified name of the target unit.
    pub target: String,
    /// Dotted package path of the target.
    pub target_package: String,
    /// Where the dependency occurs in source.
    pub location: Location,
    /// Whether the target resides in a language/platform package.
    ///
    /// Builtin targets are exempt from purity, isolation, and layer rules.
    #[serde(default)]
    pub builtin: bool,
}

impl Edge {
    /// Creates a new edge to a model-internal target.
    #[must_use]
    pub fn new(
        target: impl Into<String>,
        target_package: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            target: target.into(),
            target_package: target_package.into(),
            location,
            builtin: false,
        }
    }

    /// Marks the edge target as a language/platform builtin.
    #[must_use]
    pub fn builtin(mut self) -> Self {
        self.builtin = true;
        self
    }
}

/// A named code element with its package membership and outbound edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Fully qualified name.
    pub name: String,
    /// Dotted package path.
    pub package: String,
    /// Kind of the unit.
    pub kind: UnitKind,
    /// Aggregated constructor visibility.
    pub constructors: ConstructorVisibility,
    /// Outbound dependency edges, owned by this unit.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Unit {
    /// Creates a new unit with no edges.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        kind: UnitKind,
        constructors: ConstructorVisibility,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            constructors,
            edges: Vec::new(),
        }
    }

    /// Adds an outbound edge (builder style, before graph construction).
    #[must_use]
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Returns the simple (unqualified) name of this unit.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        crate::pattern::last_segment(&self.name)
    }
}

/// An inbound dependency as seen from the target unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundDependency {
    /// Fully qualified name of the origin unit.
    pub origin: String,
    /// Dotted package path of the origin.
    pub origin_package: String,
    /// Where the dependency occurs in source.
    pub location: Location,
}

/// Immutable snapshot of units and their dependencies.
///
/// Constructed via [`GraphBuilder`] or [`DependencyGraph::from_json`];
/// read-only for the duration of a check run, so concurrent rule
/// evaluation needs no locking.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    units: Vec<Unit>,
    index: HashMap<String, usize>,
    inbound: HashMap<String, Vec<InboundDependency>>,
}

impl DependencyGraph {
    /// Creates a builder for assembling a graph snapshot.
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Deserializes a graph from a JSON snapshot: `{"units": [...]}`.
    ///
    /// The snapshot is produced by the graph-building collaborator; this
    /// only decodes and indexes an already-materialized structure.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid JSON or duplicate unit names.
    pub fn from_json(content: &str) -> Result<Self, GraphError> {
        #[derive(Deserialize)]
        struct Snapshot {
            units: Vec<Unit>,
        }

        let snapshot: Snapshot =
            serde_json::from_str(content).map_err(|e| GraphError::Decode {
                message: e.to_string(),
            })?;

        let mut builder = GraphBuilder::default();
        for unit in snapshot.units {
            builder = builder.unit(unit);
        }
        builder.build()
    }

    /// Enumerates all units in declaration order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Looks up a unit by fully qualified name.
    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.index.get(name).map(|&i| &self.units[i])
    }

    /// Returns true if a unit with the given name exists in the snapshot.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the inbound dependencies of a unit, in declaration order.
    ///
    /// Empty for unknown names: an edge may reference a target absent from
    /// the unit list, and rules degrade rather than fail on such gaps.
    #[must_use]
    pub fn inbound(&self, name: &str) -> &[InboundDependency] {
        self.inbound.get(name).map_or(&[], Vec::as_slice)
    }

    /// Iterates every edge with its origin unit.
    pub fn edges(&self) -> impl Iterator<Item = (&Unit, &Edge)> {
        self.units
            .iter()
            .flat_map(|unit| unit.edges.iter().map(move |edge| (unit, edge)))
    }

    /// Number of units in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the snapshot contains no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Builder assembling an immutable [`DependencyGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    units: Vec<Unit>,
}

impl GraphBuilder {
    /// Adds a unit to the snapshot.
    #[must_use]
    pub fn unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    /// Finalizes the snapshot, building the name and inbound indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if two units share a fully qualified name.
    pub fn build(self) -> Result<DependencyGraph, GraphError> {
        let mut index = HashMap::with_capacity(self.units.len());
        for (i, unit) in self.units.iter().enumerate() {
            if index.insert(unit.name.clone(), i).is_some() {
                return Err(GraphError::DuplicateUnit {
                    name: unit.name.clone(),
                });
            }
        }

        let mut inbound: HashMap<String, Vec<InboundDependency>> = HashMap::new();
        for unit in &self.units {
            for edge in &unit.edges {
                inbound
                    .entry(edge.target.clone())
                    .or_default()
                    .push(InboundDependency {
                        origin: unit.name.clone(),
                        origin_package: unit.package.clone(),
                        location: edge.location.clone(),
                    });
            }
        }

        Ok(DependencyGraph {
            units: self.units,
            index,
            inbound,
        })
    }
}

/// Errors constructing a graph snapshot.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Two units share a fully qualified name.
    #[error("duplicate unit `{name}` in graph snapshot")]
    DuplicateUnit {
        /// The duplicated name.
        name: String,
    },

    /// The JSON snapshot could not be decoded.
    #[error("invalid graph snapshot: {message}")]
    Decode {
        /// Decode error detail.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize) -> Location {
        Location::new("src/Test.kt", line)
    }

    fn sample_graph() -> DependencyGraph {
        DependencyGraph::builder()
            .unit(
                Unit::new(
                    "app.usecase.order.OrderHandler",
                    "app.usecase.order",
                    UnitKind::Class,
                    ConstructorVisibility::Public,
                )
                .with_edge(Edge::new(
                    "app.usecase.order.request.OrderRequest",
                    "app.usecase.order.request",
                    loc(10),
                ))
                .with_edge(Edge::new("java.lang.String", "java.lang", loc(11)).builtin()),
            )
            .unit(Unit::new(
                "app.usecase.order.request.OrderRequest",
                "app.usecase.order.request",
                UnitKind::RecordLike,
                ConstructorVisibility::Public,
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn builder_indexes_units_by_name() {
        let graph = sample_graph();
        assert_eq!(graph.len(), 2);
        assert!(graph.contains("app.usecase.order.OrderHandler"));
        let unit = graph.unit("app.usecase.order.request.OrderRequest").unwrap();
        assert_eq!(unit.kind, UnitKind::RecordLike);
    }

    #[test]
    fn builder_rejects_duplicate_names() {
        let result = DependencyGraph::builder()
            .unit(Unit::new(
                "core.Order",
                "core",
                UnitKind::Class,
                ConstructorVisibility::Private,
            ))
            .unit(Unit::new(
                "core.Order",
                "core",
                UnitKind::Class,
                ConstructorVisibility::Private,
            ))
            .build();
        assert!(matches!(result, Err(GraphError::DuplicateUnit { .. })));
    }

    #[test]
    fn inbound_index_derived_from_edges() {
        let graph = sample_graph();
        let inbound = graph.inbound("app.usecase.order.request.OrderRequest");
        assert_eq!(inbound.len(), 1);
        assert_eq!(inbound[0].origin, "app.usecase.order.OrderHandler");
        assert_eq!(inbound[0].origin_package, "app.usecase.order");
        assert_eq!(inbound[0].location, loc(10));
    }

    #[test]
    fn inbound_of_unknown_target_is_empty() {
        let graph = sample_graph();
        assert!(graph.inbound("org.missing.Unit").is_empty());
    }

    #[test]
    fn edges_iterates_with_origin() {
        let graph = sample_graph();
        let pairs: Vec<(&str, &str)> = graph
            .edges()
            .map(|(u, e)| (u.name.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "app.usecase.order.OrderHandler");
        assert_eq!(pairs[1].1, "java.lang.String");
    }

    #[test]
    fn simple_name_strips_package() {
        let unit = Unit::new(
            "app.usecase.order.OrderHandler",
            "app.usecase.order",
            UnitKind::Class,
            ConstructorVisibility::Public,
        );
        assert_eq!(unit.simple_name(), "OrderHandler");
    }

    #[test]
    fn from_json_decodes_snapshot() {
        let json = r#"{
            "units": [
                {
                    "name": "core.Order",
                    "package": "core",
                    "kind": "class",
                    "constructors": "private",
                    "edges": [
                        {
                            "target": "java.math.BigDecimal",
                            "target_package": "java.math",
                            "location": { "file": "src/Order.kt", "line": 3 },
                            "builtin": true
                        }
                    ]
                }
            ]
        }"#;
        let graph = DependencyGraph::from_json(json).unwrap();
        assert_eq!(graph.len(), 1);
        let unit = graph.unit("core.Order").unwrap();
        assert_eq!(unit.constructors, ConstructorVisibility::Private);
        assert!(unit.edges[0].builtin);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            DependencyGraph::from_json("not json"),
            Err(GraphError::Decode { .. })
        ));
    }
}
