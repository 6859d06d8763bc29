//! # cleanarch-core
//!
//! Core engine for clean-architecture conformance checking.
//!
//! This crate evaluates declarative architecture rules against an immutable
//! dependency-graph snapshot handed over by an external graph builder. It
//! provides:
//!
//! - [`DependencyGraph`] — the read-only snapshot of units and edges
//! - [`PackagePattern`] — `..`/`*` package-path wildcard matching
//! - [`UnitPredicate`] — composable predicates for rule scoping
//! - [`Rule`] trait and [`Checker`] for orchestrating evaluation
//! - [`Violation`] / [`CheckResult`] for reporting findings
//!
//! ## Example
//!
//! ```ignore
//! use cleanarch_core::{Checker, DependencyGraph, Verdict};
//!
//! let graph = DependencyGraph::from_json(&snapshot)?;
//! let result = Checker::builder().rule(MyRule::new()).build().check(&graph);
//! assert_eq!(result.verdict(), Verdict::Pass);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod graph;
mod rule;
mod types;

/// Package-path wildcard matching.
pub mod pattern;
/// Composable unit predicates.
pub mod predicate;

pub use checker::{Checker, CheckerBuilder};
pub use config::{ArchConfig, ConfigError};
pub use graph::{
    ConstructorVisibility, DependencyGraph, Edge, GraphBuilder, GraphError, InboundDependency,
    Unit, UnitKind,
};
pub use pattern::{PackagePattern, PatternError};
pub use predicate::UnitPredicate;
pub use rule::{Rule, RuleBox};
pub use types::{CheckResult, Location, Severity, Verdict, Violation};
