//! # cleanarch
//!
//! Clean architecture conformance checks over dependency graphs.
//!
//! This is the main facade crate that re-exports the core model and the
//! built-in rules.
//!
//! ## Quick Start — `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! cleanarch = "0.1"
//! ```
//!
//! ```rust,ignore
//! // tests/architecture.rs
//! use cleanarch::{assert_clean_architecture, find_project_root, load_config};
//!
//! #[test]
//! fn clean_architecture() {
//!     let root = find_project_root();
//!     let config = load_config(&root).unwrap();
//!     let graph = load_graph_somehow();
//!     assert_clean_architecture(&graph, &config);
//! }
//! ```
//!
//! Configure via `cleanarch.toml`.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use cleanarch::{run_check, ArchConfig, DependencyGraph, Verdict};
//!
//! let config = ArchConfig::from_file("cleanarch.toml".as_ref())?;
//! let graph = DependencyGraph::from_json(&snapshot)?;
//! let result = run_check(&graph, &config)?;
//! assert_eq!(result.verdict(), Verdict::Pass);
//! ```

#![forbid(unsafe_code)]

// Re-export the core model, checker, and configuration
pub use cleanarch_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use cleanarch_rules::*;
}

mod runner;

pub use runner::{
    assert_clean_architecture, discover_config, find_project_root, load_config, run_check,
};
