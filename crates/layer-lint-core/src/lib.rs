//! # layer-lint-core
//!
//! Dependency-direction checks for multi-module builds.
//!
//! Modules are grouped into ordered architectural layers. Every edge of an
//! already resolved module graph is classified as allowed or forbidden:
//!
//! - [`LayerResolver`] maps a module to its layer
//! - [`LayerRanks`] maps a layer to its position in the ordering
//! - [`ViolationEvaluator`] decides whether a (layer, layer) pair is a violation
//! - [`LayerChecker`] runs the evaluator over a [`DependencyGraph`]
//! - [`ReportWriter`] renders and writes the HTML report
//!
//! ## Example
//!
//! ```
//! use layer_lint_core::{DependencyGraph, LayerChecker, LayerConfig};
//!
//! let config = LayerConfig::parse(r#"
//! order = ["L1", "L2", "L3"]
//!
//! [modules]
//! L1 = [":core"]
//! L3 = [":app"]
//! "#).unwrap();
//!
//! let graph = DependencyGraph::parse(r#"{ "modules": [
//!     { "name": "project ':core'", "dependencies": [
//!         { "kind": "project", "name": "project ':app'" }
//!     ] }
//! ] }"#).unwrap();
//!
//! let report = LayerChecker::new(config).check(&graph);
//! assert_eq!(report.violations[0].to_string(), ":core (L1) --> :app (L3)");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod check;
mod config;
mod evaluator;
mod graph;
mod layer;
mod report;
mod types;

pub mod module_id;

pub use check::{CheckReport, LayerChecker};
pub use config::{ConfigError, LayerConfig, LayerGroup};
pub use evaluator::ViolationEvaluator;
pub use graph::{
    Configuration, Dependency, DependencyGraph, DependencyKind, Edge, GraphError, ModuleEntry,
};
pub use layer::{LayerRanks, LayerResolver};
pub use report::{render_html, ReportError, ReportWriter, DEFAULT_REPORT_PATH};
pub use types::{Violation, ViolationKind, ViolationSet};
