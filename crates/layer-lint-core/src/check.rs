//! Check run: evaluates every edge of a graph against the layer rules.

use serde::{Deserialize, Serialize};

use crate::config::LayerConfig;
use crate::evaluator::ViolationEvaluator;
use crate::graph::DependencyGraph;
use crate::layer::LayerResolver;
use crate::types::{Violation, ViolationSet};

/// Result of one check run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CheckReport {
    /// Violations in discovery order.
    pub violations: Vec<Violation>,
    /// Number of modules inspected.
    pub modules_checked: usize,
    /// Number of project edges evaluated.
    pub edges_checked: usize,
}

impl CheckReport {
    /// Returns true if any edge was flagged.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Display strings of all violations.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Runs the layer rules over a dependency graph.
pub struct LayerChecker {
    resolver: LayerResolver,
    evaluator: ViolationEvaluator,
    dedup: bool,
}

impl LayerChecker {
    /// Create a checker from config.
    #[must_use]
    pub fn new(config: LayerConfig) -> Self {
        Self {
            resolver: LayerResolver::new(&config),
            evaluator: ViolationEvaluator::new(&config),
            dedup: config.dedup,
        }
    }

    /// Check every project edge of `graph`.
    #[must_use]
    pub fn check(&self, graph: &DependencyGraph) -> CheckReport {
        let mut violations = ViolationSet::new(self.dedup);
        let mut edges_checked = 0;

        for edge in graph.edges() {
            edges_checked += 1;
            let layer = self.resolver.resolve(edge.module);
            let dependency_layer = self.resolver.resolve(edge.dependency);

            if let Some(kind) = self
                .evaluator
                .evaluate(layer, dependency_layer, edge.dependency)
            {
                let violation =
                    Violation::new(edge.module, layer, edge.dependency, dependency_layer, kind)
                        .with_configuration(edge.configuration);
                tracing::debug!(
                    "{kind} dependency via {}: {violation}",
                    edge.configuration.unwrap_or("dependencies")
                );
                violations.insert(violation);
            }
        }

        tracing::info!(
            "Checked {edges_checked} edge(s) across {} module(s), {} violation(s)",
            graph.modules.len(),
            violations.len()
        );

        CheckReport {
            violations: violations.into_vec(),
            modules_checked: graph.modules.len(),
            edges_checked,
        }
    }
}
