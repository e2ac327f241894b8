//! Violation evaluation for a single dependency edge.
//!
//! Rules, in order:
//!
//! 1. an unresolved layer on either side is never a violation
//! 2. a dependency on the current layer's forbid list always is
//! 3. with a ranked boundary layer, an edge whose dependency rank is at or
//!    below the boundary and whose current rank is at or above it is exempt
//! 4. otherwise the edge is a violation iff the dependency ranks higher

use std::collections::BTreeMap;

use crate::config::LayerConfig;
use crate::layer::{LayerRanks, LayerResolver};
use crate::types::ViolationKind;

/// Decides whether an edge between two layers breaks the layering policy.
#[derive(Debug, Clone)]
pub struct ViolationEvaluator {
    ranks: LayerRanks,
    forbid: BTreeMap<String, Vec<String>>,
    boundaries: BTreeMap<String, String>,
    global_boundary: Option<String>,
    debug: bool,
}

impl ViolationEvaluator {
    /// Create an evaluator from config.
    #[must_use]
    pub fn new(config: &LayerConfig) -> Self {
        let resolver = LayerResolver::new(config);
        Self {
            ranks: LayerRanks::new(config),
            forbid: config.forbid.clone(),
            boundaries: config.boundaries.clone(),
            global_boundary: resolver.global_boundary(config).map(String::from),
            debug: config.debug,
        }
    }

    /// Classifies an edge from a module in `current` to `dependency`, a
    /// module in `dependency_layer`. `None` means the edge is allowed.
    #[must_use]
    pub fn evaluate(
        &self,
        current: Option<&str>,
        dependency_layer: Option<&str>,
        dependency: &str,
    ) -> Option<ViolationKind> {
        let boundary = current.and_then(|layer| self.boundary_for(layer));
        self.trace(current, dependency_layer, boundary);

        let (Some(current), Some(dependency_layer)) = (current, dependency_layer) else {
            return None;
        };

        if self
            .forbid
            .get(current)
            .is_some_and(|denied| denied.iter().any(|m| m == dependency))
        {
            return Some(ViolationKind::Forbidden);
        }

        let cur = self.ranks.rank(current);
        let dep = self.ranks.rank(dependency_layer);

        if let Some(bound) = boundary.and_then(|b| self.ranks.rank(b)) {
            let bound = Some(bound);
            if dep <= bound && bound <= cur {
                return None;
            }
        }

        (dep > cur).then_some(ViolationKind::Upward)
    }

    /// Boolean form of [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn is_violation(
        &self,
        current: Option<&str>,
        dependency_layer: Option<&str>,
        dependency: &str,
    ) -> bool {
        self.evaluate(current, dependency_layer, dependency).is_some()
    }

    fn trace(
        &self,
        current: Option<&str>,
        dependency_layer: Option<&str>,
        boundary: Option<&str>,
    ) {
        let current = current.unwrap_or("unresolved");
        let dependency_layer = dependency_layer.unwrap_or("unresolved");
        if self.debug {
            tracing::info!(
                "current layer ({current}) | dependency layer ({dependency_layer}) | boundary ({})",
                boundary.unwrap_or("none")
            );
        } else {
            tracing::trace!(current, dependency_layer, boundary, "evaluating edge");
        }
    }

    /// Per-layer boundary if configured, else the global one.
    fn boundary_for(&self, layer: &str) -> Option<&str> {
        self.boundaries
            .get(layer)
            .or(self.global_boundary.as_ref())
            .map(String::as_str)
    }
}
