//! Layer resolution: maps modules to layers and layers to ranks.

use std::collections::HashMap;

use crate::config::LayerConfig;
use crate::module_id;

/// Resolves bare module identifiers to layer names.
pub struct LayerResolver {
    map: HashMap<String, String>,
}

impl LayerResolver {
    /// Build a resolver from config.
    #[must_use]
    pub fn new(config: &LayerConfig) -> Self {
        let mut map = HashMap::new();
        // BTreeMap order: on a duplicate membership the first layer wins
        for (layer, modules) in &config.modules {
            for module in modules {
                map.entry(module.clone()).or_insert_with(|| layer.clone());
            }
        }
        Self { map }
    }

    /// Which layer does this module belong to?
    ///
    /// `None` is a legitimate answer (root project, unclassified module).
    #[must_use]
    pub fn resolve(&self, module: &str) -> Option<&str> {
        self.map.get(module).map(String::as_str)
    }

    /// The global boundary layer of `config`, named either directly or
    /// through one of its modules.
    #[must_use]
    pub fn global_boundary<'a>(&'a self, config: &'a LayerConfig) -> Option<&'a str> {
        match (&config.boundary, &config.boundary_module) {
            (Some(layer), _) => Some(layer.as_str()),
            (None, Some(module)) => self.resolve(module_id::extract(module)),
            (None, None) => None,
        }
    }
}

/// Rank lookup built once from the layer ordering.
///
/// Lower rank is more foundational. Layers in the same group share a rank.
/// A missing rank is `None`, which orders below every `Some(rank)`.
#[derive(Debug, Clone, Default)]
pub struct LayerRanks {
    ranks: HashMap<String, usize>,
}

impl LayerRanks {
    /// Build the rank table from config.
    #[must_use]
    pub fn new(config: &LayerConfig) -> Self {
        let mut ranks = HashMap::new();
        for (rank, group) in config.order.iter().enumerate() {
            for layer in group.layers() {
                ranks.entry(layer.clone()).or_insert(rank);
            }
        }
        Self { ranks }
    }

    /// Rank of `layer`, if it is part of the ordering.
    #[must_use]
    pub fn rank(&self, layer: &str) -> Option<usize> {
        self.ranks.get(layer).copied()
    }
}
