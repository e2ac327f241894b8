//! TOML configuration for layer rules.
//!
//! ```toml
//! order = ["L1", "L2", ["L3", "L3-ui"], "app"]
//! boundary = "L2"
//!
//! [modules]
//! L1 = [":core"]
//! L2 = [":domain"]
//!
//! [boundaries]
//! app = "L3"
//!
//! [forbid]
//! L2 = [":legacy"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::layer::LayerResolver;

/// One rank of the layer ordering.
///
/// A plain string is a layer on its own; a list is a group of peer layers
/// sharing the same rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerGroup {
    /// A single layer.
    Single(String),
    /// Peer layers with equal rank.
    Peers(Vec<String>),
}

impl LayerGroup {
    /// Layer identifiers in this group.
    #[must_use]
    pub fn layers(&self) -> &[String] {
        match self {
            Self::Single(layer) => std::slice::from_ref(layer),
            Self::Peers(layers) => layers,
        }
    }
}

impl From<&str> for LayerGroup {
    fn from(layer: &str) -> Self {
        Self::Single(layer.to_string())
    }
}

/// Layer rule configuration. Immutable for the duration of a check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Layer ordering, most foundational first.
    #[serde(default)]
    pub order: Vec<LayerGroup>,

    /// Layer name -> modules belonging to it.
    #[serde(default)]
    pub modules: BTreeMap<String, BTreeSet<String>>,

    /// Global boundary layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,

    /// Global boundary given through one of its modules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_module: Option<String>,

    /// Layer name -> boundary layer applying to edges leaving that layer.
    #[serde(default)]
    pub boundaries: BTreeMap<String, String>,

    /// Layer name -> modules its members must never depend on.
    #[serde(default)]
    pub forbid: BTreeMap<String, Vec<String>>,

    /// Log every evaluation at info level.
    #[serde(default)]
    pub debug: bool,

    /// Report each violation string once (default), or every occurrence.
    #[serde(default = "default_true")]
    pub dedup: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            modules: BTreeMap::new(),
            boundary: None,
            boundary_module: None,
            boundaries: BTreeMap::new(),
            forbid: BTreeMap::new(),
            debug: false,
            dedup: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Errors when loading configuration.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(layer_lint::config::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    #[diagnostic(
        code(layer_lint::config::parse),
        help("see `layer-lint init` for a commented template")
    )]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    #[diagnostic(code(layer_lint::config::validation))]
    Validation(String),
}

impl LayerConfig {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validate config consistency.
    ///
    /// References to layers missing from `order` are logged, not rejected:
    /// they only disable the rule that mentions them.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order.is_empty() {
            return Err(ConfigError::Validation("order: no layers defined".into()));
        }

        let mut ranked = BTreeSet::new();
        for group in &self.order {
            if group.layers().is_empty() {
                return Err(ConfigError::Validation("order: empty layer group".into()));
            }
            for layer in group.layers() {
                if !ranked.insert(layer.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "order: layer '{layer}' listed twice"
                    )));
                }
            }
        }

        if self.boundary.is_some() && self.boundary_module.is_some() {
            return Err(ConfigError::Validation(
                "boundary and boundary_module are mutually exclusive".into(),
            ));
        }

        let mut owner: HashMap<&str, &str> = HashMap::new();
        for (layer, members) in &self.modules {
            for module in members {
                if let Some(previous) = owner.insert(module.as_str(), layer.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "module '{module}' belongs to both '{previous}' and '{layer}'"
                    )));
                }
            }
        }

        let unranked = |what: &str, layer: &str| {
            if !ranked.contains(layer) {
                tracing::warn!("{what}: layer '{layer}' is not part of order");
            }
        };
        for layer in self.modules.keys() {
            unranked("modules", layer.as_str());
        }
        for (layer, boundary) in &self.boundaries {
            unranked("boundaries", layer.as_str());
            unranked("boundaries", boundary.as_str());
        }
        for layer in self.forbid.keys() {
            unranked("forbid", layer.as_str());
        }
        if let Some(layer) = &self.boundary {
            unranked("boundary", layer.as_str());
        }
        if let Some(module) = &self.boundary_module {
            if LayerResolver::new(self).global_boundary(self).is_none() {
                tracing::warn!("boundary_module: '{module}' belongs to no layer");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
order = ["L1"]

[modules]
L1 = [":core"]
"#;
        let config = LayerConfig::parse(toml).expect("parse failed");
        assert_eq!(config.order, vec![LayerGroup::from("L1")]);
        assert!(config.dedup);
        assert!(!config.debug);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
order = ["L1", ["L2", "L2-ui"], "app"]
boundary = "L2"
debug = true
dedup = false

[modules]
L1 = [":core"]
L2 = [":domain"]
L2-ui = [":widgets"]
app = [":app"]

[boundaries]
app = "L2-ui"

[forbid]
L2 = [":legacy"]
"#;
        let config = LayerConfig::parse(toml).expect("parse failed");
        assert_eq!(config.order.len(), 3);
        assert_eq!(config.order[1].layers(), ["L2", "L2-ui"]);
        assert_eq!(config.boundary.as_deref(), Some("L2"));
        assert_eq!(config.boundaries["app"], "L2-ui");
        assert_eq!(config.forbid["L2"], vec![":legacy".to_string()]);
        assert!(config.debug);
        assert!(!config.dedup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn boundary_sections_are_optional() {
        let config = LayerConfig::parse(r#"order = ["L1"]"#).expect("parse failed");
        assert!(config.boundary.is_none());
        assert!(config.boundary_module.is_none());
        assert!(config.boundaries.is_empty());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = LayerConfig::parse("order = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn validate_rejects_empty_order() {
        let config = LayerConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_layer() {
        let config = LayerConfig::parse(r#"order = ["L1", ["L2", "L1"]]"#).expect("parse failed");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'L1' listed twice"));
    }

    #[test]
    fn validate_rejects_module_in_two_layers() {
        let toml = r#"
order = ["L1", "L2"]

[modules]
L1 = [":core"]
L2 = [":core"]
"#;
        let config = LayerConfig::parse(toml).expect("parse failed");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(":core"));
    }

    #[test]
    fn validate_rejects_both_boundary_forms() {
        let toml = r#"
order = ["L1"]
boundary = "L1"
boundary_module = ":core"
"#;
        let config = LayerConfig::parse(toml).expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_tolerates_unranked_references() {
        let toml = r#"
order = ["L1"]
boundary = "missing"

[forbid]
other = [":x"]
"#;
        let config = LayerConfig::parse(toml).expect("parse failed");
        assert!(config.validate().is_ok());
    }
}
