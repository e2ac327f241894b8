//! Violation records and the per-run violation set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Why an edge was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// The dependency is on the current layer's forbid list.
    Forbidden,
    /// The dependency sits at a higher rank than the current module.
    Upward,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden => write!(f, "forbidden"),
            Self::Upward => write!(f, "upward"),
        }
    }
}

/// A dependency edge that breaks the layering policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Module declaring the dependency.
    pub module: String,
    /// Layer of `module`.
    pub layer: Option<String>,
    /// Module depended upon.
    pub dependency: String,
    /// Layer of `dependency`.
    pub dependency_layer: Option<String>,
    /// Rule that flagged the edge.
    pub kind: ViolationKind,
    /// Build configuration declaring the dependency, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        module: impl Into<String>,
        layer: Option<&str>,
        dependency: impl Into<String>,
        dependency_layer: Option<&str>,
        kind: ViolationKind,
    ) -> Self {
        Self {
            module: module.into(),
            layer: layer.map(String::from),
            dependency: dependency.into(),
            dependency_layer: dependency_layer.map(String::from),
            kind,
            configuration: None,
        }
    }

    /// Records the build configuration the edge was declared in.
    #[must_use]
    pub fn with_configuration(mut self, configuration: Option<&str>) -> Self {
        self.configuration = configuration.map(String::from);
        self
    }

    /// `module (layer)` half of the display string.
    #[must_use]
    pub fn source(&self) -> String {
        format!("{} ({})", self.module, layer_label(self.layer.as_deref()))
    }

    /// `dependency (layer)` half of the display string.
    #[must_use]
    pub fn target(&self) -> String {
        format!(
            "{} ({})",
            self.dependency,
            layer_label(self.dependency_layer.as_deref())
        )
    }
}

fn layer_label(layer: Option<&str>) -> &str {
    layer.unwrap_or("unresolved")
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --> {}", self.source(), self.target())
    }
}

/// Violations collected during one run, in discovery order.
///
/// With `dedup` on, a violation whose display string was already recorded is
/// dropped; with it off every occurrence is kept.
#[derive(Debug)]
pub struct ViolationSet {
    dedup: bool,
    seen: HashSet<String>,
    items: Vec<Violation>,
}

impl ViolationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new(dedup: bool) -> Self {
        Self {
            dedup,
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    /// Records a violation. Returns `false` if it was dropped as a duplicate.
    pub fn insert(&mut self, violation: Violation) -> bool {
        if self.dedup && !self.seen.insert(violation.to_string()) {
            return false;
        }
        self.items.push(violation);
        true
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the set, yielding violations in discovery order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Violation> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation() -> Violation {
        Violation::new(":core", Some("L1"), ":app", Some("L3"), ViolationKind::Upward)
    }

    #[test]
    fn display_matches_report_format() {
        assert_eq!(make_violation().to_string(), ":core (L1) --> :app (L3)");
    }

    #[test]
    fn unresolved_layer_is_labelled() {
        let v = Violation::new(":a", None, ":b", Some("L1"), ViolationKind::Forbidden);
        assert_eq!(v.source(), ":a (unresolved)");
        assert_eq!(v.target(), ":b (L1)");
    }

    #[test]
    fn dedup_drops_repeated_edges() {
        let mut set = ViolationSet::new(true);
        assert!(set.insert(make_violation()));
        assert!(!set.insert(make_violation()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn dedup_compares_display_string_only() {
        let mut set = ViolationSet::new(true);
        set.insert(make_violation());
        let mut other = make_violation();
        other.kind = ViolationKind::Forbidden;
        assert!(!set.insert(other));
    }

    #[test]
    fn list_semantics_keep_duplicates() {
        let mut set = ViolationSet::new(false);
        set.insert(make_violation());
        set.insert(make_violation());
        assert_eq!(set.into_vec().len(), 2);
    }

    #[test]
    fn configuration_is_not_part_of_display() {
        let v = make_violation().with_configuration(Some("releaseRuntimeClasspath"));
        assert_eq!(v.configuration.as_deref(), Some("releaseRuntimeClasspath"));
        assert_eq!(v.to_string(), ":core (L1) --> :app (L3)");
    }

    #[test]
    fn configuration_omitted_from_json_when_unknown() {
        let json = serde_json::to_string(&make_violation()).unwrap();
        assert!(!json.contains("configuration"));
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&make_violation()).unwrap();
        assert!(json.contains(r#""kind":"upward""#));
    }
}
