//! Module dependency graph exported by the host build.
//!
//! ```json
//! { "modules": [
//!   { "name": "project ':app'",
//!     "configurations": [
//!       { "name": "implementation",
//!         "dependencies": [
//!           { "kind": "project", "name": "project ':core'" },
//!           { "kind": "external", "name": "com.squareup.okio:okio:3.9.0" }
//!         ] }
//!     ] }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::module_id;

/// Kind of a declared dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Another module of the same build.
    Project,
    /// A binary artifact; carries no layer.
    External,
}

/// A dependency declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependency kind.
    pub kind: DependencyKind,
    /// Module name as rendered by the build, possibly decorated.
    pub name: String,
}

/// A dependency configuration (classpath / scope) of a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Configuration name, e.g. `implementation`.
    pub name: String,
    /// Only resolvable configurations are inspected.
    #[serde(default = "default_true")]
    pub resolvable: bool,
    /// Declared dependencies.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// One module of the build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Module name as rendered by the build, possibly decorated.
    pub name: String,
    /// Dependency configurations.
    #[serde(default)]
    pub configurations: Vec<Configuration>,
    /// Dependencies outside any named configuration.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// The whole module graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// All modules of the build.
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

/// A project-to-project edge with bare module ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    /// Module declaring the dependency.
    pub module: &'a str,
    /// Module depended upon.
    pub dependency: &'a str,
    /// Configuration the dependency was declared in, if any.
    pub configuration: Option<&'a str>,
}

fn default_true() -> bool {
    true
}

/// Errors when loading the graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Failed to read graph file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse JSON.
    #[error("invalid dependency graph: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DependencyGraph {
    /// Load from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if JSON is invalid.
    pub fn parse(content: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Project edges of resolvable configurations, in declaration order.
    ///
    /// External dependencies and non-resolvable configurations are skipped.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.modules.iter().flat_map(|entry| {
            let module = module_id::extract(&entry.name);
            let loose = entry.dependencies.iter().map(|d| (None, d));
            let scoped = entry
                .configurations
                .iter()
                .filter(move |c| {
                    if !c.resolvable {
                        tracing::debug!("{module}: skipping configuration {}", c.name);
                    }
                    c.resolvable
                })
                .flat_map(|c| c.dependencies.iter().map(|d| (Some(c.name.as_str()), d)));

            loose
                .chain(scoped)
                .filter(|(_, d)| d.kind == DependencyKind::Project)
                .map(move |(configuration, d)| Edge {
                    module,
                    dependency: module_id::extract(&d.name),
                    configuration,
                })
        })
    }
}
