//! Check command implementation.

use anyhow::{Context, Result};
use layer_lint_core::{DependencyGraph, LayerChecker, LayerConfig, ReportWriter};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Inputs of a check run beyond the configuration.
pub struct CheckOptions {
    /// Dependency graph file.
    pub graph: PathBuf,
    /// Build directory receiving the report.
    pub build_dir: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Whether to write the HTML report.
    pub write_report: bool,
}

/// Runs the check command.
pub fn run(source: &ConfigSource, options: &CheckOptions) -> Result<()> {
    let config = load_config(source)?;
    if let Err(e) = config.validate() {
        eprintln!("{:?}", miette::Report::new(e));
        anyhow::bail!("Config validation failed");
    }

    let graph = DependencyGraph::from_file(&options.graph)
        .with_context(|| format!("Failed to load graph: {}", options.graph.display()))?;

    tracing::info!(
        "Checking {} module(s) from {}",
        graph.modules.len(),
        options.graph.display()
    );

    let report = LayerChecker::new(config).check(&graph);

    super::output::print(&report, options.format)?;

    if options.write_report {
        let writer = ReportWriter::in_build_dir(&options.build_dir);
        if writer.write(&report.violations)? {
            tracing::info!("Report written to {}", writer.path().display());
        }
    }

    // Exit with error code if there are violations
    if report.has_violations() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<LayerConfig> {
    match source {
        ConfigSource::NotFound => {
            anyhow::bail!("No layer-lint.toml found. Run `layer-lint init` to create one.")
        }
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            LayerConfig::from_file(p).with_context(|| format!("Failed to load {}", p.display()))
        }
    }
}
