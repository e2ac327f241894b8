//! Clean command implementation.

use anyhow::Result;
use layer_lint_core::ReportWriter;
use std::path::Path;

/// Runs the clean command.
pub fn run(build_dir: &Path) -> Result<()> {
    let writer = ReportWriter::in_build_dir(build_dir);
    if !writer.clean()? {
        println!("No report at {}", writer.path().display());
    }
    Ok(())
}
