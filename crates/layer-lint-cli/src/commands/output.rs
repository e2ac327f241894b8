//! Output formatting for check results.

use anyhow::Result;
use layer_lint_core::CheckReport;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &CheckReport) {
    for violation in &report.violations {
        println!("\x1b[31merror\x1b[0m[{}] {violation}", violation.kind);
    }
    if report.has_violations() {
        println!();
    }

    let summary_color = if report.has_violations() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} violation(s) in {} edge(s) across {} module(s)\x1b[0m",
        summary_color,
        report.violations.len(),
        report.edges_checked,
        report.modules_checked
    );
}

fn print_json(report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &CheckReport) {
    for line in report.lines() {
        println!("{line}");
    }
}
