//! HTML report rendering and report file management.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::types::Violation;

/// Report location relative to the build directory.
pub const DEFAULT_REPORT_PATH: &str = "outputs/reports/forbid_dependency.html";

/// Errors when writing or removing the report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Failed to create the report directory.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        /// Directory that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to write the report file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to delete the report file.
    #[error("failed to remove {path}: {source}")]
    Remove {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
}

/// Renders violations as a standalone HTML page.
#[must_use]
pub fn render_html(violations: &[Violation]) -> String {
    let mut rows = String::new();
    for v in violations {
        let _ = write!(
            rows,
            "\n      <tr>\n        <td>{}</td>\n        <td>{}</td>\n      </tr>",
            escape(&v.source()),
            escape(&v.target()),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>Forbidden module dependencies</title>
    <style>
      table {{ border-collapse: collapse; width: 100%; }}
      th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
      th {{ background-color: #f2f2f2; }}
      tr:nth-child(even) {{ background-color: #f9f9f9; }}
    </style>
  </head>
  <body>
    <h2>Forbidden layer dependencies: current module --must not depend on--&gt; dependency</h2>
    <p>{count} violation(s)</p>
    <table>
      <tr>
        <th>Current module</th>
        <th>Forbidden dependency</th>
      </tr>{rows}
    </table>
  </body>
</html>
"#,
        count = violations.len(),
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Writes and removes the HTML report file.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    /// Writer for an explicit report path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writer for the default report location under `build_dir`.
    #[must_use]
    pub fn in_build_dir(build_dir: &Path) -> Self {
        Self::new(build_dir.join(DEFAULT_REPORT_PATH))
    }

    /// Report file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders `violations` and writes the report, creating parent
    /// directories as needed. Nothing is written for an empty list.
    ///
    /// Returns whether a report was written.
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be written.
    pub fn write(&self, violations: &[Violation]) -> Result<bool, ReportError> {
        if violations.is_empty() {
            tracing::debug!("No violations, skipping report");
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| ReportError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
                tracing::info!("Created directories: {}", parent.display());
            }
        }

        if self.path.exists() {
            tracing::info!("Overwriting report: {}", self.path.display());
        } else {
            tracing::info!("Creating report: {}", self.path.display());
        }

        std::fs::write(&self.path, render_html(violations)).map_err(|e| ReportError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(true)
    }

    /// Deletes the report if present.
    ///
    /// Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns error if an existing report cannot be removed.
    pub fn clean(&self) -> Result<bool, ReportError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Removed report: {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ReportError::Remove {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViolationKind;
    use tempfile::TempDir;

    fn make_violation(module: &str, dependency: &str) -> Violation {
        Violation::new(
            module,
            Some("L1"),
            dependency,
            Some("L3"),
            ViolationKind::Upward,
        )
    }

    #[test]
    fn html_has_one_row_per_violation() {
        let html = render_html(&[
            make_violation(":core", ":app"),
            make_violation(":base", ":app"),
        ]);
        assert_eq!(html.matches("<td>").count(), 4);
        assert!(html.contains("<td>:core (L1)</td>"));
        assert!(html.contains("<td>:app (L3)</td>"));
        assert!(html.contains("2 violation(s)"));
    }

    #[test]
    fn html_escapes_module_names() {
        let html = render_html(&[make_violation(":a<b>", ":c&d")]);
        assert!(html.contains(":a&lt;b&gt; (L1)"));
        assert!(html.contains(":c&amp;d (L3)"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn write_creates_directories() {
        let tmp = TempDir::new().unwrap();
        let writer = ReportWriter::in_build_dir(tmp.path());
        assert!(writer.write(&[make_violation(":core", ":app")]).unwrap());

        let path = tmp.path().join(DEFAULT_REPORT_PATH);
        assert_eq!(writer.path(), path.as_path());
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn write_skips_empty_report() {
        let tmp = TempDir::new().unwrap();
        let writer = ReportWriter::in_build_dir(tmp.path());
        assert!(!writer.write(&[]).unwrap());
        assert!(!writer.path().exists());
    }

    #[test]
    fn write_overwrites_existing_report() {
        let tmp = TempDir::new().unwrap();
        let writer = ReportWriter::new(tmp.path().join("report.html"));
        writer.write(&[make_violation(":old", ":app")]).unwrap();
        writer.write(&[make_violation(":new", ":app")]).unwrap();

        let content = std::fs::read_to_string(writer.path()).unwrap();
        assert!(content.contains(":new"));
        assert!(!content.contains(":old"));
    }

    #[test]
    fn clean_removes_report() {
        let tmp = TempDir::new().unwrap();
        let writer = ReportWriter::in_build_dir(tmp.path());
        writer.write(&[make_violation(":core", ":app")]).unwrap();

        assert!(writer.clean().unwrap());
        assert!(!writer.path().exists());
    }

    #[test]
    fn clean_without_report_is_noop() {
        let tmp = TempDir::new().unwrap();
        let writer = ReportWriter::in_build_dir(tmp.path());
        assert!(!writer.clean().unwrap());
    }
}
