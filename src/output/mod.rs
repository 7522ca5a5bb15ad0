//! Report emission
//!
//! Serializes detection results into the two per-run artifacts:
//! `anomalies.json` (machine-readable) and `report.txt` (human-readable).
//! Each run overwrites the previous artifacts.

use crate::models::Anomaly;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const JSON_FILE: &str = "anomalies.json";
const TEXT_FILE: &str = "report.txt";

/// Errors that can occur while writing the report artifacts
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize anomalies: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes the per-run report artifacts under a fixed output directory
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer targeting `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        ReportWriter {
            output_dir: output_dir.into(),
        }
    }

    /// Write `anomalies.json` and `report.txt`, creating the output
    /// directory (and missing parents) first.
    ///
    /// Returns the paths of the two artifacts. If the second write fails
    /// after the first succeeded, the error is surfaced; the partial
    /// output is a documented limitation of the failure path.
    pub fn write(
        &self,
        anomalies: &[Anomaly],
        log_path: &Path,
        rule_name: &str,
    ) -> Result<(PathBuf, PathBuf), ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let json_path = self.output_dir.join(JSON_FILE);
        // to_string_pretty leaves non-ASCII characters unescaped
        let json = serde_json::to_string_pretty(anomalies)?;
        fs::write(&json_path, json).map_err(|source| ReportError::Write {
            path: json_path.clone(),
            source,
        })?;

        let text_path = self.output_dir.join(TEXT_FILE);
        let text = render_text_report(anomalies, log_path, rule_name);
        fs::write(&text_path, text).map_err(|source| ReportError::Write {
            path: text_path.clone(),
            source,
        })?;

        Ok((json_path, text_path))
    }
}

/// Render the plain-text summary: fixed header, then one line per
/// anomaly in the same order as the JSON array.
fn render_text_report(anomalies: &[Anomaly], log_path: &Path, rule_name: &str) -> String {
    let mut report = String::new();
    let _ = writeln!(
        report,
        "Log anomaly detector report (v{})",
        env!("CARGO_PKG_VERSION")
    );
    let _ = writeln!(report, "Log file: {}", log_path.display());
    let _ = writeln!(report, "Rule: {}", rule_name);
    let _ = writeln!(report, "Total anomalies: {}", anomalies.len());
    report.push('\n');

    for anomaly in anomalies {
        let _ = writeln!(
            report,
            "[{}] Failed SSH logins: {} (threshold: {})",
            anomaly.minute, anomaly.count, anomaly.threshold
        );
    }

    report
}
