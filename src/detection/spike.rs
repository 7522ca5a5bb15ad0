//! Per-minute spike detection
//!
//! Streams a syslog file once, counts lines matching a rule's substring
//! per minute, and flags minutes whose count exceeds the rule's
//! threshold.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

use crate::config::RuleConfig;
use crate::models::Anomaly;
use crate::timestamp::parse_syslog_timestamp;

/// Minute-precision ISO 8601, matching the `minute` field of [`Anomaly`]
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Errors that can occur during detection
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Log file not found: {0}")]
    LogNotFound(PathBuf),

    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),
}

/// Spike detector for a single rule
pub struct SpikeDetector {
    rule_name: String,
    rule: RuleConfig,
    reference_year: i32,
}

impl SpikeDetector {
    /// Create a detector for `rule_name` with the given rule settings
    ///
    /// `reference_year` is stamped into every parsed timestamp because
    /// syslog lines carry none of their own.
    pub fn new(rule_name: impl Into<String>, rule: RuleConfig, reference_year: i32) -> Self {
        SpikeDetector {
            rule_name: rule_name.into(),
            rule,
            reference_year,
        }
    }

    /// Scan `log_path` and return flagged minutes in chronological order.
    ///
    /// Lines that do not contain the rule's substring, or whose
    /// timestamp prefix cannot be parsed, are skipped silently. A minute
    /// is flagged only when its count strictly exceeds `max_per_minute`.
    pub fn detect(&self, log_path: &Path) -> Result<Vec<Anomaly>, DetectError> {
        if !log_path.is_file() {
            return Err(DetectError::LogNotFound(log_path.to_path_buf()));
        }

        let file = File::open(log_path)?;
        let mut reader = BufReader::new(file);

        // BTreeMap keeps minute buckets in chronological order
        let mut per_minute: BTreeMap<NaiveDateTime, u64> = BTreeMap::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf)?;
            if bytes_read == 0 {
                break; // EOF
            }

            // Real logs occasionally contain binary garbage; replace
            // invalid UTF-8 instead of failing the whole run.
            let line = String::from_utf8_lossy(&buf);
            if !line.contains(&self.rule.match_substring) {
                continue;
            }

            if let Some(minute) =
                parse_syslog_timestamp(&line, &self.rule.time_format, self.reference_year)
                    .and_then(truncate_to_minute)
            {
                *per_minute.entry(minute).or_insert(0) += 1;
            }
        }

        let anomalies: Vec<Anomaly> = per_minute
            .into_iter()
            .filter(|&(_, count)| count > self.rule.max_per_minute)
            .map(|(minute, count)| Anomaly {
                rule: self.rule_name.clone(),
                minute: minute.format(MINUTE_FORMAT).to_string(),
                count,
                threshold: self.rule.max_per_minute,
            })
            .collect();

        log::debug!(
            "Rule '{}': {} minute(s) over threshold {}",
            self.rule_name,
            anomalies.len(),
            self.rule.max_per_minute
        );

        Ok(anomalies)
    }
}

/// Zero the seconds and sub-second components of a timestamp
fn truncate_to_minute(ts: NaiveDateTime) -> Option<NaiveDateTime> {
    ts.with_second(0)?.with_nanosecond(0)
}
