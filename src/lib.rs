pub mod config;
pub mod detection;
pub mod models;
pub mod output;
pub mod timestamp;

// Re-export commonly used types
pub use config::{Config, RuleConfig};
pub use detection::SpikeDetector;
pub use models::Anomaly;
pub use output::ReportWriter;
pub use timestamp::{parse_syslog_timestamp, DEFAULT_REFERENCE_YEAR};
