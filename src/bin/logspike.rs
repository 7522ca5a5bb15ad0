use std::path::PathBuf;
use structopt::StructOpt;

use logspike::config::{Config, FAILED_SSH_SPIKE_RULE};
use logspike::detection::SpikeDetector;
use logspike::output::ReportWriter;

/// Batch syslog anomaly detector
#[derive(StructOpt, Debug)]
#[structopt(
    name = "logspike",
    about = "Scan a syslog file for per-minute failed-login spikes"
)]
struct Opt {
    /// Deployment root all relative paths are resolved against
    #[structopt(short, long, default_value = ".")]
    root: PathBuf,

    /// Path to the configuration file, relative to the root
    #[structopt(short, long, default_value = "02_config/config.json")]
    config: PathBuf,

    /// Year assumed for year-less syslog timestamps
    #[structopt(long, default_value = "2024")]
    reference_year: i32,
}

/// Everything one run needs, built once and passed down explicitly
struct RunContext {
    root: PathBuf,
    config: Config,
    reference_year: i32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let opt = Opt::from_args();

    let config_path = opt.root.join(&opt.config);
    let config = Config::from_file(&config_path)?;
    log::info!("Loaded configuration from {:?}", config_path);

    let ctx = RunContext {
        root: opt.root,
        config,
        reference_year: opt.reference_year,
    };

    run(&ctx)
}

fn run(ctx: &RunContext) -> Result<(), Box<dyn std::error::Error>> {
    let rule = ctx.config.rule(FAILED_SSH_SPIKE_RULE);

    // A disabled rule leaves no footprint: no output directory, no
    // files, and any artifacts from earlier runs stay untouched.
    if !rule.enabled {
        println!(
            "[INFO] Rule '{}' disabled in config.",
            FAILED_SSH_SPIKE_RULE
        );
        return Ok(());
    }

    let log_path = ctx.root.join(&ctx.config.log_file);
    let detector = SpikeDetector::new(FAILED_SSH_SPIKE_RULE, rule, ctx.reference_year);
    let anomalies = detector.detect(&log_path)?;

    let writer = ReportWriter::new(ctx.root.join(&ctx.config.output_dir));
    let (json_path, text_path) = writer.write(&anomalies, &log_path, FAILED_SSH_SPIKE_RULE)?;

    println!("[OK] Found {} anomalies.", anomalies.len());
    println!("[OK] Saved: {}", json_path.display());
    println!("[OK] Saved: {}", text_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logspike::config::RuleConfig;
    use std::collections::HashMap;
    use std::fs;

    fn context_with_rule(root: &std::path::Path, rule: RuleConfig) -> RunContext {
        let mut anomaly_rules = HashMap::new();
        anomaly_rules.insert(FAILED_SSH_SPIKE_RULE.to_string(), rule);

        RunContext {
            root: root.to_path_buf(),
            config: Config {
                log_file: PathBuf::from("auth.log"),
                output_dir: PathBuf::from("03_results"),
                anomaly_rules,
            },
            reference_year: 2024,
        }
    }

    #[test]
    fn test_disabled_rule_leaves_no_footprint() {
        let root = tempfile::tempdir().unwrap();
        let ctx = context_with_rule(
            root.path(),
            RuleConfig {
                enabled: false,
                ..RuleConfig::default()
            },
        );

        // Succeeds without the log file even existing
        run(&ctx).unwrap();

        assert!(!root.path().join("03_results").exists());
    }

    #[test]
    fn test_enabled_rule_writes_artifacts() {
        let root = tempfile::tempdir().unwrap();
        fs::write(
            root.path().join("auth.log"),
            "Jan 10 10:00:01 host sshd[1]: Failed password for root from 10.0.0.1\n",
        )
        .unwrap();

        let ctx = context_with_rule(
            root.path(),
            RuleConfig {
                max_per_minute: 0,
                ..RuleConfig::default()
            },
        );

        run(&ctx).unwrap();

        let out_dir = root.path().join("03_results");
        assert!(out_dir.join("anomalies.json").is_file());
        assert!(out_dir.join("report.txt").is_file());
    }
}
