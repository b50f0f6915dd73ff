//! Command-line interface components.

use crate::config::{DEFAULT_LOG_FILE, DEFAULT_OUTPUT_FILE, EtlConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "bmi_etl")]
#[command(about = "Merge CSV, JSON-lines and XML height/weight records into one metric CSV")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory containing the .csv, .json and .xml source files
    #[arg(short, long, default_value = "source")]
    pub source: PathBuf,

    /// Directory receiving the output file and the progress log (created if missing)
    #[arg(short, long, default_value = "target")]
    pub target: PathBuf,

    /// Output file name inside the target directory
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Progress log file name inside the target directory
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: String,

    /// Do not print the transformed data or the run summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Args {
    /// Build the run configuration from the parsed arguments
    pub fn to_config(&self) -> EtlConfig {
        let config = EtlConfig::new(&self.source, &self.target)
            .with_output_file_name(&self.output_file)
            .with_log_file_name(&self.log_file);

        if self.quiet {
            config.without_printing()
        } else {
            config
        }
    }

    /// Diagnostic level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Set up diagnostic logging on stderr.
///
/// `RUST_LOG` overrides the level derived from the flags. These events are
/// separate from the progress log.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bmi_etl={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["bmi_etl"]);
        let config = args.to_config();

        assert_eq!(config, EtlConfig::default());
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_all_options() {
        let args = Args::parse_from([
            "bmi_etl",
            "--source",
            "/data/in",
            "-t",
            "/data/out",
            "--output-file",
            "metric.csv",
            "--log-file",
            "run.log",
            "--quiet",
        ]);
        let config = args.to_config();

        assert_eq!(config.source_dir, PathBuf::from("/data/in"));
        assert_eq!(config.output_path(), PathBuf::from("/data/out/metric.csv"));
        assert_eq!(config.log_path(), PathBuf::from("/data/out/run.log"));
        assert!(!config.print_transformed);
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["bmi_etl", "--quiet", "--verbose"]).is_err());
    }

    #[test]
    fn test_verbose_level() {
        let args = Args::parse_from(["bmi_etl", "-v"]);
        assert_eq!(args.get_log_level(), "debug");
    }
}
